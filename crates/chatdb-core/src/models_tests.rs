//! Unit tests for domain models.

use super::*;

#[cfg(test)]
mod sender_tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_user() {
        assert_eq!(Sender::User.to_string(), "user");
    }

    #[test]
    fn display_ai() {
        assert_eq!(Sender::Ai.to_string(), "ai");
    }

    #[test]
    fn parse_user() {
        assert_eq!(Sender::from_str("user").ok(), Some(Sender::User));
    }

    #[test]
    fn parse_ai() {
        assert_eq!(Sender::from_str("ai").ok(), Some(Sender::Ai));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(Sender::from_str("assistant").is_err());
        assert!(Sender::from_str("system").is_err());
        assert!(Sender::from_str("User").is_err());
        assert!(Sender::from_str("AI").is_err());
        assert!(Sender::from_str("").is_err());
    }

    #[test]
    fn parse_error_names_the_offending_value() {
        let err = Sender::from_str("bot").expect_err("must fail");
        assert!(err.to_string().contains("bot"));
    }

    #[test]
    fn serde_roundtrip_both_variants() {
        for sender in [Sender::User, Sender::Ai] {
            let json = serde_json::to_string(&sender).expect("serialize");
            let back: Sender = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, sender);
        }
    }

    #[test]
    fn serde_uses_lowercase_wire_values() {
        assert_eq!(
            serde_json::to_string(&Sender::User).expect("serialize"),
            "\"user\""
        );
        assert_eq!(
            serde_json::to_string(&Sender::Ai).expect("serialize"),
            "\"ai\""
        );
    }

    #[test]
    fn serde_rejects_unknown_wire_values() {
        assert!(serde_json::from_str::<Sender>("\"robot\"").is_err());
    }
}

#[cfg(test)]
mod constructor_tests {
    use super::*;

    #[test]
    fn conversation_new_assigns_id_and_timestamps() {
        let conv = Conversation::new();
        assert!(!conv.id.is_empty());
        assert_eq!(conv.created_at, conv.updated_at);
    }

    #[test]
    fn conversation_ids_are_unique() {
        let a = Conversation::new();
        let b = Conversation::new();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn message_new_links_to_conversation() {
        let conv = Conversation::new();
        let msg = Message::new(&conv.id, Sender::User, "hello");
        assert_eq!(msg.conversation_id, conv.id);
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "hello");
        assert!(!msg.id.is_empty());
    }
}
