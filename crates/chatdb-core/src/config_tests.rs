//! Unit tests for configuration.

#[cfg(test)]
mod path_expansion_tests {
    use super::super::Config;
    use std::path::PathBuf;

    #[test]
    fn expand_path_handles_tilde() {
        let result = Config::expand_path("~/test");
        // Should not start with ~ after expansion
        assert!(!result.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn expand_path_handles_absolute_path() {
        let result = Config::expand_path("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn expand_path_handles_relative_path() {
        let result = Config::expand_path("relative/path");
        assert_eq!(result, PathBuf::from("relative/path"));
    }

    #[test]
    fn expand_path_handles_env_vars() {
        temp_env::with_var("CHATDB_TEST_VAR", Some("/test/path"), || {
            let result = Config::expand_path("$CHATDB_TEST_VAR/subdir");
            assert!(result.to_string_lossy().contains("/test/path"));
        });
    }
}

#[cfg(test)]
mod database_path_tests {
    use super::super::Config;
    use crate::DATABASE_PATH_ENV;
    use std::path::PathBuf;

    #[test]
    fn env_var_takes_precedence() {
        temp_env::with_var(DATABASE_PATH_ENV, Some("/env/chat.db"), || {
            let mut config = Config::default();
            config.database = Some(PathBuf::from("/from/config.db"));
            assert_eq!(config.database_path(), PathBuf::from("/env/chat.db"));
        });
    }

    #[test]
    fn empty_env_var_is_ignored() {
        temp_env::with_var(DATABASE_PATH_ENV, Some(""), || {
            let mut config = Config::default();
            config.database = Some(PathBuf::from("/from/config.db"));
            assert_eq!(config.database_path(), PathBuf::from("/from/config.db"));
        });
    }

    #[test]
    fn config_value_used_when_env_unset() {
        temp_env::with_var_unset(DATABASE_PATH_ENV, || {
            let mut config = Config::default();
            config.database = Some(PathBuf::from("/from/config.db"));
            assert_eq!(config.database_path(), PathBuf::from("/from/config.db"));
        });
    }

    #[test]
    fn default_is_next_to_executable() {
        temp_env::with_var_unset(DATABASE_PATH_ENV, || {
            let config = Config::default();
            let path = config.database_path();
            assert!(path.to_string_lossy().ends_with("chatdb.db"));
        });
    }
}

#[cfg(test)]
mod default_config_tests {
    use super::super::Config;

    #[test]
    fn default_has_no_database_override() {
        let config = Config::default();
        assert!(config.database.is_none());
    }

    #[test]
    fn default_server_port() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn default_config_path_is_under_app_dir() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("chatdb"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}

#[cfg(test)]
mod load_save_tests {
    use super::super::Config;
    use std::path::PathBuf;

    #[test]
    fn ensure_at_creates_default_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::ensure_at(&path).expect("ensure");
        assert!(path.exists());
        assert!(config.database.is_none());

        // Second call loads the file it just wrote.
        let reloaded = Config::ensure_at(&path).expect("reload");
        assert_eq!(reloaded.server.port, config.server.port);
    }

    #[test]
    fn load_from_path_reads_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = \"/custom/chat.db\"\n\n[server]\nport = 8080\n")
            .expect("write");

        let config = Config::load_from_path(&path).expect("load");
        assert_eq!(config.database, Some(PathBuf::from("/custom/chat.db")));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn load_from_path_rejects_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[[").expect("write");

        assert!(Config::load_from_path(&path).is_err());
    }
}
