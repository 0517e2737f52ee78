//! Database operations for chatdb.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::error::{Error, Result};
use crate::models::{Conversation, Message, Sender};
use crate::schema::SCHEMA;

/// Database handle for chatdb.
///
/// One handle is opened at startup and shared for the lifetime of the
/// process. The pool is capped at a single connection: WAL mode gives
/// concurrent readers at the engine level, and the application adds no
/// locking of its own.
#[derive(Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open or create a database at the given path.
    ///
    /// Creates missing parent directories, enables WAL journaling and
    /// foreign-key enforcement, and runs the idempotent schema bootstrap.
    /// Failure to open reports the resolved path alongside the cause.
    pub async fn open(path: &Path) -> Result<Self> {
        let parent = path.parent().unwrap_or(Path::new("."));
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            })?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let db = Self { pool };
        db.init().await?;
        tracing::debug!("opened database at {}", path.display());
        Ok(db)
    }

    /// Initialize schema. Safe to run on every start.
    async fn init(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database.
    pub async fn close(self) {
        self.pool.close().await;
    }

    // =========================================================================
    // Conversations
    // =========================================================================

    /// Insert a conversation.
    pub async fn insert_conversation(&self, conv: &Conversation) -> Result<()> {
        sqlx::query("INSERT INTO conversations (id, created_at, updated_at) VALUES (?, ?, ?)")
            .bind(&conv.id)
            .bind(format_timestamp(&conv.created_at))
            .bind(format_timestamp(&conv.updated_at))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Get a conversation by ID.
    pub async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>> {
        let row = sqlx::query("SELECT * FROM conversations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(conversation_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// List conversations, most recently created first.
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        let rows = sqlx::query("SELECT * FROM conversations ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        let mut convs = Vec::new();
        for row in rows {
            convs.push(conversation_from_row(&row)?);
        }
        Ok(convs)
    }

    /// Bump a conversation's `updated_at` to now.
    pub async fn touch_conversation(&self, id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE conversations SET updated_at = ? WHERE id = ?")
            .bind(format_timestamp(&Utc::now()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("conversation '{id}'")));
        }
        Ok(())
    }

    /// Delete a conversation; its messages go with it (ON DELETE CASCADE).
    pub async fn delete_conversation(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("conversation '{id}'")));
        }
        Ok(())
    }

    /// Get conversation count.
    pub async fn count_conversations(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conversations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// Insert a message. A missing parent conversation or an invalid sender
    /// surfaces as a constraint error; nothing is partially written.
    pub async fn insert_message(&self, msg: &Message) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, sender, text, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&msg.id)
        .bind(&msg.conversation_id)
        .bind(msg.sender.as_str())
        .bind(&msg.text)
        .bind(format_timestamp(&msg.timestamp))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Get a conversation's messages in chronological order.
    pub async fn messages_for_conversation(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let rows = sqlx::query("SELECT * FROM messages WHERE conversation_id = ? ORDER BY timestamp")
            .bind(conversation_id)
            .fetch_all(&self.pool)
            .await?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(message_from_row(&row)?);
        }
        Ok(messages)
    }

    /// Count messages belonging to a conversation.
    pub async fn count_messages(&self, conversation_id: &str) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE conversation_id = ?")
                .bind(conversation_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count.0)
    }
}

fn conversation_from_row(row: &SqliteRow) -> Result<Conversation> {
    Ok(Conversation {
        id: row.get("id"),
        created_at: parse_timestamp(row.get::<&str, _>("created_at"))?,
        updated_at: parse_timestamp(row.get::<&str, _>("updated_at"))?,
    })
}

fn message_from_row(row: &SqliteRow) -> Result<Message> {
    Ok(Message {
        id: row.get("id"),
        conversation_id: row.get("conversation_id"),
        sender: Sender::from_str(row.get::<&str, _>("sender"))?,
        text: row.get("text"),
        timestamp: parse_timestamp(row.get::<&str, _>("timestamp"))?,
    })
}

/// Timestamps are stored as RFC 3339 UTC text with millisecond precision,
/// so lexicographic order on the column is chronological order.
fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A non-RFC 3339 value in a timestamp column means a writer bypassed the
/// typed API; reads fail rather than fabricate a date.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp(raw.to_string()))
}
