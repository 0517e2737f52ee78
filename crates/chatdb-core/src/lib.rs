//! chatdb-core: SQLite persistence for chat conversations
//!
//! This crate provides the storage layer for the chat backend: it resolves
//! the database location, opens the connection with WAL and foreign-key
//! enforcement, bootstraps the schema, and exposes record operations for
//! conversations and their messages.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod paths;
pub mod schema;

pub use config::Config;
pub use db::Database;
pub use error::Error;
pub use error::Result;

/// Application name used for config directories and paths.
pub const APP_NAME: &str = "chatdb";

/// Environment variable that overrides the database file path.
pub const DATABASE_PATH_ENV: &str = "CHATDB_DATABASE_PATH";
