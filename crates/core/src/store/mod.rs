//! SQLite-backed snippet store.
//!
//! This module provides persistent snippet storage using SQLite with async
//! access via tokio-rusqlite. It supports:
//!
//! - Store-assigned identifiers and timestamps
//! - Expiry evaluated inside every query against the database clock
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod connection;
pub mod migrations;
pub mod snippets;

pub use crate::Error;

pub use connection::SnippetDb;
pub use snippets::{DEFAULT_RECENT_LIMIT, Snippet};
