//! Core types and shared functionality for snipbox.
//!
//! This crate provides:
//! - Snippet store with SQLite backend
//! - Pre-compiled page template cache
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod store;
pub mod templates;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use store::{DEFAULT_RECENT_LIMIT, Snippet, SnippetDb};
pub use templates::TemplateCache;
