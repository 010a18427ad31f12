//! Unified error types for snipbox.
//!
//! Every variant renders with a stable code prefix so callers (and logs) can
//! tell persistence failures, routine misses and template faults apart.

use std::path::PathBuf;

use tokio_rusqlite::rusqlite;

/// Unified error types for the snippet store and template cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No active snippet matches the identifier.
    ///
    /// Expired and never-inserted snippets both end up here.
    #[error("NOT_FOUND: no active snippet with id {0}")]
    NotFound(i64),

    /// Database operation failed.
    #[error("PERSISTENCE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("PERSISTENCE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// The expiry window is not an integer number of days.
    #[error("PERSISTENCE_ERROR: invalid expiry {0:?}, expected a whole number of days")]
    InvalidExpiry(String),

    /// A template file or directory could not be read.
    #[error("TEMPLATE_BUILD_FAILED: {path}: {source}")]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A page failed to compile together with its layouts and partials.
    #[error("TEMPLATE_BUILD_FAILED: {page}: {source}")]
    TemplateCompile {
        page: String,
        #[source]
        source: tera::Error,
    },

    /// A page defines a block that nothing in its inheritance chain declares.
    #[error("TEMPLATE_BUILD_FAILED: {page}: block `{block}` is not declared by any layout or partial")]
    OrphanBlock { page: String, block: String },

    /// Render was asked for a page the cache was not built with.
    #[error("UNKNOWN_PAGE: {0}")]
    UnknownPage(String),

    /// Template execution failed.
    #[error("RENDER_FAILED: {page}: {source}")]
    RenderFailed {
        page: String,
        #[source]
        source: tera::Error,
    },
}

impl Error {
    /// True for the routine "no active record" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True for backing-store failures (connectivity, query, decode, bad input).
    pub fn is_persistence(&self) -> bool {
        matches!(self, Error::Database(_) | Error::MigrationFailed(_) | Error::InvalidExpiry(_))
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            // `tokio_rusqlite::Error` is non-exhaustive.
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}
