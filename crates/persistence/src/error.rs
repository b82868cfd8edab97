//! Persistence error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the persistence layer.
///
/// Only `FallbackOpen` ever escapes `ConnectionManager::acquire`; connect
/// failures and stale handles are handled there by degrading to the local
/// fallback database.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not connect to primary database after {attempts} attempt(s): {reason}")]
    ConnectFailure { attempts: u32, reason: String },

    #[error("database connection is no longer usable: {0}")]
    StaleConnection(String),

    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("unknown column `{column}` for table `{table}`")]
    UnknownColumn { table: &'static str, column: String },

    #[error("value `{value}` is not a valid {expected} for column `{column}`")]
    InvalidValue {
        column: String,
        expected: &'static str,
        value: String,
    },

    #[error("cannot open fallback database at {}: {source}", path.display())]
    FallbackOpen {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    #[error("no database connection available")]
    Unavailable,
}

impl PersistenceError {
    /// True for errors that leave the process without any usable backend.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FallbackOpen { .. })
    }

    /// True if a statement was rejected by a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Query(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}
