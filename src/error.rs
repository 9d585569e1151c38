//! Crate-level error type.

use thiserror::Error;

use crate::stats::StatsError;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Failure of a ledger operation.
///
/// Variants map onto the HTTP status a client sees: validation and conflicts
/// are the caller's fault, missing records are not found, the rest are
/// internal.
#[derive(Debug, Error)]
pub enum Error {
    /// The request is malformed or breaks a game rule.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request is well-formed but clashes with stored records.
    #[error("{0}")]
    Conflict(String),

    /// No record with the given id.
    #[error("{kind} not found")]
    NotFound {
        /// Record kind (`"Player"`, `"Game"`).
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// The repository failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored records break an invariant the statistics rely on.
    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl Error {
    /// A not-found error for a record of `kind`.
    #[must_use]
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Whether the error is the caller's fault rather than the service's.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Conflict(_) | Self::NotFound { .. }
        )
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, Error>;
