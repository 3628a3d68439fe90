use thiserror::Error;

use crate::storage::StoreError;

/// Failures the service layer reports to its callers.
///
/// Absence is never an error: lookups return `Option`, updates return
/// `Ok(None)` for unknown ids and deletes return `Ok(false)`.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller-supplied data violates a field, uniqueness or referential
    /// rule. The message is safe to surface verbatim.
    #[error("{0}")]
    Validation(String),

    /// A state-dependent business rule blocks the operation, or the store
    /// rejected a write that passed the pre-checks (lost race on a unique
    /// index or foreign key).
    #[error("{0}")]
    Conflict(String),

    /// The store failed for reasons unrelated to the caller's input.
    #[error("storage error: {0}")]
    Persistence(#[from] StoreError),
}
