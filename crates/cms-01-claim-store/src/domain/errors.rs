//! Store error types, and their mapping onto the shared workflow kinds.

use shared_types::{ClaimId, ClaimMonth, UserId, WorkflowError};
use thiserror::Error;

/// Errors raised by store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    /// The one-non-cancelled-claim-per-(lecturer, month) constraint.
    #[error("a non-cancelled claim already exists for lecturer {lecturer_id} in {month}")]
    DuplicateClaim {
        lecturer_id: UserId,
        month: ClaimMonth,
    },

    /// Optimistic-concurrency check failed; another writer committed first.
    #[error("version conflict on claim {claim_id}: expected {expected}, found {found}")]
    VersionConflict {
        claim_id: ClaimId,
        expected: u64,
        found: u64,
    },

    /// A unique-key or referential constraint was violated.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => WorkflowError::NotFound { entity, id },
            StoreError::DuplicateClaim { lecturer_id, month } => {
                WorkflowError::DuplicateClaim { lecturer_id, month }
            }
            StoreError::VersionConflict { claim_id, .. } => WorkflowError::Conflict { claim_id },
            other => WorkflowError::Store(other.to_string()),
        }
    }
}
