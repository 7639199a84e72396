//! # Error Types
//!
//! The shared error kinds surfaced by claim mutations. Every kind maps to a
//! distinct user-visible failure; read-only views degrade to empty results
//! instead of raising these.

use crate::entities::{ClaimId, UserId};
use crate::month::ClaimMonth;
use crate::status::ClaimStatus;
use thiserror::Error;

/// Errors raised by claim mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    /// Referenced claim/user/module does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    /// The requested transition is not legal from the claim's current status.
    #[error("cannot {action} a claim in status {status}")]
    InvalidState {
        action: &'static str,
        status: ClaimStatus,
    },

    /// Actor role or ownership does not permit the action.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// Input failed a submission or boundary check.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// A non-cancelled claim already exists for this lecturer and month.
    #[error("lecturer {lecturer_id} already has a claim for {month}")]
    DuplicateClaim { lecturer_id: UserId, month: ClaimMonth },

    /// Concurrent modification detected (version check failed).
    #[error("concurrent modification detected for claim {claim_id}")]
    Conflict { claim_id: ClaimId },

    /// Backend storage failure.
    #[error("store error: {0}")]
    Store(String),
}
