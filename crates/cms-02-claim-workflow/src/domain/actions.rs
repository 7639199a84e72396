//! The transition table.
//!
//! Each action names the states it may fire from and the state it lands in.
//! Everything else about a transition (who may perform it, whether comments
//! are required) hangs off the same enum so the engine has a single source
//! of truth to consult.

use shared_types::{ClaimStatus, UserRole, WorkflowError};

/// A state-changing action on a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowAction {
    CoordinatorApprove,
    CoordinatorReject,
    ManagerApprove,
    ManagerReject,
    Cancel,
    MarkPaid,
}

impl WorkflowAction {
    /// Resolves a caller-supplied action string against the caller's role.
    ///
    /// "approve" and "reject" are stage-relative: a coordinator approving is
    /// a different transition from a manager approving. Unrecognised strings
    /// are a validation failure, and stage actions from a role with no stage
    /// are refused outright.
    pub fn parse(action: &str, role: UserRole) -> Result<Self, WorkflowError> {
        let normalized = action.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "approve" => match role {
                UserRole::Coordinator => Ok(Self::CoordinatorApprove),
                UserRole::Manager => Ok(Self::ManagerApprove),
                _ => Err(WorkflowError::Unauthorized(format!(
                    "role {role} cannot approve claims"
                ))),
            },
            "reject" => match role {
                UserRole::Coordinator => Ok(Self::CoordinatorReject),
                UserRole::Manager => Ok(Self::ManagerReject),
                _ => Err(WorkflowError::Unauthorized(format!(
                    "role {role} cannot reject claims"
                ))),
            },
            "cancel" => Ok(Self::Cancel),
            "pay" | "mark-paid" => Ok(Self::MarkPaid),
            other => Err(WorkflowError::ValidationFailed(format!(
                "unknown workflow action '{other}'"
            ))),
        }
    }

    /// States this action may legally fire from.
    #[must_use]
    pub fn valid_from(&self) -> &'static [ClaimStatus] {
        match self {
            Self::CoordinatorApprove | Self::CoordinatorReject => {
                &[ClaimStatus::Submitted, ClaimStatus::UnderCoordinatorReview]
            }
            Self::ManagerApprove | Self::ManagerReject => &[
                ClaimStatus::CoordinatorApproved,
                ClaimStatus::UnderManagerReview,
            ],
            Self::Cancel => &[
                ClaimStatus::Draft,
                ClaimStatus::CoordinatorRejected,
                ClaimStatus::ManagerRejected,
            ],
            Self::MarkPaid => &[ClaimStatus::ManagerApproved],
        }
    }

    /// The state a successful transition lands in.
    #[must_use]
    pub fn resulting_status(&self) -> ClaimStatus {
        match self {
            Self::CoordinatorApprove => ClaimStatus::CoordinatorApproved,
            Self::CoordinatorReject => ClaimStatus::CoordinatorRejected,
            Self::ManagerApprove => ClaimStatus::ManagerApproved,
            Self::ManagerReject => ClaimStatus::ManagerRejected,
            Self::Cancel => ClaimStatus::Cancelled,
            Self::MarkPaid => ClaimStatus::Paid,
        }
    }

    #[must_use]
    pub fn permitted(&self, from: ClaimStatus) -> bool {
        self.valid_from().contains(&from)
    }

    /// Approval and rejection decisions must carry reviewer comments.
    #[must_use]
    pub fn requires_comments(&self) -> bool {
        matches!(
            self,
            Self::CoordinatorApprove
                | Self::CoordinatorReject
                | Self::ManagerApprove
                | Self::ManagerReject
        )
    }

    /// Short verb for error messages and ledger notes.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::CoordinatorApprove | Self::ManagerApprove => "approve",
            Self::CoordinatorReject | Self::ManagerReject => "reject",
            Self::Cancel => "cancel",
            Self::MarkPaid => "mark paid",
        }
    }
}
