//! # Claim Status
//!
//! The lifecycle state of a claim. Transition legality is owned by the
//! workflow engine; this module only defines the states and their
//! classifications.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a claim.
///
/// ```text
/// Draft → Submitted → UnderCoordinatorReview → CoordinatorApproved
///       → UnderManagerReview → ManagerApproved → Paid
/// ```
///
/// Rejection branches: `CoordinatorRejected` (re-editable), `ManagerRejected`.
/// `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Draft,
    Submitted,
    UnderCoordinatorReview,
    CoordinatorApproved,
    CoordinatorRejected,
    UnderManagerReview,
    ManagerApproved,
    ManagerRejected,
    Paid,
    Cancelled,
}

impl ClaimStatus {
    /// States in which the owning lecturer may edit and resubmit.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::CoordinatorRejected)
    }

    /// States counted as "pending" in dashboards: somewhere in the approval
    /// pipeline, not yet decided by the manager.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            Self::Submitted
                | Self::UnderCoordinatorReview
                | Self::UnderManagerReview
                | Self::CoordinatorApproved
        )
    }

    /// Fully approved: past the manager stage (including already paid).
    #[must_use]
    pub fn is_approved(self) -> bool {
        matches!(self, Self::ManagerApproved | Self::Paid)
    }

    /// Rejected at either stage.
    #[must_use]
    pub fn is_rejected(self) -> bool {
        matches!(self, Self::CoordinatorRejected | Self::ManagerRejected)
    }

    /// No further transitions are possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Human-readable label with spaces, for UI and ledger rendering.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::UnderCoordinatorReview => "Under Coordinator Review",
            Self::CoordinatorApproved => "Coordinator Approved",
            Self::CoordinatorRejected => "Coordinator Rejected",
            Self::UnderManagerReview => "Under Manager Review",
            Self::ManagerApproved => "Manager Approved",
            Self::ManagerRejected => "Manager Rejected",
            Self::Paid => "Paid",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
