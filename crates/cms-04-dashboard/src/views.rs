//! View models assembled by the dashboard service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{Claim, ClaimItem, ClaimStatus, Document, UserId};

/// Reviewer queue priority, derived from how long a claim has waited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// High after a week, medium after three days, low otherwise.
    #[must_use]
    pub fn from_days_pending(days: i64) -> Self {
        if days > 7 {
            Self::High
        } else if days > 3 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Headline numbers for a lecturer's own dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_claims: usize,
    pub pending_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
    /// Sum of finally-approved and paid claim amounts.
    pub total_earned: Decimal,
    /// Zero when there are no claims.
    pub average_claim_amount: Decimal,
}

/// One row in a reviewer's pending queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    pub claim: Claim,
    pub lecturer_name: String,
    pub days_pending: i64,
    pub priority: Priority,
    pub has_required_documents: bool,
}

/// One entry in the claim detail timeline, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub changed_at: DateTime<Utc>,
    pub previous_status: ClaimStatus,
    pub new_status: ClaimStatus,
    pub actor_name: String,
    pub comments: String,
    pub system_notes: String,
}

/// Where a tracker step stands for a given claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepState {
    Complete,
    Current,
    Pending,
    Failed,
}

/// One of the four fixed steps in the approval tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerStep {
    pub label: &'static str,
    pub state: StepState,
}

/// The full claim detail view: the claim, its lines and documents, the
/// ledger rendered as a timeline, and progress indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDetailView {
    pub claim: Claim,
    pub lecturer_name: String,
    pub items: Vec<ClaimItem>,
    pub documents: Vec<Document>,
    pub timeline: Vec<TimelineEntry>,
    pub progress_percent: u8,
    pub current_stage: &'static str,
    pub tracker: Vec<TrackerStep>,
}

/// How far through the workflow a status is, for the progress bar.
/// Rejections and cancellation reset to zero.
#[must_use]
pub fn progress_percent(status: ClaimStatus) -> u8 {
    match status {
        ClaimStatus::Draft => 0,
        ClaimStatus::Submitted => 25,
        ClaimStatus::UnderCoordinatorReview => 40,
        ClaimStatus::CoordinatorApproved => 60,
        ClaimStatus::UnderManagerReview => 75,
        ClaimStatus::ManagerApproved => 90,
        ClaimStatus::Paid => 100,
        ClaimStatus::CoordinatorRejected
        | ClaimStatus::ManagerRejected
        | ClaimStatus::Cancelled => 0,
    }
}

/// Human label for the stage the claim currently sits in.
#[must_use]
pub fn current_stage(status: ClaimStatus) -> &'static str {
    match status {
        ClaimStatus::Draft => "Draft",
        ClaimStatus::Submitted | ClaimStatus::UnderCoordinatorReview => {
            "Awaiting Coordinator Review"
        }
        ClaimStatus::CoordinatorApproved | ClaimStatus::UnderManagerReview => {
            "Awaiting Manager Review"
        }
        ClaimStatus::ManagerApproved => "Awaiting Payment",
        ClaimStatus::Paid => "Paid",
        ClaimStatus::CoordinatorRejected => "Rejected by Coordinator",
        ClaimStatus::ManagerRejected => "Rejected by Manager",
        ClaimStatus::Cancelled => "Cancelled",
    }
}

/// Builds the four-step tracker for a status.
#[must_use]
pub fn tracker_steps(status: ClaimStatus) -> Vec<TrackerStep> {
    use ClaimStatus as S;
    use StepState as St;

    // (submitted, coordinator, manager, payment)
    let states = match status {
        S::Draft => (St::Current, St::Pending, St::Pending, St::Pending),
        S::Submitted | S::UnderCoordinatorReview => {
            (St::Complete, St::Current, St::Pending, St::Pending)
        }
        S::CoordinatorApproved | S::UnderManagerReview => {
            (St::Complete, St::Complete, St::Current, St::Pending)
        }
        S::ManagerApproved => (St::Complete, St::Complete, St::Complete, St::Current),
        S::Paid => (St::Complete, St::Complete, St::Complete, St::Complete),
        S::CoordinatorRejected => (St::Complete, St::Failed, St::Pending, St::Pending),
        S::ManagerRejected => (St::Complete, St::Complete, St::Failed, St::Pending),
        S::Cancelled => (St::Failed, St::Pending, St::Pending, St::Pending),
    };

    vec![
        TrackerStep {
            label: "Submitted",
            state: states.0,
        },
        TrackerStep {
            label: "Coordinator Review",
            state: states.1,
        },
        TrackerStep {
            label: "Manager Review",
            state: states.2,
        },
        TrackerStep {
            label: "Payment",
            state: states.3,
        },
    ]
}

/// Search filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimSearchFilter {
    /// Case-insensitive match against claim number and lecturer name.
    pub term: Option<String>,
    pub status: Option<ClaimStatus>,
    pub submitted_from: Option<DateTime<Utc>>,
    pub submitted_to: Option<DateTime<Utc>>,
    pub lecturer_id: Option<UserId>,
}

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimSortKey {
    /// Newest submissions first.
    #[default]
    SubmissionDateDesc,
    SubmissionDateAsc,
    AmountDesc,
    ClaimNumber,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> PagedResult<T> {
    #[must_use]
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }
}

/// A search result row: the claim plus its lecturer's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub claim: Claim,
    pub lecturer_name: String,
}

/// Workload numbers for a coordinator or manager.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewerStatistics {
    pub approved_this_month: usize,
    pub rejected_this_month: usize,
    pub pending_count: usize,
    pub pending_amount: Decimal,
    /// Pending claims that have waited past the stage's service window.
    pub overdue_count: usize,
}
