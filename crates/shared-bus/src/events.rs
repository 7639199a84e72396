//! # Claim Events
//!
//! Event payloads carried on the notification bus, and the subscriber-side
//! filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{ClaimId, ClaimStatus};
use uuid::Uuid;

/// An event emitted after a committed claim mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClaimEvent {
    /// A claim moved to a new status.
    StatusChanged {
        /// Unique event id, for consumer-side deduplication.
        event_id: Uuid,
        claim_id: ClaimId,
        claim_number: String,
        new_status: ClaimStatus,
        /// Approver/rejector comments, when the transition carried any.
        comments: Option<String>,
        occurred_at: DateTime<Utc>,
    },
}

impl ClaimEvent {
    /// Builds a status-changed event with a fresh event id.
    #[must_use]
    pub fn status_changed(
        claim_id: ClaimId,
        claim_number: impl Into<String>,
        new_status: ClaimStatus,
        comments: Option<String>,
    ) -> Self {
        Self::StatusChanged {
            event_id: Uuid::new_v4(),
            claim_id,
            claim_number: claim_number.into(),
            new_status,
            comments,
            occurred_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn claim_id(&self) -> ClaimId {
        match self {
            Self::StatusChanged { claim_id, .. } => *claim_id,
        }
    }

    #[must_use]
    pub fn new_status(&self) -> ClaimStatus {
        match self {
            Self::StatusChanged { new_status, .. } => *new_status,
        }
    }
}

/// Subscriber-side filter. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Only events for this claim, if set.
    pub claim_id: Option<ClaimId>,
    /// Only events landing in one of these statuses, if non-empty.
    pub statuses: Vec<ClaimStatus>,
}

impl EventFilter {
    /// Matches every event.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches events for a single claim.
    #[must_use]
    pub fn for_claim(claim_id: ClaimId) -> Self {
        Self {
            claim_id: Some(claim_id),
            statuses: Vec::new(),
        }
    }

    /// Matches events landing in any of the given statuses.
    #[must_use]
    pub fn statuses(statuses: Vec<ClaimStatus>) -> Self {
        Self {
            claim_id: None,
            statuses,
        }
    }

    /// Whether an event passes this filter.
    #[must_use]
    pub fn matches(&self, event: &ClaimEvent) -> bool {
        if let Some(claim_id) = self.claim_id {
            if event.claim_id() != claim_id {
                return false;
            }
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&event.new_status()) {
            return false;
        }
        true
    }
}
