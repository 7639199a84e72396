//! The claim visibility predicate and per-role pending stages.

use cms_01_claim_store::{CatalogStore, StoreError};
use serde::{Deserialize, Serialize};
use shared_types::{Claim, ClaimItem, ClaimStatus, ProgrammeId, UserId, UserRole};
use std::collections::BTreeSet;
use tracing::debug;

/// A resolved (user, role) pair handed in by the surrounding service.
/// Authentication happened elsewhere; the core never sees credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Principal {
    #[must_use]
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

/// What a principal may see. Derived once per request, then applied to every
/// claim row before result assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimScope {
    /// Admin and manager listing scope: no ownership filter.
    Unrestricted,
    /// Lecturer scope: own claims only.
    OwnClaims(UserId),
    /// Coordinator scope: claims touching these programmes.
    Programmes(BTreeSet<ProgrammeId>),
}

impl ClaimScope {
    /// Resolves the scope for a principal. Coordinator scope materializes the
    /// programme set once so row filtering stays cheap.
    pub fn for_principal(
        principal: Principal,
        catalog: &dyn CatalogStore,
    ) -> Result<Self, StoreError> {
        match principal.role {
            UserRole::Lecturer => Ok(Self::OwnClaims(principal.user_id)),
            UserRole::Coordinator => {
                let programmes: BTreeSet<ProgrammeId> = catalog
                    .programmes_for_coordinator(principal.user_id)?
                    .into_iter()
                    .map(|p| p.id)
                    .collect();
                debug!(
                    coordinator_id = principal.user_id,
                    programmes = programmes.len(),
                    "materialized coordinator scope"
                );
                Ok(Self::Programmes(programmes))
            }
            UserRole::Manager | UserRole::Admin => Ok(Self::Unrestricted),
        }
    }

    /// Whether the scope admits a claim. `item_programmes` are the programme
    /// ids billed by the claim's items (see [`claim_programme_ids`]).
    #[must_use]
    pub fn permits(&self, claim: &Claim, item_programmes: &[ProgrammeId]) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::OwnClaims(lecturer_id) => claim.lecturer_id == *lecturer_id,
            Self::Programmes(programmes) => {
                item_programmes.iter().any(|p| programmes.contains(p))
            }
        }
    }

    /// Whether the scope covers *every* given programme. Coordinator
    /// approvals demand full coverage, not just overlap.
    #[must_use]
    pub fn covers_all(&self, item_programmes: &[ProgrammeId]) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::OwnClaims(_) => false,
            Self::Programmes(programmes) => {
                !item_programmes.is_empty()
                    && item_programmes.iter().all(|p| programmes.contains(p))
            }
        }
    }
}

/// The statuses a role may act on in its pending-approval queue.
#[must_use]
pub fn pending_states(role: UserRole) -> &'static [ClaimStatus] {
    match role {
        UserRole::Coordinator => &[
            ClaimStatus::Submitted,
            ClaimStatus::UnderCoordinatorReview,
        ],
        UserRole::Manager => &[
            ClaimStatus::CoordinatorApproved,
            ClaimStatus::UnderManagerReview,
        ],
        UserRole::Lecturer | UserRole::Admin => &[],
    }
}

/// Distinct programme ids billed by a claim's items.
pub fn claim_programme_ids(
    catalog: &dyn CatalogStore,
    items: &[ClaimItem],
) -> Result<Vec<ProgrammeId>, StoreError> {
    let mut programmes = BTreeSet::new();
    for item in items {
        if let Some(module) = catalog.module(item.module_id)? {
            programmes.insert(module.programme_id);
        }
    }
    Ok(programmes.into_iter().collect())
}
