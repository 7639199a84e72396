//! The atomic unit of claim persistence.

use shared_types::{Claim, ClaimItem, StatusHistoryEntry};

/// One atomic claim commit: the claim row, an optional wholesale item
/// replacement, and exactly one ledger append.
///
/// The store applies all three or none. Ids of value 0 are placeholders the
/// store replaces with fresh surrogates.
#[derive(Debug, Clone)]
pub struct ClaimMutation {
    /// The claim to insert (`id == 0`) or update.
    pub claim: Claim,
    /// Required for updates: the version the writer read. `None` only for
    /// brand-new claims.
    pub expected_version: Option<u64>,
    /// When set, the claim's items are replaced wholesale (no partial patch).
    pub replace_items: Option<Vec<ClaimItem>>,
    /// The ledger entry recording this transition.
    pub history: StatusHistoryEntry,
}

impl ClaimMutation {
    /// A mutation inserting a new claim with its items.
    #[must_use]
    pub fn insert(claim: Claim, items: Vec<ClaimItem>, history: StatusHistoryEntry) -> Self {
        Self {
            claim,
            expected_version: None,
            replace_items: Some(items),
            history,
        }
    }

    /// A mutation updating an existing claim without touching its items.
    #[must_use]
    pub fn update(claim: Claim, expected_version: u64, history: StatusHistoryEntry) -> Self {
        Self {
            claim,
            expected_version: Some(expected_version),
            replace_items: None,
            history,
        }
    }

    /// A mutation updating an existing claim and replacing its items.
    #[must_use]
    pub fn update_with_items(
        claim: Claim,
        expected_version: u64,
        items: Vec<ClaimItem>,
        history: StatusHistoryEntry,
    ) -> Self {
        Self {
            claim,
            expected_version: Some(expected_version),
            replace_items: Some(items),
            history,
        }
    }
}
