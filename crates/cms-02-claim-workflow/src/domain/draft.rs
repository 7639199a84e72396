//! Caller-supplied claim content.
//!
//! A draft carries only what the lecturer types in. Hourly rates are never
//! taken from the caller; the engine snapshots them from the module catalog
//! at creation time so a later rate change cannot alter a submitted claim.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared_types::{ClaimMonth, ModuleId};

/// One line of work on a draft claim.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimItemDraft {
    pub module_id: ModuleId,
    pub hours_worked: Decimal,
    pub work_date: NaiveDate,
    pub description: Option<String>,
}

/// The content of a claim as entered by a lecturer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimDraft {
    pub claim_month: ClaimMonth,
    pub notes: Option<String>,
    pub items: Vec<ClaimItemDraft>,
}

impl ClaimDraft {
    #[must_use]
    pub fn new(claim_month: ClaimMonth, items: Vec<ClaimItemDraft>) -> Self {
        Self {
            claim_month,
            notes: None,
            items,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Total hours across all lines.
    #[must_use]
    pub fn total_hours(&self) -> Decimal {
        self.items.iter().map(|item| item.hours_worked).sum()
    }
}
