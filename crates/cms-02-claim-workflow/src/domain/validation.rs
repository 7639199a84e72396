//! Structural checks on a draft before it touches the store.
//!
//! Everything here is pure: the engine layers the store-backed checks
//! (duplicate month, module assignment) on top.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared_types::{policy, ClaimMonth, WorkflowError};

use crate::domain::draft::ClaimDraft;

/// Validates the claim month and every line of a draft.
pub fn validate_draft(draft: &ClaimDraft, now: DateTime<Utc>) -> Result<(), WorkflowError> {
    validate_claim_month(draft.claim_month, now)?;

    if draft.items.is_empty() {
        return Err(WorkflowError::ValidationFailed(
            "a claim must contain at least one line item".into(),
        ));
    }

    let today = now.date_naive();
    let max_item_hours = Decimal::from(policy::MAX_HOURS_PER_ITEM);
    for (index, item) in draft.items.iter().enumerate() {
        if item.hours_worked <= Decimal::ZERO {
            return Err(WorkflowError::ValidationFailed(format!(
                "line {}: hours worked must be greater than zero",
                index + 1
            )));
        }
        if item.hours_worked > max_item_hours {
            return Err(WorkflowError::ValidationFailed(format!(
                "line {}: hours worked cannot exceed {} per line",
                index + 1,
                policy::MAX_HOURS_PER_ITEM
            )));
        }
        if item.work_date > today {
            return Err(WorkflowError::ValidationFailed(format!(
                "line {}: work date cannot be in the future",
                index + 1
            )));
        }
    }

    Ok(())
}

/// A claim month may not be in the future and may not be older than the
/// back-claim window.
pub fn validate_claim_month(month: ClaimMonth, now: DateTime<Utc>) -> Result<(), WorkflowError> {
    let current = ClaimMonth::containing(now);
    let age = month.months_until(current);
    if age < 0 {
        return Err(WorkflowError::ValidationFailed(format!(
            "claim month {month} is in the future"
        )));
    }
    if age > policy::MAX_CLAIM_AGE_MONTHS {
        return Err(WorkflowError::ValidationFailed(format!(
            "claim month {month} is older than {} months",
            policy::MAX_CLAIM_AGE_MONTHS
        )));
    }
    Ok(())
}

/// Reviewer comments on approve/reject must not be blank.
pub fn validate_comments(comments: Option<&str>) -> Result<String, WorkflowError> {
    match comments.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => Err(WorkflowError::ValidationFailed(
            "comments are required for approval and rejection decisions".into(),
        )),
    }
}
