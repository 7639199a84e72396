//! # Policy Constants
//!
//! Institutional thresholds used by the workflow engine, the verification
//! checks and the dashboard. Defined once here; every consumer converts to
//! [`rust_decimal::Decimal`] at the comparison site.

/// Maximum total hours a lecturer may bill in one claim month before the
/// advisory policy-breach warning fires.
pub const MAX_HOURS_PER_MONTH: u32 = 180;

/// Claim amounts above this require a manual audit flag.
pub const AUDIT_THRESHOLD: u32 = 50_000;

/// Claims above this amount must carry at least one supporting document.
pub const DOCUMENT_REQUIRED_THRESHOLD: u32 = 10_000;

/// Per-item hours cap enforced at submission time (hard validation, unlike
/// the advisory monthly cap above).
pub const MAX_HOURS_PER_ITEM: u32 = 200;

/// Oldest claim month accepted at submission, in whole months before now.
pub const MAX_CLAIM_AGE_MONTHS: i32 = 3;
