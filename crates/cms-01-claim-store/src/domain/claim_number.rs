//! Claim number formatting.
//!
//! `CLM-{year}-{sequence:04}` is a bit-exact external contract consumed by
//! reports and the UI. The sequence restarts each year: next = max existing
//! sequence for the year + 1.

/// Formats a claim number from its year and sequence.
#[must_use]
pub fn format_claim_number(year: i32, sequence: u32) -> String {
    format!("CLM-{year}-{sequence:04}")
}

/// Parses a claim number back into (year, sequence). Returns `None` for
/// anything that does not match the contract.
#[must_use]
pub fn parse_claim_number(claim_number: &str) -> Option<(i32, u32)> {
    let rest = claim_number.strip_prefix("CLM-")?;
    let (year, seq) = rest.split_once('-')?;
    if seq.len() < 4 || !seq.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((year.parse().ok()?, seq.parse().ok()?))
}
