//! # Claim Month
//!
//! Calendar-month value type. Claims are billed at month granularity and the
//! duplicate-claim constraint is keyed on (lecturer, month).

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A calendar month, e.g. `2024-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClaimMonth {
    year: i32,
    /// 1..=12
    month: u32,
}

impl ClaimMonth {
    /// Creates a claim month, rejecting out-of-range month numbers.
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("month must be 1..=12, got {month}"));
        }
        if !(2000..=2100).contains(&year) {
            return Err(format!("year {year} outside supported range"));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given instant.
    #[must_use]
    pub fn containing(instant: DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.month
    }

    /// Absolute month index, for distance arithmetic across year boundaries.
    #[must_use]
    pub fn index(self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }

    /// How many whole months `self` lies before `other` (negative if after).
    #[must_use]
    pub fn months_until(self, other: Self) -> i32 {
        other.index() - self.index()
    }
}

impl std::fmt::Display for ClaimMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for ClaimMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got {s:?}"))?;
        let year: i32 = year.parse().map_err(|_| format!("bad year in {s:?}"))?;
        let month: u32 = month.parse().map_err(|_| format!("bad month in {s:?}"))?;
        Self::new(year, month)
    }
}
