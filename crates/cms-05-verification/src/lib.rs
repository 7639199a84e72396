//! Advisory claim verification.
//!
//! Checks run against committed claims and produce human-readable findings.
//! A finding never blocks or mutates the workflow; reviewers read them
//! alongside the claim. In particular, rate drift between an item's
//! snapshotted rate and the module's current canonical rate is reported
//! here rather than treated as corruption.

pub mod verifier;

pub use verifier::*;
