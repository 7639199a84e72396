//! # cms-01-claim-store
//!
//! Persistence subsystem for the claim system.
//!
//! ## Role in System
//!
//! - **Single Writer Per Claim**: every claim mutation goes through
//!   [`ClaimStore::commit`](ports::ClaimStore::commit) as one atomic unit —
//!   claim row, wholesale item replacement and exactly one ledger append
//!   succeed or fail together.
//! - **Optimistic Concurrency**: commits against an existing claim carry an
//!   expected version; a mismatch fails with `VersionConflict` and writes
//!   nothing.
//! - **Ledger Append-Only**: status history rows are only ever added, one per
//!   committed transition.
//!
//! The in-memory adapter backs tests and single-process runs; a relational
//! adapter would implement the same ports.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
