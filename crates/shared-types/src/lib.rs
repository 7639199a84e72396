//! # Shared Types Crate
//!
//! This crate contains all domain entities, the claim status enum, the
//! calendar-month value type, policy constants and the shared error kinds.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Id Indirection**: Entities reference each other by surrogate id only;
//!   no navigation-property object graphs.
//! - **Policy In One Place**: Monetary and hour thresholds live in [`policy`]
//!   and nowhere else.

pub mod entities;
pub mod errors;
pub mod month;
pub mod policy;
pub mod status;

pub use entities::*;
pub use errors::WorkflowError;
pub use month::ClaimMonth;
pub use status::ClaimStatus;
