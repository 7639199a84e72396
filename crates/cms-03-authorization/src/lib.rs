//! # cms-03-authorization
//!
//! Authorization scoping for the claim system.
//!
//! ## Role in System
//!
//! Every listing, search and aggregation query resolves a [`ClaimScope`] for
//! the acting principal *before* touching claim rows, then filters with
//! [`ClaimScope::permits`]. Search, dashboard stats and pending-approval
//! views all share this one predicate; a divergence between them is a
//! correctness bug, not a feature difference.
//!
//! - Lecturer: own claims only.
//! - Coordinator: claims billing at least one module in a programme they
//!   coordinate.
//! - Manager: all claims (pending views further restrict by stage).
//! - Admin: unrestricted.

pub mod scope;

pub use scope::{claim_programme_ids, pending_states, ClaimScope, Principal};
