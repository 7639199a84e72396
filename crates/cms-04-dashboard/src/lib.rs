//! Role-scoped dashboards.
//!
//! Everything in this crate is a read model: no method here ever mutates a
//! claim. Scoping goes through the same predicate the rest of the system
//! uses, so a search result and a pending queue can never disagree about
//! what a principal may see. Read paths degrade to empty results on store
//! failure instead of surfacing errors.

pub mod service;
pub mod views;

pub use service::*;
pub use views::*;
