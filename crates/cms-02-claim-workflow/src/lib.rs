//! Claim lifecycle state machine.
//!
//! Every state change goes through one engine: preconditions are validated
//! against the transition table, the change and its ledger entry are committed
//! atomically through the store, and a notification is published afterwards.
//! A failed publish never rolls back a committed transition.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::*;
