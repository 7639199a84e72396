//! # Shared Bus Crate
//!
//! The notification collaborator of the claim system. The workflow engine
//! publishes a [`ClaimEvent`] after every committed status transition;
//! downstream consumers (mailers, dashboards, audit sinks) subscribe with a
//! filter.
//!
//! ## Delivery Contract
//!
//! - **Fire-and-forget**: `publish` returns the receiver count and never
//!   blocks on consumers. A publish with zero receivers is logged and
//!   dropped.
//! - **At-most-once**: lagging subscribers lose events; nothing is replayed.
//! - **Never transactional**: a failed publish must not roll back the state
//!   transition that produced it.

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{ClaimEvent, EventFilter};
pub use publisher::{InMemoryNotificationBus, NotificationSender};
pub use subscriber::{Subscription, SubscriptionError};

/// Default broadcast channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;
