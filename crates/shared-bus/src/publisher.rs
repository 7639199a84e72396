//! # Notification Publisher
//!
//! Defines the publishing side of the notification bus.

use crate::events::{ClaimEvent, EventFilter};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Trait for publishing claim events to the bus.
///
/// This is the outbound notification port of the workflow engine: invoked
/// after a transition commits, never awaited for delivery confirmation.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// Returns the number of active subscribers that received the event.
    /// Zero is not an error; delivery is best-effort.
    async fn publish(&self, event: ClaimEvent) -> usize;

    /// Total number of events published since startup.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the notification bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer
/// semantics. Suitable for single-process operation; a deployment spanning
/// processes would substitute a queue-backed implementation behind the same
/// trait.
pub struct InMemoryNotificationBus {
    sender: broadcast::Sender<ClaimEvent>,
    events_published: AtomicU64,
    capacity: usize,
}

impl InMemoryNotificationBus {
    /// Create a bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a bus with the given channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(?filter, "New notification subscription");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryNotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSender for InMemoryNotificationBus {
    async fn publish(&self, event: ClaimEvent) -> usize {
        let claim_id = event.claim_id();
        let status = event.new_status();

        // Counted even when nobody is listening: the publish was attempted.
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    claim_id,
                    %status,
                    receivers = receiver_count,
                    "Claim event published"
                );
                receiver_count
            }
            Err(e) => {
                warn!(claim_id, %status, error = %e, "Claim event dropped (no receivers)");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
