//! # Notification Subscriber
//!
//! Defines the subscription side of the notification bus.

use crate::events::{ClaimEvent, EventFilter};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The notification bus was closed.
    #[error("Notification bus closed")]
    Closed,
}

/// A subscription handle for receiving claim events.
pub struct Subscription {
    receiver: broadcast::Receiver<ClaimEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<ClaimEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next event matching the filter.
    ///
    /// Returns `None` once the bus is dropped. Lagged events are skipped: the
    /// bus is at-most-once by contract.
    pub async fn recv(&mut self) -> Option<ClaimEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, events dropped");
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Try to receive the next matching event without blocking.
    pub fn try_recv(&mut self) -> Result<Option<ClaimEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
        }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}
