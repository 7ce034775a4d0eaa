//! Outbound message scheduling.
//!
//! Messages are queued in insertion order with an earliest send time fixed
//! at insertion by the [`FloodPolicy`]. The connection loop periodically
//! flushes whatever is due; nothing in here blocks or performs I/O.
//!
//! - [`flood`]: the pacing policy
//! - [`handle`]: the shared, cloneable front end with one method per verb

mod flood;
mod handle;

use std::time::{Duration, Instant};

use slirc_proto::command::Encodable;
use tracing::warn;

use crate::config::FloodConfig;

pub use flood::FloodPolicy;
pub use handle::QueueHandle;

/// Identifies a queued message for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// A message waiting to be sent.
#[derive(Debug)]
pub struct QueueItem {
    pub ticket: Ticket,
    pub message: Box<dyn Encodable>,
    pub not_before: Instant,
}

impl QueueItem {
    pub fn is_due(&self, now: Instant) -> bool {
        self.not_before <= now
    }
}

/// Outcome of queueing a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub ticket: Ticket,
    /// How long the message waits before it may be sent.
    pub delay: Duration,
}

impl Scheduled {
    /// Whether flood control pushed the message into the future.
    pub fn is_throttled(&self) -> bool {
        !self.delay.is_zero()
    }
}

/// Insertion-ordered outbound queue.
#[derive(Debug, Default)]
pub struct Queue {
    items: Vec<QueueItem>,
    policy: FloodPolicy,
    next_ticket: u64,
}

impl Queue {
    pub fn new(config: &FloodConfig) -> Self {
        Self {
            items: Vec::new(),
            policy: FloodPolicy::new(config),
            next_ticket: 0,
        }
    }

    /// Queue a message, computing its send time from the current depth.
    pub fn enqueue(&mut self, message: Box<dyn Encodable>) -> Scheduled {
        self.enqueue_at(message, Instant::now())
    }

    pub fn enqueue_at(&mut self, message: Box<dyn Encodable>, now: Instant) -> Scheduled {
        let not_before = self.policy.not_before(self.items.len(), now);
        let delay = not_before.saturating_duration_since(now);
        if !delay.is_zero() {
            warn!(
                queued = self.items.len() + 1,
                delay_secs = delay.as_secs(),
                "Throttling in effect"
            );
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.items.push(QueueItem {
            ticket,
            message,
            not_before,
        });
        Scheduled { ticket, delay }
    }

    /// Remove and return every due item, in insertion order.
    pub fn flush(&mut self) -> Vec<QueueItem> {
        self.flush_at(Instant::now())
    }

    pub fn flush_at(&mut self, now: Instant) -> Vec<QueueItem> {
        let (due, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.items).into_iter().partition(|item| item.is_due(now));
        self.items = waiting;
        due
    }

    /// Cancel a queued message. Returns false if it was already sent or removed.
    pub fn remove_message(&mut self, ticket: Ticket) -> bool {
        match self.items.iter().position(|item| item.ticket == ticket) {
            Some(index) => self.remove_by_index(index),
            None => false,
        }
    }

    /// Cancel the message at `index` in queue order. Out-of-range is a no-op.
    pub fn remove_by_index(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.items.remove(index);
            true
        } else {
            false
        }
    }

    /// Drop everything still queued, returning the abandoned items.
    pub fn discard(&mut self) -> Vec<QueueItem> {
        std::mem::take(&mut self.items)
    }

    pub fn set_flood_control(&mut self, enabled: bool) {
        self.policy.set_enabled(enabled);
    }

    pub fn is_flood_control_enabled(&self) -> bool {
        self.policy.is_enabled()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Earliest send time among queued items.
    pub fn next_due(&self) -> Option<Instant> {
        self.items.iter().map(|item| item.not_before).min()
    }
}
