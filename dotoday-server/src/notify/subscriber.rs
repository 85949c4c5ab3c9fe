//! Sync channel subscriber handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use uuid::Uuid;

/// Connection identifier assigned at registration.
pub type SubscriberId = Uuid;

/// A connected sync client, as seen by the hub.
pub struct Subscriber {
    pub id: SubscriberId,
    /// Bounded queue drained by the client's socket writer.
    tx: mpsc::Sender<String>,
    connected_at: Instant,
    dropped_messages: AtomicU64,
}

impl Subscriber {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx,
            connected_at: Instant::now(),
            dropped_messages: AtomicU64::new(0),
        }
    }

    /// Queue a frame for the client without waiting.
    ///
    /// Returns `false` if the queue is full or the writer is gone, and
    /// increments the dropped message counter.
    pub fn send(&self, message: String) -> bool {
        if self.tx.try_send(message).is_ok() {
            true
        } else {
            self.dropped_messages.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    pub fn drop_count(&self) -> u64 {
        self.dropped_messages.load(Ordering::Relaxed)
    }

    pub fn age(&self) -> Duration {
        self.connected_at.elapsed()
    }
}
