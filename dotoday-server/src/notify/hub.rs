//! Change-event fan-out to connected sync clients.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};

use super::events::{EventScope, SyncEvent};
use super::subscriber::{Subscriber, SubscriberId};

/// Per-subscriber outbound queue length.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Owns the set of live subscribers and their list-group memberships.
///
/// Delivery is fire-and-forget: a slow or dead subscriber loses the event
/// and nobody else notices.
pub struct NotificationHub {
    state: RwLock<HubState>,
    queue_capacity: usize,
}

#[derive(Default)]
struct HubState {
    subscribers: HashMap<SubscriberId, Arc<Subscriber>>,
    /// list id -> members; empty groups are removed.
    groups: HashMap<i64, HashSet<SubscriberId>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::with_queue_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_queue_capacity(queue_capacity: usize) -> Self {
        Self {
            state: RwLock::new(HubState::default()),
            queue_capacity,
        }
    }

    /// Add a subscriber and hand back the receiving end of its queue.
    pub async fn register(&self) -> (Arc<Subscriber>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        let subscriber = Arc::new(Subscriber::new(tx));

        let mut state = self.state.write().await;
        state
            .subscribers
            .insert(subscriber.id, Arc::clone(&subscriber));

        (subscriber, rx)
    }

    /// Remove a subscriber and every group membership it holds.
    pub async fn unregister(&self, id: SubscriberId) {
        let mut state = self.state.write().await;
        state.subscribers.remove(&id);
        state.groups.retain(|_, members| {
            members.remove(&id);
            !members.is_empty()
        });
    }

    /// Add a subscriber to a list's group. Joining twice is a no-op.
    ///
    /// Returns `false` if the subscriber is not registered.
    pub async fn join(&self, id: SubscriberId, list_id: i64) -> bool {
        let mut state = self.state.write().await;
        if !state.subscribers.contains_key(&id) {
            return false;
        }
        state.groups.entry(list_id).or_default().insert(id);
        true
    }

    /// Remove a subscriber from a list's group. Leaving a group the
    /// subscriber is not in is a no-op.
    pub async fn leave(&self, id: SubscriberId, list_id: i64) {
        let mut state = self.state.write().await;
        if let Some(members) = state.groups.get_mut(&list_id) {
            members.remove(&id);
            if members.is_empty() {
                state.groups.remove(&list_id);
            }
        }
    }

    /// Route an event by its scope. Returns how many subscribers it was
    /// queued for.
    pub async fn publish(&self, event: &SyncEvent) -> usize {
        match event.scope() {
            EventScope::All => self.broadcast_all(event).await,
            EventScope::List(list_id) => self.broadcast_to_list(list_id, event).await,
        }
    }

    /// Send an event to every subscriber.
    pub async fn broadcast_all(&self, event: &SyncEvent) -> usize {
        let Some(json) = encode(event) else {
            return 0;
        };
        let state = self.state.read().await;
        debug!(
            event_type = event.name(),
            recipients = state.subscribers.len(),
            "broadcast event to all"
        );
        deliver(event, &json, state.subscribers.values())
    }

    /// Send an event to the members of one list's group.
    pub async fn broadcast_to_list(&self, list_id: i64, event: &SyncEvent) -> usize {
        let Some(json) = encode(event) else {
            return 0;
        };
        let state = self.state.read().await;
        let Some(members) = state.groups.get(&list_id) else {
            debug!(event_type = event.name(), list_id, "no subscribers in group");
            return 0;
        };
        debug!(
            event_type = event.name(),
            list_id,
            recipients = members.len(),
            "broadcast event to group"
        );
        let subscribers = members.iter().filter_map(|id| state.subscribers.get(id));
        deliver(event, &json, subscribers)
    }

    pub async fn subscriber_count(&self) -> usize {
        self.state.read().await.subscribers.len()
    }

    /// Number of subscribers currently in a list's group.
    pub async fn group_size(&self, list_id: i64) -> usize {
        self.state
            .read()
            .await
            .groups
            .get(&list_id)
            .map_or(0, HashSet::len)
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(event: &SyncEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(event_type = event.name(), error = %e, "failed to serialize event");
            None
        }
    }
}

fn deliver<'a>(
    event: &SyncEvent,
    json: &str,
    subscribers: impl Iterator<Item = &'a Arc<Subscriber>>,
) -> usize {
    let mut delivered = 0;
    for sub in subscribers {
        if sub.send(json.to_owned()) {
            delivered += 1;
        } else {
            warn!(
                conn_id = %sub.id,
                event_type = event.name(),
                dropped = sub.drop_count(),
                "failed to queue event for subscriber"
            );
        }
    }
    delivered
}
