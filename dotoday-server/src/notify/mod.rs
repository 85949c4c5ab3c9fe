//! Real-time change notifications
//!
//! Services publish a [`SyncEvent`] after each committed mutation; the
//! [`NotificationHub`] fans it out to WebSocket subscribers. List events go
//! to everyone, task events only to clients that joined the list's group.

pub mod events;
pub mod hub;
pub mod socket;
pub mod subscriber;

pub use events::{ClientCommand, EventScope, SyncEvent};
pub use hub::NotificationHub;
pub use socket::serve_socket;
pub use subscriber::{Subscriber, SubscriberId};
