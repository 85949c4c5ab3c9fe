//! Wire types for the sync channel.
//!
//! Frames are JSON objects tagged by `type`:
//!
//! ```text
//! server -> client  {"type":"TaskCreated","listId":5,"taskId":12}
//! client -> server  {"type":"joinListGroup","listId":5}
//! ```

use serde::{Deserialize, Serialize};

/// Change notification pushed to subscribers after a mutation commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SyncEvent {
    #[serde(rename_all = "camelCase")]
    ListCreated { list_id: i64 },

    #[serde(rename_all = "camelCase")]
    ListUpdated { list_id: i64 },

    #[serde(rename_all = "camelCase")]
    ListDeleted { list_id: i64 },

    #[serde(rename_all = "camelCase")]
    TaskCreated { list_id: i64, task_id: i64 },

    #[serde(rename_all = "camelCase")]
    TaskUpdated { list_id: i64, task_id: i64 },
}

/// Who receives an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    /// Every connected subscriber.
    All,
    /// Only subscribers that joined this list's group.
    List(i64),
}

impl SyncEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListCreated { .. } => "ListCreated",
            Self::ListUpdated { .. } => "ListUpdated",
            Self::ListDeleted { .. } => "ListDeleted",
            Self::TaskCreated { .. } => "TaskCreated",
            Self::TaskUpdated { .. } => "TaskUpdated",
        }
    }

    pub fn list_id(&self) -> i64 {
        match *self {
            Self::ListCreated { list_id }
            | Self::ListUpdated { list_id }
            | Self::ListDeleted { list_id }
            | Self::TaskCreated { list_id, .. }
            | Self::TaskUpdated { list_id, .. } => list_id,
        }
    }

    /// List events go to everyone, task events only to the list's group.
    pub fn scope(&self) -> EventScope {
        match self {
            Self::ListCreated { .. } | Self::ListUpdated { .. } | Self::ListDeleted { .. } => {
                EventScope::All
            }
            Self::TaskCreated { list_id, .. } | Self::TaskUpdated { list_id, .. } => {
                EventScope::List(*list_id)
            }
        }
    }
}

/// Command sent by a client over the sync channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientCommand {
    #[serde(rename_all = "camelCase")]
    JoinListGroup { list_id: i64 },

    #[serde(rename_all = "camelCase")]
    LeaveListGroup { list_id: i64 },
}
