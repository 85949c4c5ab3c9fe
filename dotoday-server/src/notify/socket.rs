//! Per-connection loop for the sync WebSocket.
//!
//! The socket is split into a writer task that drains the subscriber's queue
//! and a reader task that applies join/leave commands. When either side ends
//! the other is aborted and the subscriber is unregistered, which drops all
//! of its group memberships.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use super::events::ClientCommand;
use super::hub::NotificationHub;
use super::subscriber::SubscriberId;

/// Drive one sync connection until the client goes away.
pub async fn serve_socket(socket: WebSocket, hub: Arc<NotificationHub>) {
    let (subscriber, mut rx) = hub.register().await;
    let conn_id = subscriber.id;
    info!(%conn_id, "sync client connected");

    let (mut ws_tx, mut ws_rx) = socket.split();

    let mut writer = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let reader_hub = Arc::clone(&hub);
    let mut reader = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_rx.next().await {
            match msg {
                Message::Text(text) => apply_command(&reader_hub, conn_id, text.as_str()).await,
                Message::Close(_) => break,
                // axum answers pings itself
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut writer => reader.abort(),
        _ = &mut reader => writer.abort(),
    }

    hub.unregister(conn_id).await;
    info!(
        %conn_id,
        connected_secs = subscriber.age().as_secs(),
        dropped = subscriber.drop_count(),
        "sync client disconnected"
    );
}

/// Parse and apply a single client frame. Bad frames are logged and ignored.
pub(crate) async fn apply_command(hub: &NotificationHub, conn_id: SubscriberId, raw: &str) {
    let command: ClientCommand = match serde_json::from_str(raw) {
        Ok(c) => c,
        Err(e) => {
            warn!(%conn_id, error = %e, "ignoring invalid sync command");
            return;
        }
    };

    match command {
        ClientCommand::JoinListGroup { list_id } => {
            hub.join(conn_id, list_id).await;
            debug!(%conn_id, list_id, "joined list group");
        }
        ClientCommand::LeaveListGroup { list_id } => {
            hub.leave(conn_id, list_id).await;
            debug!(%conn_id, list_id, "left list group");
        }
    }
}
