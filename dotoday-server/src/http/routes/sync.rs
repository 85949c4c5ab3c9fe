//! WebSocket endpoint for change notifications

use std::sync::Arc;

use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
    routing::get,
    Router,
};

use crate::http::server::AppState;
use crate::notify::serve_socket;

/// GET /hubs/sync - upgrade to a sync connection
async fn sync_socket(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    let hub = Arc::clone(&state.hub);
    ws.on_upgrade(move |socket| serve_socket(socket, hub))
}

/// Sync routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/hubs/sync", get(sync_socket))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::db::test_pool;

    #[tokio::test]
    async fn plain_get_is_rejected() {
        let app = router().with_state(Arc::new(AppState::new(test_pool().await)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/hubs/sync")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
