//! WebSocket endpoint for the relay.

use std::future::Future;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::config::RelayConfig;
use super::connection::Connection;
use super::protocol::ServerMessage;
use super::registry::SessionRegistry;

/// Build the relay routes: `/ws` and `/` upgrade to WebSocket, `/healthz`
/// answers `ok`.
pub fn router(registry: Arc<SessionRegistry>) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/ws", get(ws_handler))
        .route("/", get(ws_handler))
        .with_state(registry)
}

async fn health() -> &'static str {
    "ok"
}

async fn ws_handler(
    State(registry): State<Arc<SessionRegistry>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(registry, socket))
}

async fn handle_socket(registry: Arc<SessionRegistry>, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (outbox, mut queue) = mpsc::unbounded_channel::<ServerMessage>();

    let mut connection = Connection::open(registry, outbox);
    let id = connection.id();
    debug!(connection = id, "connected");

    // Forward queued messages to the socket in order.
    let writer = tokio::spawn(async move {
        while let Some(message) = queue.recv().await {
            let text = match message.to_json() {
                Ok(text) => text,
                Err(err) => {
                    warn!(connection = id, %err, "dropping unencodable message");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(frame)) = ws_rx.next().await {
        match frame {
            Message::Text(text) => {
                if let Err(err) = connection.handle_text(text.as_str()) {
                    debug!(connection = id, %err, "message dropped");
                }
            }
            Message::Close(_) => break,
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    drop(connection);
    writer.abort();
    debug!(connection = id, "disconnected");
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// The registry is cleared once the server has stopped.
pub async fn serve_on(
    listener: TcpListener,
    registry: Arc<SessionRegistry>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "relay listening");

    axum::serve(listener, router(registry.clone()))
        .with_graceful_shutdown(shutdown)
        .await?;

    registry.clear();
    info!("relay stopped");
    Ok(())
}

/// Bind `config.addr()` and serve until `shutdown` resolves.
pub async fn serve(
    config: RelayConfig,
    registry: Arc<SessionRegistry>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    serve_on(listener, registry, shutdown).await
}
