//! Relay behaviour through `Connection`, plus the axum router and real
//! WebSocket clients against a live server.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tower::ServiceExt;

use memory_match::relay::{router, serve_on, Connection, ServerMessage, SessionRegistry};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

type Inbox = mpsc::UnboundedReceiver<ServerMessage>;

fn connect(registry: &Arc<SessionRegistry>) -> (Connection, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Connection::open(registry.clone(), tx), rx)
}

fn join(conn: &mut Connection, game: &str, player: &str) {
    let text = format!(r#"{{"type":"join","gameId":"{game}","playerId":"{player}"}}"#);
    conn.handle_text(&text).unwrap();
}

#[test]
fn test_move_reaches_others_but_not_sender() {
    let registry = Arc::new(SessionRegistry::new());
    let (mut a, mut a_inbox) = connect(&registry);
    let (mut b, mut b_inbox) = connect(&registry);
    let (mut c, mut c_inbox) = connect(&registry);
    join(&mut a, "g1", "alice");
    join(&mut b, "g1", "bob");
    join(&mut c, "g2", "carol");

    a.handle_text(r#"{"type":"move","tileIndex":3}"#).unwrap();

    let received = b_inbox.try_recv().unwrap();
    assert_eq!(
        received,
        ServerMessage::Move {
            player_id: "alice".into(),
            tile_index: json!(3)
        }
    );
    assert_eq!(
        received.to_json().unwrap(),
        r#"{"type":"move","playerId":"alice","tileIndex":3}"#
    );
    assert!(a_inbox.try_recv().is_err());
    assert!(c_inbox.try_recv().is_err());

    // Other sessions are untouched in the other direction too.
    c.handle_text(r#"{"type":"move","tileIndex":0}"#).unwrap();
    assert!(a_inbox.try_recv().is_err());
    assert!(b_inbox.try_recv().is_err());
}

#[test]
fn test_match_forwarded_in_send_order() {
    let registry = Arc::new(SessionRegistry::new());
    let (mut a, _a_inbox) = connect(&registry);
    let (mut b, mut b_inbox) = connect(&registry);
    join(&mut a, "g1", "alice");
    join(&mut b, "g1", "bob");

    a.handle_text(r#"{"type":"move","tileIndex":3}"#).unwrap();
    a.handle_text(r#"{"type":"move","tileIndex":7}"#).unwrap();
    a.handle_text(r#"{"type":"match","tiles":[3,7]}"#).unwrap();

    let mut inbox = Vec::new();
    while let Ok(message) = b_inbox.try_recv() {
        inbox.push(message);
    }
    assert_eq!(
        inbox,
        vec![
            ServerMessage::Move {
                player_id: "alice".into(),
                tile_index: json!(3)
            },
            ServerMessage::Move {
                player_id: "alice".into(),
                tile_index: json!(7)
            },
            ServerMessage::Match {
                player_id: "alice".into(),
                tiles: json!([3, 7])
            },
        ]
    );
}

#[test]
fn test_malformed_message_keeps_connection_usable() {
    let registry = Arc::new(SessionRegistry::new());
    let (mut a, _a_inbox) = connect(&registry);
    let (mut b, mut b_inbox) = connect(&registry);
    join(&mut a, "g1", "alice");
    join(&mut b, "g1", "bob");

    for bad in [
        "not json",
        r#"{"type":"shuffle"}"#,
        r#"{"type":"move"}"#,
        r#"{"type":"join","gameId":"g1"}"#,
    ] {
        assert!(a.handle_text(bad).is_err(), "{bad} should be rejected");
    }
    assert!(b_inbox.try_recv().is_err());
    assert_eq!(a.game_id(), Some("g1"));

    a.handle_text(r#"{"type":"move","tileIndex":1}"#).unwrap();
    assert!(b_inbox.try_recv().is_ok());
}

#[test]
fn test_payload_relayed_verbatim_whatever_its_shape() {
    let registry = Arc::new(SessionRegistry::new());
    let (mut a, _a_inbox) = connect(&registry);
    let (mut b, mut b_inbox) = connect(&registry);
    join(&mut a, "g1", "alice");
    join(&mut b, "g1", "bob");

    a.handle_text(r#"{"type":"move","tileIndex":"3"}"#).unwrap();
    a.handle_text(r#"{"type":"match","tiles":[[0,1]]}"#).unwrap();

    assert_eq!(
        b_inbox.try_recv().unwrap().to_json().unwrap(),
        r#"{"type":"move","playerId":"alice","tileIndex":"3"}"#
    );
    assert_eq!(
        b_inbox.try_recv().unwrap().to_json().unwrap(),
        r#"{"type":"match","playerId":"alice","tiles":[[0,1]]}"#
    );
}

#[test]
fn test_last_disconnect_discards_session() {
    let registry = Arc::new(SessionRegistry::new());
    let (mut a, _a_inbox) = connect(&registry);
    let (mut b, mut b_inbox) = connect(&registry);
    join(&mut a, "g1", "alice");
    join(&mut b, "g1", "bob");
    assert_eq!(registry.member_count("g1"), 2);

    drop(a);
    assert_eq!(registry.member_count("g1"), 1);
    assert_eq!(registry.session_count(), 1);

    drop(b);
    assert_eq!(registry.session_count(), 0);
    // The registry's copy of b's outbox is gone with the session.
    assert!(b_inbox.try_recv().is_err());
}

#[test]
fn test_same_game_id_after_discard_starts_fresh() {
    let registry = Arc::new(SessionRegistry::new());
    let (mut a, _a_inbox) = connect(&registry);
    join(&mut a, "g1", "alice");
    drop(a);

    let (mut b, _b_inbox) = connect(&registry);
    join(&mut b, "g1", "bob");
    assert_eq!(registry.member_count("g1"), 1);
}

#[tokio::test]
async fn test_health_check() {
    let app = router(Arc::new(SessionRegistry::new()));

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"ok");
}

async fn send_text(ws: &mut WsStream, text: &str) {
    ws.send(Message::text(text.to_owned())).await.unwrap();
}

/// Poll the registry until `check` holds; connections are handled on their
/// own tasks and nothing is acknowledged.
async fn wait_for(registry: &SessionRegistry, check: impl Fn(&SessionRegistry) -> bool) {
    timeout(Duration::from_secs(5), async {
        while !check(registry) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("registry never reached the expected state");
}

#[tokio::test]
async fn test_websocket_clients_relay_moves() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let registry = Arc::new(SessionRegistry::new());
    let (stop, stopped) = oneshot::channel::<()>();

    let server = tokio::spawn(serve_on(listener, registry.clone(), async {
        let _ = stopped.await;
    }));

    // Both endpoints upgrade.
    let (mut a, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    let (mut b, _) = connect_async(format!("ws://{addr}/")).await.unwrap();

    send_text(&mut a, r#"{"type":"join","gameId":"g1","playerId":"A"}"#).await;
    send_text(&mut b, r#"{"type":"join","gameId":"g1","playerId":"B"}"#).await;
    wait_for(&registry, |r| r.member_count("g1") == 2).await;

    // Garbage is dropped without closing the socket.
    send_text(&mut a, "not json").await;
    send_text(&mut a, r#"{"type":"move","tileIndex":4}"#).await;

    let frame = timeout(Duration::from_secs(5), b.next())
        .await
        .expect("B receives the move")
        .unwrap()
        .unwrap();
    assert_eq!(
        frame.to_text().unwrap(),
        r#"{"type":"move","playerId":"A","tileIndex":4}"#
    );
    assert!(timeout(Duration::from_millis(200), a.next()).await.is_err());

    a.close(None).await.unwrap();
    b.close(None).await.unwrap();
    wait_for(&registry, |r| r.session_count() == 0).await;

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}
