use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tungstenite::protocol::Message as WsMessage;

use crate::board::Board;
use crate::board::message::Submission;
use crate::config::Settings;
use crate::hub::Hub;
use crate::transport::http::{HttpState, serve_http};
use crate::transport::message::ServerMessage;
use crate::transport::websocket::serve_websocket;

type Ws = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_board() -> (Board, SocketAddr, SocketAddr) {
    let board = Board::with_json(Hub::spawn());

    let ws_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let ws_addr = ws_listener.local_addr().unwrap();
    tokio::spawn(serve_websocket(ws_listener, board.clone(), 16));

    let http_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let http_addr = http_listener.local_addr().unwrap();
    let state = HttpState {
        board: board.clone(),
        settings: Settings::default(),
    };
    tokio::spawn(serve_http(http_listener, state));

    (board, ws_addr, http_addr)
}

async fn next_snapshot(ws: &mut Ws) -> Vec<crate::board::Message> {
    loop {
        let frame = timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("websocket error");
        if let WsMessage::Text(text) = frame {
            match serde_json::from_str::<ServerMessage>(text.as_str()).unwrap() {
                ServerMessage::Snapshot { messages } => return messages,
                other => panic!("Expected snapshot, got {other:?}"),
            }
        }
    }
}

async fn wait_for_viewers(board: &Board, expected: usize) {
    for _ in 0..100 {
        if board.stats().await.unwrap().viewers == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("viewer count never reached {expected}");
}

async fn http_post_form(addr: SocketAddr, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "POST /message HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn integration_viewers_receive_snapshot_and_updates() {
    let (board, ws_addr, _) = start_board().await;
    board.submit(Submission::parse("already here", None).unwrap());

    let url = format!("ws://{ws_addr}");
    let (mut ws_a, _) = connect_async(url.as_str()).await.expect("viewer A connect");
    let (mut ws_b, _) = connect_async(url.as_str()).await.expect("viewer B connect");

    assert_eq!(next_snapshot(&mut ws_a).await[0].body, "already here");
    assert_eq!(next_snapshot(&mut ws_b).await[0].body, "already here");
    wait_for_viewers(&board, 2).await;

    board.submit(Submission::parse("Hi", None).unwrap());

    for ws in [&mut ws_a, &mut ws_b] {
        let messages = next_snapshot(ws).await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].body, "Hi");
    }
}

#[tokio::test]
async fn integration_form_post_reaches_live_viewer() {
    let (board, ws_addr, http_addr) = start_board().await;

    let (mut ws, _) = connect_async(format!("ws://{ws_addr}")).await.expect("connect");
    assert!(next_snapshot(&mut ws).await.is_empty());
    wait_for_viewers(&board, 1).await;

    let response = http_post_form(http_addr, "message=From+the+form").await;
    assert!(response.starts_with("HTTP/1.1 303"), "{response}");

    let messages = next_snapshot(&mut ws).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].body, "From the form");
}

#[tokio::test]
async fn integration_viewer_can_submit_over_socket() {
    let (board, ws_addr, _) = start_board().await;

    let (mut ws_a, _) = connect_async(format!("ws://{ws_addr}")).await.expect("connect A");
    let (mut ws_b, _) = connect_async(format!("ws://{ws_addr}")).await.expect("connect B");
    next_snapshot(&mut ws_a).await;
    next_snapshot(&mut ws_b).await;
    wait_for_viewers(&board, 2).await;

    let submit = json!({ "type": "submit", "body": "typed live", "author": "kim" });
    ws_a.send(WsMessage::text(submit.to_string())).await.unwrap();

    let messages = next_snapshot(&mut ws_b).await;
    assert_eq!(messages[0].body, "typed live");
    assert_eq!(messages[0].author.as_deref(), Some("kim"));
}

#[tokio::test]
async fn integration_disconnect_unregisters_viewer() {
    let (board, ws_addr, _) = start_board().await;

    let (mut ws_a, _) = connect_async(format!("ws://{ws_addr}")).await.expect("connect A");
    let (mut ws_b, _) = connect_async(format!("ws://{ws_addr}")).await.expect("connect B");
    next_snapshot(&mut ws_a).await;
    next_snapshot(&mut ws_b).await;
    wait_for_viewers(&board, 2).await;

    ws_a.close(None).await.unwrap();
    wait_for_viewers(&board, 1).await;

    board.submit(Submission::parse("after close", None).unwrap());
    assert_eq!(next_snapshot(&mut ws_b).await[0].body, "after close");
}

#[tokio::test]
async fn integration_failed_handshake_leaves_board_untouched() {
    let (board, ws_addr, _) = start_board().await;

    let mut stream = TcpStream::connect(ws_addr).await.unwrap();
    stream.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
    let mut buf = Vec::new();
    let _ = timeout(Duration::from_secs(2), stream.read_to_end(&mut buf)).await;

    let stats = board.stats().await.unwrap();
    assert_eq!(stats.viewers, 0);
    assert!(board.messages().is_empty());
}
