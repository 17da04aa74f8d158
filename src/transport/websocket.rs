//! WebSocket transport
//!
//! The live-connection boundary. For each accepted connection:
//! - complete the WebSocket handshake (failures only affect that caller)
//! - create a `Viewer` and attach it to the board, which seeds it with the
//!   current snapshot before it joins the hub
//! - forward hub payloads to the socket from a dedicated writer task
//! - read optional `ClientMessage` frames (submit / delete / update /
//!   refresh) and apply them through the board
//!
//! The connection ends when the client goes away or when the hub drops the
//! viewer (its queue closes). Either way the viewer is detached.

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio_tungstenite::accept_async;
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use std::net::SocketAddr;

use crate::board::Board;
use crate::board::message::Submission;
use crate::config::Settings;
use crate::hub::{Payload, Viewer, ViewerId};
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::utils::error::BoardError;

pub async fn start_websocket_server(
    addr: String,
    board: Board,
    settings: Settings,
) -> Result<(), BoardError> {
    let listener = TcpListener::bind(&addr).await?;
    info!("WebSocket server listening on ws://{addr}");
    serve_websocket(listener, board, settings.board.viewer_buffer).await;
    Ok(())
}

/// Accept loop over an already bound listener.
pub async fn serve_websocket(listener: TcpListener, board: Board, viewer_buffer: usize) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let board = board.clone();
                spawn(handle_connection(stream, peer, board, viewer_buffer));
            }
            Err(e) => {
                error!("Failed to accept connection: {e}");
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, peer: SocketAddr, board: Board, viewer_buffer: usize) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake with {peer} failed: {e}");
            return;
        }
    };
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let (viewer, mut rx) = Viewer::channel(viewer_buffer);
    let viewer_id = viewer.id.clone();

    match board.attach(viewer).await {
        Ok(true) => info!("{viewer_id} connected from {peer}"),
        Ok(false) => {
            warn!("{viewer_id} refused: connection closed before registration");
            return;
        }
        Err(e) => {
            error!("Cannot register {viewer_id}: {e}");
            return;
        }
    }

    // hub -> socket
    let mut writer = {
        let viewer_id = viewer_id.clone();
        spawn(async move {
            while let Some(payload) = rx.recv().await {
                if let Err(e) = ws_sender
                    .send(WsMessage::text(payload.as_str().to_owned()))
                    .await
                {
                    debug!("Failed to send to {viewer_id}: {e}");
                    return;
                }
            }
            // queue closed: the hub dropped this viewer
            let _ = ws_sender.send(WsMessage::Close(None)).await;
        })
    };

    loop {
        tokio::select! {
            _ = &mut writer => {
                debug!("Send loop closed for {viewer_id}");
                break;
            }
            incoming = ws_receiver.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => {
                    handle_client_message(&board, &viewer_id, text.as_str());
                }
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("Receive error from {viewer_id}: {e}");
                    break;
                }
            }
        }
    }

    board.detach(&viewer_id);
    writer.abort();
    info!("{viewer_id} disconnected");
}

/// Applies one text frame from a live viewer.
///
/// Invalid frames and validation failures are answered with an error frame
/// to that viewer only.
pub fn handle_client_message(board: &Board, viewer_id: &ViewerId, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Submit { body, author }) => {
            match Submission::parse(&body, author.as_deref()) {
                Ok(submission) => {
                    board.submit(submission);
                    debug!("{viewer_id} submitted a message");
                }
                Err(e) => reply_error(board, viewer_id, e.to_string()),
            }
        }
        Ok(ClientMessage::Delete { id }) => {
            board.remove(id);
            debug!("{viewer_id} deleted {id}");
        }
        Ok(ClientMessage::Update { id, body, author }) => {
            match Submission::parse(&body, author.as_deref()) {
                Ok(submission) => {
                    board.edit(id, submission);
                    debug!("{viewer_id} updated {id}");
                }
                Err(e) => reply_error(board, viewer_id, e.to_string()),
            }
        }
        Ok(ClientMessage::Refresh) => board.refresh(viewer_id),
        Err(err) => {
            debug!(
                "Invalid client message from {viewer_id}: {err} | {}",
                text.chars().take(100).collect::<String>()
            );
            reply_error(board, viewer_id, "invalid message");
        }
    }
}

fn reply_error(board: &Board, viewer_id: &ViewerId, message: impl Into<String>) {
    match serde_json::to_string(&ServerMessage::error(message)) {
        Ok(json) => board.hub().send_to(viewer_id, Payload::from(json)),
        Err(e) => error!("Failed to serialize error frame: {e}"),
    }
}
