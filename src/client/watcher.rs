//! Terminal display surface.
//!
//! Connects to the board as a live viewer and redraws the screen whenever a
//! snapshot arrives, auto-scrolling long boards on a timer.

use std::time::Duration;

use futures_util::StreamExt;
use tokio_tungstenite::connect_async;
use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::board::message::Message;
use crate::client::scroll::{ScrollWindow, truncate};
use crate::config::BoardSettings;
use crate::transport::message::ServerMessage;
use crate::utils::error::BoardError;

const TITLE: &str = "Display Board";

/// Formats the visible part of the board as terminal lines.
pub fn render_lines(messages: &[Message], window: &ScrollWindow) -> Vec<String> {
    let mut lines = vec![TITLE.to_string(), "-".repeat(TITLE.len())];
    if messages.is_empty() {
        lines.push("(no messages)".to_string());
    }
    for msg in window.visible(messages) {
        match &msg.author {
            Some(author) => lines.push(format!("{} - {}", truncate(&msg.body), author)),
            None => lines.push(truncate(&msg.body)),
        }
    }
    lines
}

fn draw(messages: &[Message], window: &ScrollWindow) {
    // clear screen, cursor home
    print!("\x1b[2J\x1b[H");
    for line in render_lines(messages, window) {
        println!("{line}");
    }
}

pub async fn run_watch(url: &str, settings: &BoardSettings) -> Result<(), BoardError> {
    let (mut ws_stream, _response) = connect_async(url).await?;
    info!("Watching {url}");

    let mut messages: Vec<Message> = Vec::new();
    let mut window = ScrollWindow::new(settings.max_visible);
    let mut ticker = tokio::time::interval(Duration::from_secs(settings.scroll_secs.max(1)));
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                window.advance(messages.len());
                draw(&messages, &window);
            }
            frame = ws_stream.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(ServerMessage::Snapshot { messages: latest }) => {
                            messages = latest;
                            draw(&messages, &window);
                        }
                        Ok(ServerMessage::Error { message }) => warn!("Server error: {message}"),
                        Err(e) => debug!("Ignoring unexpected frame: {e}"),
                    }
                }
                Some(Ok(WsMessage::Close(_))) | None => {
                    info!("Board closed the connection");
                    return Ok(());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }
}
