use tracing::error;

use crate::board::message::Message;
use crate::hub::Payload;
use crate::render::Renderer;
use crate::transport::message::ServerMessage;

/// Renders `{"type":"snapshot","messages":[...]}` frames for live viewers.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, messages: &[Message]) -> Payload {
        let snapshot = ServerMessage::Snapshot {
            messages: messages.to_vec(),
        };
        match serde_json::to_string(&snapshot) {
            Ok(json) => Payload::from(json),
            Err(e) => {
                error!("Failed to serialize snapshot: {e}");
                Payload::from(r#"{"type":"error","message":"snapshot unavailable"}"#)
            }
        }
    }
}
