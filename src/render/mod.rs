//! The `render` module turns the message collection into payloads.
//!
//! Renderers are pure: they borrow the collection and produce text. The
//! JSON form feeds live viewers, the HTML form feeds the polling page.

pub mod html;
pub mod json;

use crate::board::message::Message;
use crate::hub::Payload;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;

pub trait Renderer: Send + Sync {
    fn render(&self, messages: &[Message]) -> Payload;
}

impl<F> Renderer for F
where
    F: Fn(&[Message]) -> Payload + Send + Sync,
{
    fn render(&self, messages: &[Message]) -> Payload {
        self(messages)
    }
}
