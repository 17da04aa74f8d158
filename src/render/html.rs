use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::board::message::Message;
use crate::hub::Payload;
use crate::render::Renderer;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the board as an HTML table fragment.
///
/// This is what the board page polls from `/board` and swaps into place.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, messages: &[Message]) -> Payload {
        let mut out = String::from(
            "<table>\n<thead><tr><th>Message</th><th>Author</th><th>Created</th><th>Modified</th><th></th></tr></thead>\n<tbody>\n",
        );

        if messages.is_empty() {
            out.push_str("<tr class=\"empty\"><td colspan=\"5\">No messages yet</td></tr>\n");
        }

        for msg in messages {
            let _ = writeln!(
                out,
                "<tr id=\"message-{id}\"><td>{body}</td><td>{author}</td><td>{created}</td><td>{modified}</td>\
                 <td><button hx-delete=\"/message?id={id}\" hx-target=\"#board\" hx-swap=\"none\">x</button></td></tr>",
                id = msg.id,
                body = escape(&msg.body),
                author = escape(msg.author.as_deref().unwrap_or("")),
                created = timestamp(msg.created),
                modified = timestamp(msg.modified),
            );
        }

        out.push_str("</tbody>\n</table>\n");
        Payload::from(out)
    }
}

fn timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// Escapes text for use inside HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
