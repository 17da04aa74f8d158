//! # Display Board
//!
//! `display-board` is a small shared message board for display screens.
//! Clients post short messages through a web form; browser pages and
//! terminal views show the current board, either by polling or as live
//! viewers that receive every change over WebSockets.
//!
//! ## Core Modules
//!
//! - `board`: the message store and the bridge that broadcasts its changes.
//! - `hub`: the actor that tracks live viewers and fans updates out to them.
//! - `render`: turns the message collection into JSON or HTML payloads.
//! - `transport`: the HTTP routes and the WebSocket server.
//! - `client`: the terminal display surface.
//! - `config`: loading and merging settings.
//! - `utils`: error type and logging setup.

pub mod board;
pub mod client;
pub mod config;
pub mod hub;
pub mod render;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;
