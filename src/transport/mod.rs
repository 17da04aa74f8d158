//! The `transport` module connects the board to the network.
//!
//! `http` serves the pages, the form endpoints and the polling snapshot;
//! `websocket` serves live viewers. `message` defines the live wire format.

pub mod http;
pub mod message;
pub mod websocket;
