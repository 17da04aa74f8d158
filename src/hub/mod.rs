//! The `hub` module is the real-time fan-out layer.
//!
//! It tracks connected live viewers and pushes opaque payloads to all of
//! them. It has no knowledge of messages or rendering; the board's bridge
//! is what turns store mutations into broadcasts.

pub mod engine;
pub mod registry;
pub mod viewer;

pub use engine::{Hub, HubHandle, HubStats};
pub use viewer::{Payload, Viewer, ViewerId};
