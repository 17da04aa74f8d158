//! The `board` module holds the message collection and the glue that keeps
//! live viewers in sync with it.
//!
//! - `message`: the `Message` model, validated `Submission`s and id assignment.
//! - `store`: the single-writer, mutex-guarded collection.
//! - `bridge`: renders each change and hands it to the hub.
//! - `engine`: the `Board` facade used by the transport layer.

pub mod bridge;
pub mod engine;
pub mod message;
pub mod store;

pub use engine::Board;
pub use message::{Message, MessageId, Submission};
pub use store::MessageStore;
