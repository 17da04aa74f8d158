use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};

pub type ViewerId = String;

/// Pre-rendered update handed to the hub.
///
/// The hub never looks inside; cloning only bumps a reference count, so one
/// payload can be fanned out to every viewer without copying the text.
#[derive(Clone, PartialEq, Eq)]
pub struct Payload(Arc<str>);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self(Arc::from(text))
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload").field(&self.0.len()).finish()
    }
}

/// Why a payload could not be handed to a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// The viewer's queue is at capacity.
    Full,
    /// The receiving side is gone.
    Closed,
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Full => f.write_str("buffer full"),
            DeliveryError::Closed => f.write_str("connection closed"),
        }
    }
}

/// A live connection able to receive pushed updates.
///
/// Each viewer is identified by a unique `id` and owns the sending half of
/// a bounded queue. Dropping the viewer closes the queue, which is how the
/// connection task learns it has been unregistered.
#[derive(Debug)]
pub struct Viewer {
    /// Unique identifier for the viewer (`viewer-<uuid>`).
    pub id: ViewerId,

    /// Bounded queue feeding the viewer's connection.
    sender: Sender<Payload>,
}

impl Viewer {
    pub fn new(sender: Sender<Payload>) -> Self {
        Self {
            id: format!("viewer-{}", uuid::Uuid::new_v4()),
            sender,
        }
    }

    /// Creates a viewer together with the receiving end of its queue.
    pub fn channel(capacity: usize) -> (Self, Receiver<Payload>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    /// Queues `payload` without waiting. A full queue counts as a failure.
    pub fn deliver(&self, payload: Payload) -> Result<(), DeliveryError> {
        self.sender.try_send(payload).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::Full,
            TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
