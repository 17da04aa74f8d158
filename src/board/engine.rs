//! Board engine
//!
//! `Board` wires the message store to the hub and is what every boundary
//! (HTTP routes, WebSocket connections) talks to:
//! - submissions get an id from the board's counter and go to the store
//! - the store notifies the bridge, which renders and broadcasts
//! - new live viewers are registered with a snapshot taken under the store
//!   lock, so no change can slip between the snapshot and registration
//!
//! Validation happens before any of these calls, in [`Submission::parse`]
//! and [`parse_id`](crate::board::message::parse_id).

use std::sync::Arc;

use tracing::debug;

use crate::board::bridge::Broadcaster;
use crate::board::message::{IdGenerator, Message, MessageId, Submission};
use crate::board::store::MessageStore;
use crate::hub::{HubHandle, HubStats, Payload, Viewer, ViewerId};
use crate::render::{JsonRenderer, Renderer};
use crate::utils::error::BoardError;

#[derive(Clone)]
pub struct Board {
    store: MessageStore,
    hub: HubHandle,
    renderer: Arc<dyn Renderer>,
    ids: Arc<IdGenerator>,
}

impl Board {
    /// Builds a board whose live viewers receive `renderer` output.
    pub fn new(hub: HubHandle, renderer: Arc<dyn Renderer>) -> Self {
        let bridge = Broadcaster::new(hub.clone(), renderer.clone());
        Self {
            store: MessageStore::with_observer(Arc::new(bridge)),
            hub,
            renderer,
            ids: Arc::new(IdGenerator::new()),
        }
    }

    /// Board with JSON snapshots for live viewers.
    pub fn with_json(hub: HubHandle) -> Self {
        Self::new(hub, Arc::new(JsonRenderer))
    }

    /// Appends a new message; it ends up last in the returned collection.
    pub fn submit(&self, submission: Submission) -> Vec<Message> {
        let id = self.ids.next_id();
        let messages = self.store.add(submission.into_message(id));
        debug!("Message {id} added ({} on board)", messages.len());
        messages
    }

    pub fn remove(&self, id: MessageId) -> Vec<Message> {
        let messages = self.store.delete(id);
        debug!("Delete {id} done ({} on board)", messages.len());
        messages
    }

    /// Replaces the body and author of message `id`. Unknown ids are a no-op.
    pub fn edit(&self, id: MessageId, submission: Submission) -> Vec<Message> {
        let messages = self.store.update(id, submission.into_message(id));
        debug!("Update {id} done ({} on board)", messages.len());
        messages
    }

    pub fn messages(&self) -> Vec<Message> {
        self.store.list()
    }

    /// The current collection in the live viewers' format.
    pub fn snapshot(&self) -> Payload {
        self.store.inspect(|messages| self.renderer.render(messages))
    }

    /// The current collection rendered by an arbitrary renderer.
    pub fn render_with(&self, renderer: &dyn Renderer) -> Payload {
        self.store.inspect(|messages| renderer.render(messages))
    }

    /// Registers a live viewer, seeding it with the current snapshot.
    ///
    /// Returns `false` if the viewer was refused because its connection was
    /// already gone.
    pub async fn attach(&self, viewer: Viewer) -> Result<bool, BoardError> {
        let registration = self.store.inspect(|messages| {
            let snapshot = self.renderer.render(messages);
            self.hub.submit_register(viewer, Some(snapshot))
        })?;
        registration.accepted().await
    }

    pub fn detach(&self, id: &ViewerId) {
        self.hub.unregister(id);
    }

    /// Re-sends the current snapshot to one viewer.
    pub fn refresh(&self, id: &ViewerId) {
        self.store.inspect(|messages| {
            self.hub.send_to(id, self.renderer.render(messages));
        });
    }

    pub fn hub(&self) -> &HubHandle {
        &self.hub
    }

    pub async fn stats(&self) -> Result<HubStats, BoardError> {
        self.hub.stats().await
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("store", &self.store)
            .field("hub", &self.hub)
            .finish()
    }
}
