use std::sync::Arc;

use crate::board::message::Message;
use crate::board::store::MutationObserver;
use crate::hub::HubHandle;
use crate::render::Renderer;

/// Turns every visible store change into exactly one hub broadcast.
///
/// The broadcast is submitted even when nobody is connected; the hub treats
/// an empty registry as a no-op. Delivery is best-effort and never retried.
pub struct Broadcaster {
    hub: HubHandle,
    renderer: Arc<dyn Renderer>,
}

impl Broadcaster {
    pub fn new(hub: HubHandle, renderer: Arc<dyn Renderer>) -> Self {
        Self { hub, renderer }
    }
}

impl MutationObserver for Broadcaster {
    fn collection_changed(&self, messages: &[Message]) {
        self.hub.broadcast(self.renderer.render(messages));
    }
}
