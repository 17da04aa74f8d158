use std::collections::HashMap;

use tracing::{debug, warn};

use crate::hub::viewer::{Payload, Viewer, ViewerId};

/// Outcome of one fan-out pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub dropped: Vec<ViewerId>,
}

/// The set of currently registered viewers.
///
/// Owned by the hub actor; nothing else holds a reference to it.
#[derive(Debug, Default)]
pub struct ViewerRegistry {
    viewers: HashMap<ViewerId, Viewer>,
}

impl ViewerRegistry {
    pub fn new() -> Self {
        Self {
            viewers: HashMap::new(),
        }
    }

    /// Adds a viewer. A viewer with the same id is replaced and closed.
    pub fn insert(&mut self, viewer: Viewer) {
        if let Some(previous) = self.viewers.insert(viewer.id.clone(), viewer) {
            debug!("Replaced viewer {}", previous.id);
        }
    }

    /// Removes a viewer, closing its queue on drop. Unknown ids are ignored.
    pub fn remove(&mut self, id: &ViewerId) -> Option<Viewer> {
        self.viewers.remove(id)
    }

    pub fn get(&self, id: &ViewerId) -> Option<&Viewer> {
        self.viewers.get(id)
    }

    pub fn contains(&self, id: &ViewerId) -> bool {
        self.viewers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }

    /// Hands `payload` to every viewer and prunes the ones that fail.
    pub fn deliver(&mut self, payload: &Payload) -> Delivery {
        let mut delivery = Delivery::default();

        for (id, viewer) in &self.viewers {
            match viewer.deliver(payload.clone()) {
                Ok(()) => delivery.delivered += 1,
                Err(e) => {
                    warn!("Dropping viewer {id}: {e}");
                    delivery.dropped.push(id.clone());
                }
            }
        }

        for id in &delivery.dropped {
            self.viewers.remove(id);
        }

        delivery
    }
}
