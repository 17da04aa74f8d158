//! In-memory message store
//!
//! The store owns the ordered message collection and is the only writer.
//! Every operation runs under one mutex, so concurrent callers observe a
//! total order and `list()` never sees a half-applied change.
//!
//! An optional [`MutationObserver`] is notified while the lock is still
//! held, right after a mutation that changed the collection. Notifications
//! therefore arrive in the same order the mutations were applied.

use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::Mutex;

use crate::board::message::{Message, MessageId};

/// Receives the full collection after each visible change.
///
/// Called with the store lock held: implementations must not block and
/// must not call back into the store.
pub trait MutationObserver: Send + Sync {
    fn collection_changed(&self, messages: &[Message]);
}

#[derive(Clone, Default)]
pub struct MessageStore {
    messages: Arc<Mutex<Vec<Message>>>,
    observer: Option<Arc<dyn MutationObserver>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: Arc<dyn MutationObserver>) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            observer: Some(observer),
        }
    }

    pub fn list(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    /// Runs `f` against the current collection without copying it.
    ///
    /// No mutation can interleave with `f`.
    pub fn inspect<R>(&self, f: impl FnOnce(&[Message]) -> R) -> R {
        let messages = self.messages.lock();
        f(&messages)
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `candidate`, stamping `created` if it is missing.
    pub fn add(&self, mut candidate: Message) -> Vec<Message> {
        if candidate.created.is_none() {
            candidate.created = Some(Utc::now());
        }

        let mut messages = self.messages.lock();
        messages.push(candidate);
        self.notify(&messages);
        messages.clone()
    }

    /// Removes the first message with `id`. Unknown ids leave the collection untouched.
    pub fn delete(&self, id: MessageId) -> Vec<Message> {
        let mut messages = self.messages.lock();
        if let Some(pos) = messages.iter().position(|m| m.id == id) {
            messages.remove(pos);
            self.notify(&messages);
        }
        messages.clone()
    }

    /// Replaces the message with `id` in place and stamps `modified`.
    ///
    /// The replacement keeps the original id, and inherits the original
    /// `created` when it carries none. `modified` is always later than
    /// `created`. Unknown ids leave the collection untouched.
    pub fn update(&self, id: MessageId, mut replacement: Message) -> Vec<Message> {
        let mut messages = self.messages.lock();
        if let Some(slot) = messages.iter_mut().find(|m| m.id == id) {
            replacement.id = slot.id;
            let created = replacement.created.or(slot.created);
            replacement.created = created;

            let mut modified = Utc::now();
            if let Some(created) = created {
                if modified <= created {
                    modified = created + Duration::microseconds(1);
                }
            }
            replacement.modified = Some(modified);

            *slot = replacement;
            self.notify(&messages);
        }
        messages.clone()
    }

    fn notify(&self, messages: &[Message]) {
        if let Some(observer) = &self.observer {
            observer.collection_changed(messages);
        }
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("messages", &self.len())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}
