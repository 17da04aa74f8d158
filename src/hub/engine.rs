//! Hub engine
//!
//! The hub is an actor: one task owns the [`ViewerRegistry`] and processes
//! commands from an unbounded queue in arrival order. Responsibilities:
//! - registering viewers, optionally seeding them with a snapshot first
//! - unregistering viewers (idempotent)
//! - fanning a payload out to every registered viewer, dropping the ones
//!   whose queue is full or closed
//!
//! Usage notes:
//! - [`HubHandle`] is cheap to clone and is the only way to reach the
//!   registry. Submitting a command never blocks, so handles may be used
//!   while holding other locks.
//! - A broadcast submitted after `register(..).await` returns is guaranteed
//!   to reach that viewer, since both travel through the same queue.
//! - The actor stops once every handle has been dropped; remaining viewers
//!   are closed on the way out.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::hub::registry::ViewerRegistry;
use crate::hub::viewer::{Payload, Viewer, ViewerId};
use crate::utils::error::BoardError;

/// Counters maintained by the hub actor.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubStats {
    pub viewers: usize,
    pub broadcasts: u64,
    pub deliveries: u64,
    pub dropped: u64,
}

#[derive(Debug)]
enum HubCommand {
    Register {
        viewer: Viewer,
        snapshot: Option<Payload>,
        ack: oneshot::Sender<bool>,
    },
    Unregister {
        id: ViewerId,
    },
    Broadcast {
        payload: Payload,
    },
    Send {
        id: ViewerId,
        payload: Payload,
    },
    Stats {
        reply: oneshot::Sender<HubStats>,
    },
}

#[derive(Debug)]
pub struct Hub {
    registry: ViewerRegistry,
    commands: mpsc::UnboundedReceiver<HubCommand>,
    stats: HubStats,
}

impl Hub {
    /// Creates the actor and its handle without starting it.
    pub fn new() -> (Self, HubHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self {
            registry: ViewerRegistry::new(),
            commands: rx,
            stats: HubStats::default(),
        };
        (hub, HubHandle { commands: tx })
    }

    /// Starts the actor on the current tokio runtime.
    pub fn spawn() -> HubHandle {
        let (hub, handle) = Self::new();
        tokio::spawn(hub.run());
        handle
    }

    pub async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            self.handle(command);
        }
        info!(
            "Hub stopped with {} viewer(s) still registered",
            self.registry.len()
        );
    }

    fn handle(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register {
                viewer,
                snapshot,
                ack,
            } => {
                let id = viewer.id.clone();
                let accepted = match snapshot {
                    Some(snapshot) => match viewer.deliver(snapshot) {
                        Ok(()) => true,
                        Err(e) => {
                            warn!("Snapshot to {id} failed: {e}");
                            self.stats.dropped += 1;
                            false
                        }
                    },
                    None => !viewer.is_closed(),
                };

                if accepted {
                    self.registry.insert(viewer);
                    info!("Registered {id} ({} viewer(s))", self.registry.len());
                }
                let _ = ack.send(accepted);
            }
            HubCommand::Unregister { id } => {
                if self.registry.remove(&id).is_some() {
                    info!("Unregistered {id} ({} viewer(s))", self.registry.len());
                }
            }
            HubCommand::Broadcast { payload } => {
                let delivery = self.registry.deliver(&payload);
                self.stats.broadcasts += 1;
                self.stats.deliveries += delivery.delivered as u64;
                self.stats.dropped += delivery.dropped.len() as u64;
                debug!(
                    "Broadcast delivered to {} viewer(s), dropped {}",
                    delivery.delivered,
                    delivery.dropped.len()
                );
            }
            HubCommand::Send { id, payload } => {
                let failed = match self.registry.get(&id) {
                    Some(viewer) => viewer.deliver(payload).err(),
                    None => None,
                };
                if let Some(e) = failed {
                    warn!("Dropping viewer {id}: {e}");
                    self.registry.remove(&id);
                    self.stats.dropped += 1;
                }
            }
            HubCommand::Stats { reply } => {
                let mut stats = self.stats.clone();
                stats.viewers = self.registry.len();
                let _ = reply.send(stats);
            }
        }
    }
}

/// Cloneable entry point to a running hub.
#[derive(Debug, Clone)]
pub struct HubHandle {
    commands: mpsc::UnboundedSender<HubCommand>,
}

/// Pending acknowledgement for a queued registration.
#[derive(Debug)]
pub struct Registration {
    ack: oneshot::Receiver<bool>,
}

impl Registration {
    /// Resolves once the hub has processed the registration.
    ///
    /// Returns `false` when the viewer was refused because its connection
    /// was already gone or could not take the snapshot.
    pub async fn accepted(self) -> Result<bool, BoardError> {
        self.ack.await.map_err(|_| BoardError::HubClosed)
    }
}

impl HubHandle {
    /// Queues a registration without waiting for it.
    ///
    /// `snapshot`, when given, is delivered to the viewer before it joins the
    /// registry, so it always precedes any broadcast the viewer sees.
    pub fn submit_register(
        &self,
        viewer: Viewer,
        snapshot: Option<Payload>,
    ) -> Result<Registration, BoardError> {
        let (ack, rx) = oneshot::channel();
        self.commands
            .send(HubCommand::Register {
                viewer,
                snapshot,
                ack,
            })
            .map_err(|_| BoardError::HubClosed)?;
        Ok(Registration { ack: rx })
    }

    pub async fn register(
        &self,
        viewer: Viewer,
        snapshot: Option<Payload>,
    ) -> Result<bool, BoardError> {
        self.submit_register(viewer, snapshot)?.accepted().await
    }

    /// Removes a viewer. Unknown ids and a stopped hub are both no-ops.
    pub fn unregister(&self, id: &ViewerId) {
        let _ = self
            .commands
            .send(HubCommand::Unregister { id: id.clone() });
    }

    /// Queues `payload` for every registered viewer and returns immediately.
    pub fn broadcast(&self, payload: Payload) {
        if self
            .commands
            .send(HubCommand::Broadcast { payload })
            .is_err()
        {
            warn!("Broadcast skipped: hub is not running");
        }
    }

    /// Queues `payload` for a single registered viewer.
    pub fn send_to(&self, id: &ViewerId, payload: Payload) {
        let _ = self.commands.send(HubCommand::Send {
            id: id.clone(),
            payload,
        });
    }

    pub async fn stats(&self) -> Result<HubStats, BoardError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(HubCommand::Stats { reply })
            .map_err(|_| BoardError::HubClosed)?;
        rx.await.map_err(|_| BoardError::HubClosed)
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }
}
