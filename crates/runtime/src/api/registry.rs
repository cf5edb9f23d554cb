//! Session manager mapping party ids to their running workers.
//!
//! Parties never share mutable state. The registry map is the only
//! structure reachable from more than one party and is touched by single-key
//! lookups, inserts and removals.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use tactics_core::{Party, PartyId, PartySetup, Roller};

use super::errors::{Result, RuntimeError};
use super::handle::PartyHandle;
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::timer::TurnTimer;
use crate::workers::{Command, PartyWorker};

struct Entry {
    handle: PartyHandle,
    worker: JoinHandle<()>,
}

/// Owns the lifecycle of every live party.
///
/// Cloning yields another view of the same registry.
#[derive(Clone)]
pub struct PartyRegistry {
    config: RuntimeConfig,
    parties: Arc<Mutex<HashMap<PartyId, Entry>>>,
}

impl PartyRegistry {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            parties: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Validates `setup`, spawns the party worker and returns its handle.
    /// Dice are seeded from the thread RNG.
    pub async fn create(&self, id: PartyId, setup: PartySetup) -> Result<PartyHandle> {
        let seed = rand::random::<u64>();
        self.create_with_roller(id, setup, Roller::pcg(seed)).await
    }

    /// Same as [`PartyRegistry::create`] with an explicit dice source.
    pub async fn create_with_roller(
        &self,
        id: PartyId,
        setup: PartySetup,
        roller: Roller,
    ) -> Result<PartyHandle> {
        let mut parties = self.parties.lock().await;
        if parties.contains_key(&id) {
            return Err(RuntimeError::DuplicateParty(id));
        }

        let party = Party::new(id.clone(), self.config.party.clone(), setup, roller)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (timer_tx, timer_rx) = mpsc::channel(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = PartyHandle::new(id.clone(), command_tx, event_bus.clone());
        let timer = TurnTimer::new(self.config.tick, timer_tx);
        let worker = PartyWorker::new(party, command_rx, timer, timer_rx, event_bus);

        let worker = tokio::spawn(async move {
            worker.run().await;
        });

        info!(target: "runtime::registry", party = %id, "party created");
        parties.insert(
            id,
            Entry {
                handle: handle.clone(),
                worker,
            },
        );
        Ok(handle)
    }

    /// Emits the opening events of party `id` and starts its first countdown.
    pub async fn start(&self, id: &PartyId) -> Result<()> {
        let handle = self
            .get(id)
            .await
            .ok_or_else(|| RuntimeError::UnknownParty(id.clone()))?;
        handle.start().await?;
        info!(target: "runtime::registry", party = %id, "party started");
        Ok(())
    }

    pub async fn get(&self, id: &PartyId) -> Option<PartyHandle> {
        self.parties
            .lock()
            .await
            .get(id)
            .map(|entry| entry.handle.clone())
    }

    pub async fn contains(&self, id: &PartyId) -> bool {
        self.parties.lock().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.parties.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Stops the timers of party `id`, closes its bus and joins its worker.
    ///
    /// Returns `false` when no such party is registered, which makes a
    /// second destroy a no-op.
    pub async fn destroy(&self, id: &PartyId) -> Result<bool> {
        let Some(entry) = self.parties.lock().await.remove(id) else {
            debug!(target: "runtime::registry", party = %id, "destroy of unknown party ignored");
            return Ok(false);
        };

        // A worker that already stopped has dropped its receiver.
        match entry.handle.destroy().await {
            Ok(()) | Err(RuntimeError::CommandChannelClosed) | Err(RuntimeError::ReplyChannelClosed(_)) => {}
            Err(err) => return Err(err),
        }
        drop(entry.handle);
        entry.worker.await.map_err(RuntimeError::WorkerJoin)?;

        info!(target: "runtime::registry", party = %id, "party destroyed");
        Ok(true)
    }

    /// Destroys every registered party.
    pub async fn shutdown(&self) -> Result<()> {
        let ids: Vec<PartyId> = self.parties.lock().await.keys().cloned().collect();
        for id in ids {
            self.destroy(&id).await?;
        }
        Ok(())
    }
}
