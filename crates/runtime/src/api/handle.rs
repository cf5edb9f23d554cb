//! Cloneable façade for issuing commands to one party.
//!
//! [`PartyHandle`] hides channel plumbing and offers async helpers for every
//! intent and query of a party, plus subscriptions to its event topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use tactics_core::{ActionOutcome, Fighter, ItemKind, PartyId, PlayerId, Position};

use super::errors::{Result, RuntimeError};
use super::{Intent, PartySnapshot};
use crate::events::{Envelope, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with one party
#[derive(Clone)]
pub struct PartyHandle {
    id: PartyId,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl PartyHandle {
    pub(crate) fn new(id: PartyId, command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            id,
            command_tx,
            event_bus,
        }
    }

    pub fn id(&self) -> &PartyId {
        &self.id
    }

    /// Sends a command built around a fresh reply channel and waits for the
    /// worker's answer.
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Emit the opening events and start the first countdown.
    pub async fn start(&self) -> Result<()> {
        self.request(|reply| Command::Start { reply }).await?
    }

    /// Apply one intent. Illegal intents come back as
    /// [`ActionOutcome::Rejected`], not as errors.
    pub async fn submit(&self, intent: Intent) -> Result<ActionOutcome> {
        self.request(|reply| Command::Submit { intent, reply }).await?
    }

    pub async fn execute_action(&self, player: PlayerId, target: Position) -> Result<ActionOutcome> {
        self.submit(Intent::ExecuteAction { player, target }).await
    }

    pub async fn move_player(&self, player: PlayerId, target: Position) -> Result<ActionOutcome> {
        self.submit(Intent::Move { player, target }).await
    }

    pub async fn handle_attack(&self) -> Result<ActionOutcome> {
        self.submit(Intent::Attack).await
    }

    pub async fn handle_escape(&self) -> Result<ActionOutcome> {
        self.submit(Intent::Escape).await
    }

    pub async fn give_up(&self, player: PlayerId) -> Result<ActionOutcome> {
        self.submit(Intent::GiveUp { player }).await
    }

    pub async fn toggle_debug_mode(&self, player: PlayerId) -> Result<ActionOutcome> {
        self.submit(Intent::ToggleDebugMode { player }).await
    }

    pub async fn remove_player_item(&self, player: PlayerId, item: ItemKind) -> Result<ActionOutcome> {
        self.submit(Intent::RemovePlayerItem { player, item }).await
    }

    pub async fn end_round(&self, player: PlayerId) -> Result<ActionOutcome> {
        self.submit(Intent::EndRound { player }).await
    }

    pub async fn teleport(&self, player: PlayerId, target: Position) -> Result<ActionOutcome> {
        self.submit(Intent::Teleport { player, target }).await
    }

    /// Cells `player` can reach this round, own cell included.
    pub async fn accessible_positions(&self, player: PlayerId) -> Result<Vec<Position>> {
        self.request(|reply| Command::AccessiblePositions { player, reply })
            .await
    }

    /// Adjacent cells `player` can act on.
    pub async fn interactive_positions(&self, player: PlayerId) -> Result<Vec<Position>> {
        self.request(|reply| Command::InteractivePositions { player, reply })
            .await
    }

    /// Hop-by-hop path from `player`'s cell to `end`. Empty when `end` is
    /// out of reach.
    pub async fn path(&self, player: PlayerId, end: Position) -> Result<Vec<Position>> {
        self.request(|reply| Command::Path { player, end, reply })
            .await
    }

    pub async fn fighters(&self) -> Result<Option<[Fighter; 2]>> {
        self.request(|reply| Command::Fighters { reply }).await
    }

    /// Query the current party state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<PartySnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Stops the worker. Used by the registry, which also joins the task.
    pub(crate) async fn destroy(&self) -> Result<()> {
        self.request(|reply| Command::Destroy { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Log` - Game-log entries
    /// - `Topic::Timer` - Countdown and round ticks
    /// - `Topic::Turn` - Rotation, pauses and end of game
    /// - `Topic::Board` - Map and roster changes
    /// - `Topic::Combat` - Fight progress
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tactics_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat)?;
    /// while let Ok(envelope) = combat_rx.recv().await {
    ///     // Render the fight
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> Result<broadcast::Receiver<Envelope>> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Result<HashMap<Topic, broadcast::Receiver<Envelope>>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Every event of the party, in emission order.
    pub fn subscribe_all(&self) -> Result<broadcast::Receiver<Envelope>> {
        self.event_bus.subscribe_all()
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

impl std::fmt::Debug for PartyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartyHandle").field("id", &self.id).finish_non_exhaustive()
    }
}
