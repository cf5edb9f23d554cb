//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use tactics_core::PartyEvent;

use super::Envelope;
use crate::api::{Result, RuntimeError};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Topic {
    /// Game-log entries
    Log,
    /// Countdown and round timer ticks
    Timer,
    /// Rotation, pauses and end of game
    Turn,
    /// Map and roster changes
    Board,
    /// Fight progress
    Combat,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Log,
        Topic::Timer,
        Topic::Turn,
        Topic::Board,
        Topic::Combat,
    ];

    pub fn of(event: &PartyEvent) -> Topic {
        match event {
            PartyEvent::Log(_) => Topic::Log,
            PartyEvent::CountdownTick { .. } | PartyEvent::TimerTick { .. } => Topic::Timer,
            PartyEvent::TurnStarted { .. }
            | PartyEvent::TurnPaused { .. }
            | PartyEvent::TurnResumed
            | PartyEvent::RoundCount { .. }
            | PartyEvent::ItemChoiceRequired { .. }
            | PartyEvent::DebugMode { .. }
            | PartyEvent::VirtualPlayerTurn { .. }
            | PartyEvent::ActionFinished { .. }
            | PartyEvent::GameEnded { .. } => Topic::Turn,
            PartyEvent::PlayerList { .. }
            | PartyEvent::PlayerMoved { .. }
            | PartyEvent::DoorToggled { .. }
            | PartyEvent::ItemsReplaced { .. }
            | PartyEvent::PlayerRespawned { .. }
            | PartyEvent::PlayerTeleported { .. } => Topic::Board,
            PartyEvent::DiceRolled { .. }
            | PartyEvent::FightStarted { .. }
            | PartyEvent::FightTurn { .. }
            | PartyEvent::AttackResolved(_)
            | PartyEvent::EscapeAttempted { .. }
            | PartyEvent::FightEnded { .. } => Topic::Combat,
        }
    }
}

struct Channels {
    topics: HashMap<Topic, broadcast::Sender<Envelope>>,
    /// Every envelope regardless of topic, in publication order.
    all: broadcast::Sender<Envelope>,
}

/// Topic-based event bus of one party
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Once [`EventBus::close`] runs every receiver
/// observes `RecvError::Closed` after draining what was already sent.
pub struct EventBus {
    channels: Arc<RwLock<Option<Channels>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let topics = Topic::ALL
            .iter()
            .map(|&topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(RwLock::new(Some(Channels {
                topics,
                all: broadcast::channel(capacity).0,
            }))),
        }
    }

    /// Publish an envelope to its topic and to the firehose
    pub fn publish(&self, envelope: Envelope) {
        let topic = envelope.topic();

        // Use try_read to avoid blocking in async context
        match self.channels.try_read() {
            Ok(guard) => {
                let Some(channels) = guard.as_ref() else {
                    tracing::trace!("Dropping {:?} event on a closed bus", topic);
                    return;
                };
                // No subscribers is normal, not an error
                let _ = channels.all.send(envelope.clone());
                if let Some(tx) = channels.topics.get(&topic)
                    && tx.send(envelope).is_err()
                {
                    tracing::trace!("No subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                tracing::debug!("Failed to acquire event bus lock for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> Result<broadcast::Receiver<Envelope>> {
        let guard = self
            .channels
            .try_read()
            .map_err(|_| RuntimeError::BusClosed)?;
        guard
            .as_ref()
            .and_then(|channels| channels.topics.get(&topic))
            .map(broadcast::Sender::subscribe)
            .ok_or(RuntimeError::BusClosed)
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Result<HashMap<Topic, broadcast::Receiver<Envelope>>> {
        topics
            .iter()
            .map(|&topic| Ok((topic, self.subscribe(topic)?)))
            .collect()
    }

    /// Subscribe to every topic through a single ordered stream
    pub fn subscribe_all(&self) -> Result<broadcast::Receiver<Envelope>> {
        let guard = self
            .channels
            .try_read()
            .map_err(|_| RuntimeError::BusClosed)?;
        guard
            .as_ref()
            .map(|channels| channels.all.subscribe())
            .ok_or(RuntimeError::BusClosed)
    }

    /// Drops every sender. Safe to call more than once.
    pub async fn close(&self) {
        self.channels.write().await.take();
    }

    pub async fn is_closed(&self) -> bool {
        self.channels.read().await.is_none()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{LogEvent, PartyId, PlayerId};
    use tokio::sync::broadcast::error::RecvError;

    fn envelope(event: PartyEvent) -> Envelope {
        Envelope::broadcast(PartyId::new("bus"), event)
    }

    #[tokio::test]
    async fn routes_events_by_topic() {
        let bus = EventBus::new();
        let mut timer = bus.subscribe(Topic::Timer).unwrap();
        let mut log = bus.subscribe(Topic::Log).unwrap();

        bus.publish(envelope(PartyEvent::TimerTick { remaining: 9 }));
        bus.publish(envelope(PartyEvent::Log(LogEvent::StartTurn {
            player: PlayerId(1),
        })));

        assert_eq!(
            timer.recv().await.unwrap().event,
            PartyEvent::TimerTick { remaining: 9 }
        );
        assert!(timer.try_recv().is_err());
        assert_eq!(log.recv().await.unwrap().topic(), Topic::Log);
    }

    #[tokio::test]
    async fn firehose_preserves_publication_order() {
        let bus = EventBus::new();
        let mut all = bus.subscribe_all().unwrap();

        bus.publish(envelope(PartyEvent::TurnResumed));
        bus.publish(envelope(PartyEvent::CountdownTick { remaining: 2 }));

        assert_eq!(all.recv().await.unwrap().event, PartyEvent::TurnResumed);
        assert_eq!(
            all.recv().await.unwrap().event,
            PartyEvent::CountdownTick { remaining: 2 }
        );
    }

    #[tokio::test]
    async fn close_ends_every_subscription() {
        let bus = EventBus::new();
        let mut turn = bus.subscribe(Topic::Turn).unwrap();
        bus.publish(envelope(PartyEvent::TurnResumed));

        bus.close().await;
        bus.close().await;

        assert!(bus.is_closed().await);
        assert_eq!(turn.recv().await.unwrap().event, PartyEvent::TurnResumed);
        assert!(matches!(turn.recv().await, Err(RecvError::Closed)));
        assert!(matches!(bus.subscribe(Topic::Turn), Err(RuntimeError::BusClosed)));
    }
}
