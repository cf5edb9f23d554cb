//! Bridge between a party's event bus and a transport.
//!
//! Transports implement [`EventSink`] with their two call shapes, "send to
//! the whole party" and "send to one participant", and
//! [`spawn_forwarder`] routes every envelope of a party to the right one.
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use tactics_core::{Audience, PartyEvent, PartyId, PlayerId};

use crate::api::{PartyHandle, Result};
use crate::events::Envelope;

/// Fan-out to the connected clients of a party.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver `event` to every participant of `party`.
    async fn broadcast(&self, party: &PartyId, event: &PartyEvent);

    /// Deliver `event` to `player` only.
    async fn unicast(&self, party: &PartyId, player: PlayerId, event: &PartyEvent);
}

/// Sink that writes every envelope as a JSON trace line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl EventSink for TracingSink {
    async fn broadcast(&self, party: &PartyId, event: &PartyEvent) {
        render(&Envelope::broadcast(party.clone(), event.clone()));
    }

    async fn unicast(&self, party: &PartyId, player: PlayerId, event: &PartyEvent) {
        render(&Envelope::new(
            party.clone(),
            Audience::Player(player),
            event.clone(),
        ));
    }
}

fn render(envelope: &Envelope) {
    match envelope.to_json() {
        Ok(json) => debug!(target: "runtime::sink", party = %envelope.party, "{json}"),
        Err(err) => warn!(target: "runtime::sink", party = %envelope.party, %err, "unserializable event"),
    }
}

/// Forwards every event of `handle`'s party to `sink` until the party's bus
/// closes.
pub fn spawn_forwarder(handle: &PartyHandle, sink: Arc<dyn EventSink>) -> Result<JoinHandle<()>> {
    let mut events = handle.subscribe_all()?;
    let party = handle.id().clone();

    Ok(tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(envelope) => match envelope.audience {
                    Audience::Party => sink.broadcast(&envelope.party, &envelope.event).await,
                    Audience::Player(player) => {
                        sink.unicast(&envelope.party, player, &envelope.event)
                            .await
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(target: "runtime::sink", party = %party, skipped, "forwarder lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
        trace!(target: "runtime::sink", party = %party, "forwarder stopped");
    }))
}
