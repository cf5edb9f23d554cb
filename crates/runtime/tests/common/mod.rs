#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tactics_core::{
    DiceAssignment, ItemKind, PartyConfig, PartyEvent, PartyId, PartySetup, Player, PlayerId,
    PlayerKind, PlayerStats, Roller, ScriptedRng,
};
use tactics_runtime::{Envelope, PartyHandle, PartyRegistry, RuntimeConfig};
use tokio::sync::broadcast;

pub const P1: PlayerId = PlayerId(1);
pub const P2: PlayerId = PlayerId(2);
pub const P3: PlayerId = PlayerId(3);

pub const COUNTDOWN_SECS: u32 = 3;
pub const ROUND_SECS: u32 = 5;

pub fn config() -> RuntimeConfig {
    RuntimeConfig::default().with_party(PartyConfig::with_timers(COUNTDOWN_SECS, ROUND_SECS))
}

pub fn human(id: u32, speed: u32) -> Player {
    Player::new(
        PlayerId(id),
        format!("p{id}"),
        PlayerKind::Human,
        PlayerStats::new(4, speed, 4, 4, DiceAssignment::ATTACK_D6),
    )
}

/// 5x5 base map with start points at (0, 0), (2, 0) and (4, 0).
pub fn map() -> Vec<Vec<u16>> {
    let mut rows = vec![vec![0u16; 5]; 5];
    for x in [0, 2, 4] {
        rows[0][x] = ItemKind::StartPoint as u16;
    }
    rows
}

/// P1 (fastest, organizer) and P2.
pub fn duo() -> PartySetup {
    PartySetup {
        map: map(),
        players: vec![human(1, 6).organizer(), human(2, 4)],
    }
}

pub async fn create(
    registry: &PartyRegistry,
    code: &str,
    setup: PartySetup,
) -> (PartyHandle, Arc<ScriptedRng>) {
    let rng = Arc::new(ScriptedRng::default());
    let handle = registry
        .create_with_roller(PartyId::new(code), setup, Roller::new(rng.clone(), 7))
        .await
        .expect("party should be created");
    (handle, rng)
}

pub async fn next_event(rx: &mut broadcast::Receiver<Envelope>) -> PartyEvent {
    tokio::time::timeout(Duration::from_secs(600), rx.recv())
        .await
        .expect("event should arrive")
        .expect("bus should be open")
        .event
}

/// Skips events until one matches `wanted`.
pub async fn wait_for(
    rx: &mut broadcast::Receiver<Envelope>,
    wanted: impl Fn(&PartyEvent) -> bool,
) -> PartyEvent {
    loop {
        let event = next_event(rx).await;
        if wanted(&event) {
            return event;
        }
    }
}

/// Events already queued on `rx`, without waiting.
pub fn pending(rx: &mut broadcast::Receiver<Envelope>) -> Vec<PartyEvent> {
    let mut events = Vec::new();
    while let Ok(envelope) = rx.try_recv() {
        events.push(envelope.event);
    }
    events
}
