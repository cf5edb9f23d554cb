//! Everything a party tells the outside world.
//!
//! Party operations never talk to transports or timers directly. They push
//! [`PartyEvent`]s addressed to an [`Audience`] and [`TimerDirective`]s into
//! an [`Outbox`]; the runtime drains it after each operation.

use crate::combat::{AttackReport, DiceType, Fighter, RollKind};
use crate::grid::ItemKind;
use crate::respawn::ItemPlacement;
use crate::state::{Player, PlayerId, Position};
use crate::turn::PauseReason;

/// Game-log entries, one payload per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum LogEvent {
    BeginParty { players: Vec<PlayerId> },
    StartTurn { player: PlayerId },
    EndTurn { player: PlayerId },
    OpenDoor { player: PlayerId, position: Position },
    CloseDoor { player: PlayerId, position: Position },
    StartCombat { initiator: PlayerId, opponent: PlayerId },
    EndCombat { winner: Option<PlayerId>, loser: Option<PlayerId> },
    Attack { attacker: PlayerId, defender: PlayerId, total: u32, hit: bool },
    Defense { defender: PlayerId, total: u32, evaded: bool },
    Escape { player: PlayerId, succeeded: bool },
    GiveUp { player: PlayerId },
    EndGame { winner: Option<PlayerId> },
    DebugToggled { player: PlayerId, enabled: bool },
    ItemLost { player: PlayerId, item: ItemKind },
    ItemPicked { player: PlayerId, item: ItemKind },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DoorState {
    Open,
    Closed,
}

/// Closed set of outbound party notifications.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        tag = "event",
        content = "payload",
        rename_all = "camelCase",
        rename_all_fields = "camelCase"
    )
)]
pub enum PartyEvent {
    Log(LogEvent),
    CountdownTick { remaining: u32 },
    TimerTick { remaining: u32 },
    TurnStarted { player: PlayerId },
    TurnPaused { reason: PauseReason },
    TurnResumed,
    RoundCount { rounds: u32 },
    PlayerList { players: Vec<Player> },
    PlayerMoved { player: PlayerId, path: Vec<Position> },
    DoorToggled { door_position: Position, door_state: DoorState },
    DiceRolled { pid: PlayerId, dice_type: DiceType, roll: RollKind, result: u32 },
    ItemsReplaced { placements: Vec<ItemPlacement> },
    ItemChoiceRequired { player: PlayerId, items: Vec<ItemKind> },
    FightStarted { fighters: Vec<Fighter> },
    FightTurn { player: PlayerId },
    AttackResolved(AttackReport),
    EscapeAttempted { player: PlayerId, succeeded: bool, remaining: u32 },
    FightEnded { winner: Option<PlayerId>, loser: Option<PlayerId> },
    PlayerRespawned { player: PlayerId, position: Position },
    PlayerTeleported { player: PlayerId, position: Position },
    DebugMode { enabled: bool },
    VirtualPlayerTurn { player: PlayerId },
    ActionFinished { player: PlayerId },
    GameEnded { winner: Option<PlayerId> },
}

/// Who receives a dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Audience {
    Party,
    Player(PlayerId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch {
    pub audience: Audience,
    pub event: PartyEvent,
}

/// Instructions for the party's timer scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerDirective {
    /// Stop whatever runs and count down before the next round.
    StartCountdown { secs: u32 },
    /// Stop whatever runs and start a fresh round timer.
    StartRound { secs: u32 },
    /// Stop the round timer, keeping what is left of it.
    Pause,
    /// Restart the round timer from what was left.
    Resume,
    /// Stop every timer.
    Stop,
}

/// Collects the effects of one party operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outbox {
    dispatches: Vec<Dispatch>,
    directives: Vec<TimerDirective>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcast(&mut self, event: PartyEvent) {
        self.dispatches.push(Dispatch {
            audience: Audience::Party,
            event,
        });
    }

    pub fn unicast(&mut self, player: PlayerId, event: PartyEvent) {
        self.dispatches.push(Dispatch {
            audience: Audience::Player(player),
            event,
        });
    }

    pub fn log(&mut self, entry: LogEvent) {
        self.broadcast(PartyEvent::Log(entry));
    }

    pub fn timer(&mut self, directive: TimerDirective) {
        self.directives.push(directive);
    }

    pub fn dispatches(&self) -> &[Dispatch] {
        &self.dispatches
    }

    pub fn directives(&self) -> &[TimerDirective] {
        &self.directives
    }

    pub fn events(&self) -> impl Iterator<Item = &PartyEvent> {
        self.dispatches.iter().map(|dispatch| &dispatch.event)
    }

    pub fn is_empty(&self) -> bool {
        self.dispatches.is_empty() && self.directives.is_empty()
    }

    pub fn take(&mut self) -> (Vec<Dispatch>, Vec<TimerDirective>) {
        (
            std::mem::take(&mut self.dispatches),
            std::mem::take(&mut self.directives),
        )
    }
}
