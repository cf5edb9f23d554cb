//! Deterministic party rules for a grid-based tactical game.
//!
//! `tactics-core` owns the grid model, movement reachability, fights, respawn
//! placement and turn rotation of one party, and exposes them through
//! [`Party`]. It performs no I/O: every operation records its notifications
//! and timer directives in an [`events::Outbox`] that the runtime drains.
pub mod action;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod party;
pub mod reach;
pub mod respawn;
pub mod state;
pub mod turn;

pub use action::{ActionOutcome, ActionTarget, Walk, WalkStop};
pub use combat::{
    AttackReport, DiceAssignment, DiceType, Fight, FightStatus, Fighter, HitEffect, PcgRng,
    RngOracle, RollKind, Roller, ScriptedRng,
};
pub use config::PartyConfig;
pub use error::{ErrorSeverity, GameError, PartyError};
pub use events::{Audience, Dispatch, DoorState, LogEvent, Outbox, PartyEvent, TimerDirective};
pub use grid::{Cell, Grid, GridError, ItemKind, TerrainKind};
pub use party::{Party, PartySetup, SetupError};
pub use reach::{Reach, Reachability};
pub use respawn::{DropSite, ItemDrop, ItemPlacement};
pub use state::{
    BotProfile, Direction, EffectFlags, PartyId, Placement, Player, PlayerId, PlayerKind,
    PlayerStats, Position, Roster,
};
pub use turn::{PauseReason, TurnCycle, TurnPhase};
