//! Participant state of a party.
//!
//! Identifiers and coordinates shared by every module, the per-player record
//! and the roster that stands in for the party's player store.
mod common;
mod player;
mod roster;

pub use common::{Direction, PartyId, PlayerId, Position};
pub use player::{
    BotProfile, EffectFlags, Inventory, Placement, Player, PlayerKind, PlayerStats, Stat,
};
pub use roster::Roster;
