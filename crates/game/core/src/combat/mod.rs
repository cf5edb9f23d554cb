//! Fight resolution.
//!
//! - [`Fighter`]: ephemeral projection of a player for one fight
//! - [`Fight`]: turn order, exchanges and escape attempts
//! - [`Roller`]: seeded dice, evasion and escape draws
//!
//! Draws are taken by the party and handed to [`Fight`] so the exchange
//! logic itself stays pure.

mod dice;
mod fight;
mod fighter;
pub mod rng;

pub use dice::{DiceAssignment, DiceType, RollKind};
pub use fight::{AttackReport, ExchangeRolls, Fight, FightStatus};
pub use fighter::{Fighter, HitEffect};
pub use rng::{PcgRng, RngOracle, RollContext, Roller, ScriptedRng};
