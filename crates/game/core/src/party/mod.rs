//! One live match: grid, players, rotation, fights and the outbox.
//!
//! [`Party`] is a synchronous state machine. Every operation runs to
//! completion and records what happened in its [`Outbox`]; callers drain it
//! with [`Party::drain`] after each call and route the dispatches and timer
//! directives. Creation and start are separate so that the first emissions
//! happen in [`Party::start`], never in the constructor.

mod combat;
mod intents;
mod setup;
mod turns;

#[cfg(test)]
mod tests;

pub use setup::{PartySetup, SetupError};

use crate::action::{self, ActionOutcome};
use crate::combat::{Fight, Fighter, Roller};
use crate::config::PartyConfig;
use crate::error::PartyError;
use crate::events::{Dispatch, Outbox, PartyEvent, TimerDirective};
use crate::grid::Grid;
use crate::reach::Reachability;
use crate::state::{PartyId, Player, PlayerId, Position, Roster};
use crate::turn::{TurnCycle, TurnPhase};

#[derive(Debug)]
pub struct Party {
    id: PartyId,
    config: PartyConfig,
    grid: Grid,
    roster: Roster,
    turn: TurnCycle,
    fight: Option<Fight>,
    reach: Reachability,
    roller: Roller,
    debug: bool,
    winner: Option<PlayerId>,
    destroyed: bool,
    outbox: Outbox,
}

impl Party {
    pub fn id(&self) -> &PartyId {
        &self.id
    }

    pub fn config(&self) -> &PartyConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player(&self, pid: PlayerId) -> Option<&Player> {
        self.roster.get(pid)
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    pub fn turn_order(&self) -> &[PlayerId] {
        self.turn.order()
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn.current()
    }

    pub fn rounds(&self) -> u32 {
        self.turn.rounds()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn is_finished(&self) -> bool {
        self.turn.is_finished()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Takes everything emitted since the last drain.
    pub fn drain(&mut self) -> (Vec<Dispatch>, Vec<TimerDirective>) {
        self.outbox.take()
    }

    // ===== queries =====

    /// Cells `pid` can reach with the movement left, own cell included.
    pub fn accessible_positions(&mut self, pid: PlayerId) -> Vec<Position> {
        let Some(player) = self.roster.get(pid) else {
            return Vec::new();
        };
        let (start, budget) = (player.position(), player.movement_left);
        let blocked = self.roster.occupied_positions(pid);

        self.reach
            .compute(&self.grid, start, budget, &blocked)
            .positions()
    }

    pub fn interactive_positions(&self, pid: PlayerId) -> Vec<Position> {
        action::interactive_positions(&self.grid, &self.roster, pid)
    }

    /// Hop-by-hop path from `pid`'s cell to `end`, own cell excluded.
    pub fn path(&mut self, pid: PlayerId, end: Position) -> Vec<Position> {
        let Some(player) = self.roster.get(pid) else {
            return Vec::new();
        };
        let (start, budget) = (player.position(), player.movement_left);
        let blocked = self.roster.occupied_positions(pid);

        self.reach
            .compute(&self.grid, start, budget, &blocked)
            .path_to(end)
    }

    /// Cost of walking `path` with closed doors counted as open floor.
    pub fn path_cost(&mut self, path: &[Position]) -> Option<u32> {
        self.grid.path_cost(path)
    }

    pub fn fighters(&self) -> Option<&[Fighter; 2]> {
        self.fight.as_ref().map(Fight::fighters)
    }

    // ===== shared helpers =====

    fn ensure_running(&self) -> Result<(), PartyError> {
        if self.turn.is_finished() {
            return Err(PartyError::Finished);
        }
        Ok(())
    }

    /// `pid` holds the turn and the round timer is running.
    fn is_turn_of(&self, pid: PlayerId) -> bool {
        self.turn.is_active() && self.turn.current() == Some(pid)
    }

    fn reject(&mut self, pid: PlayerId) -> ActionOutcome {
        self.outbox
            .unicast(pid, PartyEvent::ActionFinished { player: pid });
        ActionOutcome::Rejected
    }

    /// Neither an action nor a step is left for `pid` this round.
    fn round_exhausted(&mut self, pid: PlayerId) -> bool {
        let Some(player) = self.roster.get(pid) else {
            return true;
        };
        let has_action = player.actions_left > 0;
        let has_movement = player.movement_left > 0;

        let can_act = has_action && !self.interactive_positions(pid).is_empty();
        let can_move = has_movement && self.accessible_positions(pid).len() > 1;
        !can_act && !can_move
    }

    fn broadcast_player_list(&mut self) {
        let players = self.roster.iter().cloned().collect();
        self.outbox.broadcast(PartyEvent::PlayerList { players });
    }
}
