//! Round-robin turn bookkeeping.
//!
//! [`TurnCycle`] only tracks whose turn it is and which phase the party is
//! in. Timers live in the runtime; the party tells them what to do through
//! [`crate::events::TimerDirective`].

use crate::state::{PlayerId, Roster};

/// Why a running round timer was stopped without ending the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PauseReason {
    Fight,
    ItemChoice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TurnPhase {
    /// Created but not started.
    Setup,
    /// Pre-round delay before the current player may act.
    Countdown,
    /// Round timer running.
    Active,
    /// Round timer stopped by a fight or an item choice.
    Paused(PauseReason),
    /// Party over; no further rounds.
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnCycle {
    order: Vec<PlayerId>,
    index: usize,
    rounds: u32,
    phase: TurnPhase,
}

impl TurnCycle {
    pub fn new(order: Vec<PlayerId>) -> Self {
        Self {
            order,
            index: 0,
            rounds: 0,
            phase: TurnPhase::Setup,
        }
    }

    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn current(&self) -> Option<PlayerId> {
        self.order.get(self.index).copied()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    /// Completed rounds so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_active(&self) -> bool {
        self.phase == TurnPhase::Active
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TurnPhase::Finished
    }

    /// Moves to the next non-forfeited player, wrapping around.
    ///
    /// Falls back to the current player when everyone else has forfeited.
    pub fn advance(&mut self, roster: &Roster) -> Option<PlayerId> {
        if self.order.is_empty() {
            return None;
        }

        let len = self.order.len();
        let next = (1..=len)
            .map(|offset| (self.index + offset) % len)
            .find(|&candidate| {
                roster
                    .get(self.order[candidate])
                    .is_some_and(|player| player.is_active())
            })
            .unwrap_or(self.index);

        self.index = next;
        self.rounds += 1;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Player, PlayerKind, PlayerStats};

    fn roster(ids: &[u32]) -> Roster {
        Roster::new(
            ids.iter()
                .map(|&id| Player::new(PlayerId(id), "p", PlayerKind::Human, PlayerStats::default()))
                .collect(),
        )
    }

    #[test]
    fn rotation_wraps_and_skips_forfeited() {
        let mut roster = roster(&[1, 2, 3]);
        roster.get_mut(PlayerId(2)).unwrap().forfeited = true;
        let mut cycle = TurnCycle::new(vec![PlayerId(1), PlayerId(2), PlayerId(3)]);

        assert_eq!(cycle.advance(&roster), Some(PlayerId(3)));
        assert_eq!(cycle.advance(&roster), Some(PlayerId(1)));
        assert_eq!(cycle.rounds(), 2);
    }

    #[test]
    fn lone_survivor_keeps_the_turn() {
        let mut roster = roster(&[1, 2]);
        roster.get_mut(PlayerId(2)).unwrap().forfeited = true;
        let mut cycle = TurnCycle::new(vec![PlayerId(1), PlayerId(2)]);

        assert_eq!(cycle.advance(&roster), Some(PlayerId(1)));
        assert_eq!(cycle.advance(&roster), Some(PlayerId(1)));
    }

    #[test]
    fn empty_order_never_panics() {
        let mut cycle = TurnCycle::new(Vec::new());
        assert_eq!(cycle.advance(&Roster::default()), None);
        assert_eq!(cycle.current(), None);
    }
}
