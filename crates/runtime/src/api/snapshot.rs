//! Read-only view of a party handed out by its worker.
use serde::{Deserialize, Serialize};

use tactics_core::{Fighter, Party, PartyId, Player, PlayerId, TurnPhase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySnapshot {
    pub id: PartyId,
    pub phase: TurnPhase,
    pub current_player: Option<PlayerId>,
    pub turn_order: Vec<PlayerId>,
    pub rounds: u32,
    pub debug: bool,
    pub winner: Option<PlayerId>,
    /// Encoded cell values, row by row.
    pub map: Vec<Vec<u16>>,
    pub players: Vec<Player>,
    pub fighters: Option<Vec<Fighter>>,
    /// Seconds left on the countdown or round timer.
    pub remaining_secs: Option<u32>,
}

impl PartySnapshot {
    pub(crate) fn capture(party: &Party, remaining_secs: Option<u32>) -> Self {
        Self {
            id: party.id().clone(),
            phase: party.phase(),
            current_player: party.current_player(),
            turn_order: party.turn_order().to_vec(),
            rounds: party.rounds(),
            debug: party.is_debug(),
            winner: party.winner(),
            map: party.grid().to_rows(),
            players: party.roster().iter().cloned().collect(),
            fighters: party.fighters().map(|fighters| fighters.to_vec()),
            remaining_secs,
        }
    }

    pub fn player(&self, pid: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == pid)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TurnPhase::Finished
    }
}
