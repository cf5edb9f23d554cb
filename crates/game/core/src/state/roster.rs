use super::{Player, PlayerId, Position};
use crate::config::PartyConfig;

/// Player records of one party, in join order.
///
/// This is the in-memory side of the party data store: lookups keyed by an
/// absent player return `None`/`false` instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Non-forfeited player standing on `position`.
    pub fn occupant_at(&self, position: Position) -> Option<&Player> {
        self.players
            .iter()
            .find(|player| player.is_active() && player.position() == position)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupant_at(position).is_some()
    }

    /// Positions of every active player except `except`.
    pub fn occupied_positions(&self, except: PlayerId) -> Vec<Position> {
        self.players
            .iter()
            .filter(|player| player.is_active() && player.id != except)
            .map(Player::position)
            .collect()
    }

    pub fn update_position(&mut self, id: PlayerId, position: Position) -> bool {
        let Some(player) = self.get_mut(id) else {
            return false;
        };
        player.placement.previous = player.placement.current;
        player.placement.current = position;
        true
    }

    pub fn reset_attributes(&mut self, id: PlayerId) -> bool {
        let Some(player) = self.get_mut(id) else {
            return false;
        };
        player.reset_round_attributes();
        true
    }

    /// Marks `id` as the only current player.
    pub fn set_current(&mut self, id: PlayerId) {
        for player in &mut self.players {
            player.is_current = player.id == id;
        }
    }

    pub fn current(&self) -> Option<&Player> {
        self.players.iter().find(|player| player.is_current)
    }

    pub fn decrement_remaining_action(&mut self, id: PlayerId) -> bool {
        match self.get_mut(id) {
            Some(player) if player.actions_left > 0 => {
                player.actions_left -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|player| player.is_active()).count()
    }

    pub fn active_human_count(&self) -> usize {
        self.players
            .iter()
            .filter(|player| player.is_active() && !player.is_virtual())
            .count()
    }

    /// Player ids ordered for the rotation: fastest first, ties by join order.
    pub fn speed_order(&self) -> Vec<PlayerId> {
        let mut order: Vec<&Player> = self.players.iter().collect();
        order.sort_by(|a, b| b.stats.speed.cmp(&a.stats.speed));
        order.into_iter().map(|player| player.id).collect()
    }

    pub fn has_room(&self) -> bool {
        self.players.len() < PartyConfig::MAX_PLAYERS
    }
}
