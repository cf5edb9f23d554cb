use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::{PlayerId, Position};
use crate::combat::DiceAssignment;
use crate::config::PartyConfig;
use crate::grid::ItemKind;

pub type Inventory = ArrayVec<ItemKind, { PartyConfig::INVENTORY_SLOTS }>;

bitflags! {
    /// Item-granted effects currently active on a player.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EffectFlags: u8 {
        const SECOND_CHANCE = 1 << 0;
        const SWAP_OPPONENT_LIFE = 1 << 1;
        const DOUBLE_ICE_BREAK = 1 << 2;
        const DECREASE_LOSER_WINS = 1 << 3;
    }
}

impl EffectFlags {
    pub fn from_item(item: ItemKind) -> Self {
        match item {
            ItemKind::SecondChance => Self::SECOND_CHANCE,
            ItemKind::SwapLife => Self::SWAP_OPPONENT_LIFE,
            ItemKind::DoubleIceBreak => Self::DOUBLE_ICE_BREAK,
            ItemKind::DecreaseLoserWins => Self::DECREASE_LOSER_WINS,
            _ => Self::empty(),
        }
    }
}

/// Who drives a player's intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PlayerKind {
    Human,
    /// Driven by an external bot policy through the regular intent surface.
    Virtual(BotProfile),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BotProfile {
    Aggressive,
    Defensive,
}

/// A stat with its unmodified base and its current (boosted) value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stat {
    pub base: u32,
    pub value: u32,
}

impl Stat {
    pub const fn new(base: u32) -> Self {
        Self { base, value: base }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlayerStats {
    pub max_life: u32,
    pub life: u32,
    pub speed: u32,
    pub attack: Stat,
    pub defense: Stat,
    pub dice: DiceAssignment,
}

impl PlayerStats {
    pub const fn new(life: u32, speed: u32, attack: u32, defense: u32, dice: DiceAssignment) -> Self {
        Self {
            max_life: life,
            life,
            speed,
            attack: Stat::new(attack),
            defense: Stat::new(defense),
            dice,
        }
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(4, 4, 4, 4, DiceAssignment::default())
    }
}

/// Where a player is, was one step ago, and spawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub current: Position,
    pub previous: Position,
    pub start: Position,
}

/// Live record of one participant.
///
/// Fields mirror what the session store keeps per player; the party engine
/// reads them and mutates them through [`crate::state::Roster`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub is_organizer: bool,
    pub placement: Placement,
    pub stats: PlayerStats,
    pub movement_left: u32,
    pub actions_left: u32,
    pub effects: EffectFlags,
    pub forfeited: bool,
    pub is_current: bool,
    pub items: Inventory,
    pub wins: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind, stats: PlayerStats) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            is_organizer: false,
            placement: Placement::default(),
            stats,
            movement_left: stats.speed,
            actions_left: PartyConfig::ACTIONS_PER_ROUND,
            effects: EffectFlags::empty(),
            forfeited: false,
            is_current: false,
            items: Inventory::new(),
            wins: 0,
        }
    }

    pub fn organizer(mut self) -> Self {
        self.is_organizer = true;
        self
    }

    pub fn position(&self) -> Position {
        self.placement.current
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.kind, PlayerKind::Virtual(_))
    }

    /// Still taking part in the rotation.
    pub fn is_active(&self) -> bool {
        !self.forfeited
    }

    pub fn holds(&self, item: ItemKind) -> bool {
        self.items.contains(&item)
    }

    /// Restores the per-round budgets.
    pub fn reset_round_attributes(&mut self) {
        self.movement_left = self.stats.speed;
        self.actions_left = PartyConfig::ACTIONS_PER_ROUND;
    }

    /// Adds an item and recomputes derived stats. Returns false when every
    /// slot is taken.
    pub fn take_item(&mut self, item: ItemKind) -> bool {
        if self.items.try_push(item).is_err() {
            return false;
        }
        self.refresh_item_effects();
        true
    }

    /// Removes one instance of `item`; false if the player does not hold it.
    pub fn drop_item(&mut self, item: ItemKind) -> bool {
        let Some(index) = self.items.iter().position(|held| *held == item) else {
            return false;
        };
        self.items.remove(index);
        self.refresh_item_effects();
        true
    }

    /// Empties the inventory.
    pub fn drain_items(&mut self) -> Vec<ItemKind> {
        let items = self.items.drain(..).collect();
        self.refresh_item_effects();
        items
    }

    pub fn must_choose_item(&self) -> bool {
        self.items.len() > PartyConfig::MAX_INVENTORY
    }

    /// Recomputes effect flags and boosted stats from the inventory.
    pub fn refresh_item_effects(&mut self) {
        self.effects = self
            .items
            .iter()
            .fold(EffectFlags::empty(), |flags, &item| flags | EffectFlags::from_item(item));

        let bonus = |kind| {
            self.items.iter().filter(|&&held| held == kind).count() as u32 * PartyConfig::ITEM_BONUS
        };
        let attack_bonus = bonus(ItemKind::AttackBoost);
        let defense_bonus = bonus(ItemKind::DefenseBoost);
        self.stats.attack.value = self.stats.attack.base + attack_bonus;
        self.stats.defense.value = self.stats.defense.base + defense_bonus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(PlayerId(1), "ada", PlayerKind::Human, PlayerStats::default())
    }

    #[test]
    fn boosts_follow_the_inventory() {
        let mut player = player();
        assert!(player.take_item(ItemKind::AttackBoost));
        assert!(player.take_item(ItemKind::SwapLife));
        assert_eq!(player.stats.attack.value, 6);
        assert!(player.effects.contains(EffectFlags::SWAP_OPPONENT_LIFE));

        assert!(player.drop_item(ItemKind::AttackBoost));
        assert_eq!(player.stats.attack.value, 4);
        assert!(!player.drop_item(ItemKind::Flag));
    }

    #[test]
    fn third_item_requires_a_choice() {
        let mut player = player();
        player.take_item(ItemKind::Flag);
        player.take_item(ItemKind::DefenseBoost);
        assert!(!player.must_choose_item());
        player.take_item(ItemKind::SecondChance);
        assert!(player.must_choose_item());
        assert!(!player.take_item(ItemKind::SwapLife));
    }

    #[test]
    fn reset_restores_round_budgets() {
        let mut player = player();
        player.movement_left = 0;
        player.actions_left = 0;
        player.reset_round_attributes();
        assert_eq!(player.movement_left, 4);
        assert_eq!(player.actions_left, 1);
    }
}
