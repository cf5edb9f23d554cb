use crate::config::PartyConfig;
use crate::state::{EffectFlags, Player, PlayerId};

use super::DiceAssignment;

/// Combat-scoped projection of a player.
///
/// Created when a fight starts and discarded when it ends. Changes to life
/// and consumed effects are written back to the player explicitly by the
/// party once the fight is over.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Fighter {
    pub pid: PlayerId,
    pub life: u32,
    pub max_life: u32,
    pub speed: u32,
    pub attack: u32,
    pub defense: u32,
    pub dice: DiceAssignment,
    pub remain_escape: u32,
    pub on_ice: bool,
    /// One-shot effects still available in this fight.
    pub effects: EffectFlags,
    /// One-shot effects used up during this fight.
    pub consumed: EffectFlags,
}

/// What a landed hit did to the defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum HitEffect {
    /// One life point lost.
    Damaged,
    /// Life totals exchanged instead of taking the hit.
    LifeSwapped,
    /// Dropped to the threshold and was topped up.
    SecondChance,
}

impl Fighter {
    /// Projects `player` into the fight.
    ///
    /// `ice_penalty` is already scaled for the opponent's double-ice-break
    /// and only applies when `on_ice`.
    pub fn from_player(player: &Player, on_ice: bool, ice_penalty: u32, escape_attempts: u32) -> Self {
        let penalty = if on_ice { ice_penalty } else { 0 };
        let one_shots = EffectFlags::SECOND_CHANCE | EffectFlags::SWAP_OPPONENT_LIFE;

        Self {
            pid: player.id,
            life: player.stats.life,
            max_life: player.stats.max_life,
            speed: player.stats.speed,
            attack: player.stats.attack.value.saturating_sub(penalty),
            defense: player.stats.defense.value.saturating_sub(penalty),
            dice: player.stats.dice,
            remain_escape: escape_attempts,
            on_ice,
            effects: player.effects & one_shots,
            consumed: EffectFlags::empty(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }

    pub fn can_escape(&self) -> bool {
        self.remain_escape > 0
    }

    /// Applies one landed hit, firing one-shot effects at their thresholds.
    pub fn receive_hit(&mut self, opponent: &mut Fighter) -> HitEffect {
        if self.effects.contains(EffectFlags::SWAP_OPPONENT_LIFE)
            && self.life == PartyConfig::SWAP_LIFE_THRESHOLD
        {
            self.consume(EffectFlags::SWAP_OPPONENT_LIFE);
            std::mem::swap(&mut self.life, &mut opponent.life);
            return HitEffect::LifeSwapped;
        }

        self.life = self.life.saturating_sub(1);

        if self.effects.contains(EffectFlags::SECOND_CHANCE)
            && self.life == PartyConfig::SECOND_CHANCE_THRESHOLD
        {
            self.consume(EffectFlags::SECOND_CHANCE);
            self.life += PartyConfig::SECOND_CHANCE_BONUS;
            return HitEffect::SecondChance;
        }

        HitEffect::Damaged
    }

    fn consume(&mut self, effect: EffectFlags) {
        self.effects.remove(effect);
        self.consumed.insert(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ItemKind;
    use crate::state::{PlayerKind, PlayerStats};

    fn fighter(id: u32, life: u32, items: &[ItemKind]) -> Fighter {
        let mut player = Player::new(
            PlayerId(id),
            "f",
            PlayerKind::Human,
            PlayerStats::new(life, 4, 4, 4, DiceAssignment::default()),
        );
        for &item in items {
            player.take_item(item);
        }
        Fighter::from_player(&player, false, PartyConfig::ICE_PENALTY, 2)
    }

    #[test]
    fn swap_fires_at_two_life_and_clears_the_flag() {
        let mut holder = fighter(1, 2, &[ItemKind::SwapLife]);
        let mut opponent = fighter(2, 5, &[]);

        assert_eq!(holder.receive_hit(&mut opponent), HitEffect::LifeSwapped);
        assert_eq!(holder.life, 5);
        assert_eq!(opponent.life, 2);
        assert!(!holder.effects.contains(EffectFlags::SWAP_OPPONENT_LIFE));
        assert!(holder.consumed.contains(EffectFlags::SWAP_OPPONENT_LIFE));

        assert_eq!(holder.receive_hit(&mut opponent), HitEffect::Damaged);
        assert_eq!(holder.life, 4);
    }

    #[test]
    fn swap_stays_armed_below_two_life() {
        let mut holder = fighter(1, 1, &[ItemKind::SwapLife]);
        let mut opponent = fighter(2, 5, &[]);

        assert_eq!(holder.receive_hit(&mut opponent), HitEffect::Damaged);
        assert!(holder.is_dead());
        assert_eq!(opponent.life, 5);
        assert!(holder.effects.contains(EffectFlags::SWAP_OPPONENT_LIFE));
    }

    #[test]
    fn second_chance_tops_up_at_one_life() {
        let mut holder = fighter(1, 3, &[ItemKind::SecondChance]);
        let mut opponent = fighter(2, 4, &[]);

        assert_eq!(holder.receive_hit(&mut opponent), HitEffect::Damaged);
        assert_eq!(holder.receive_hit(&mut opponent), HitEffect::SecondChance);
        assert_eq!(holder.life, 3);
        assert!(holder.effects.is_empty());
    }

    #[test]
    fn dies_at_zero() {
        let mut weak = fighter(1, 1, &[]);
        let mut opponent = fighter(2, 4, &[]);
        weak.receive_hit(&mut opponent);
        assert!(weak.is_dead());
    }

    #[test]
    fn ice_lowers_attack_and_defense() {
        let player = Player::new(PlayerId(1), "f", PlayerKind::Human, PlayerStats::default());
        let on_ice = Fighter::from_player(&player, true, PartyConfig::ICE_PENALTY, 2);
        assert_eq!(on_ice.attack, 2);
        assert_eq!(on_ice.defense, 2);
        let doubled = Fighter::from_player(&player, true, PartyConfig::ICE_PENALTY * 2, 2);
        assert_eq!(doubled.attack, 0);
    }
}
