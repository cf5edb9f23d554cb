use crate::state::PlayerId;

use super::{Fighter, HitEffect};

/// Dice and evasion draws for one exchange, drawn by the party.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExchangeRolls {
    pub attack_roll: u32,
    pub defense_roll: u32,
    pub evaded: bool,
}

/// Result of one attack exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AttackReport {
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub attack_total: u32,
    pub defense_total: u32,
    pub evaded: bool,
    pub hit: Option<HitEffect>,
    pub attacker_life: u32,
    pub defender_life: u32,
}

/// How a fight stands after an exchange or escape attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FightStatus {
    Ongoing,
    Won { winner: PlayerId, loser: PlayerId },
    Escaped { by: PlayerId },
}

/// Two fighters and whose exchange it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fight {
    fighters: [Fighter; 2],
    active: usize,
}

impl Fight {
    /// The faster fighter opens; ties favour the initiator.
    pub fn new(initiator: Fighter, opponent: Fighter) -> Self {
        let active = usize::from(opponent.speed > initiator.speed);
        Self {
            fighters: [initiator, opponent],
            active,
        }
    }

    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    pub fn initiator(&self) -> &Fighter {
        &self.fighters[0]
    }

    /// Fighter whose turn it is to attack or escape.
    pub fn active(&self) -> &Fighter {
        &self.fighters[self.active]
    }

    pub fn passive(&self) -> &Fighter {
        &self.fighters[1 - self.active]
    }

    pub fn involves(&self, pid: PlayerId) -> bool {
        self.fighters.iter().any(|fighter| fighter.pid == pid)
    }

    pub fn opponent_of(&self, pid: PlayerId) -> Option<&Fighter> {
        match (self.fighters[0].pid == pid, self.fighters[1].pid == pid) {
            (true, _) => Some(&self.fighters[1]),
            (_, true) => Some(&self.fighters[0]),
            _ => None,
        }
    }

    pub fn switch_turn(&mut self) {
        self.active = 1 - self.active;
    }

    /// Resolves the active fighter's attack on the passive one.
    ///
    /// A hit lands for one life point when the defender does not evade and
    /// the attack total beats the defense total. Turn passes on unless the
    /// defender died.
    pub fn resolve_attack(&mut self, rolls: ExchangeRolls) -> (AttackReport, FightStatus) {
        let (attacker, defender) = self.split_active();

        let attack_total = attacker.attack + rolls.attack_roll;
        let defense_total = defender.defense + rolls.defense_roll;
        let damage = attack_total.saturating_sub(defense_total);

        let hit = (!rolls.evaded && damage > 0).then(|| defender.receive_hit(attacker));

        let report = AttackReport {
            attacker: attacker.pid,
            defender: defender.pid,
            attack_total,
            defense_total,
            evaded: rolls.evaded,
            hit,
            attacker_life: attacker.life,
            defender_life: defender.life,
        };

        let status = if defender.is_dead() {
            FightStatus::Won {
                winner: attacker.pid,
                loser: defender.pid,
            }
        } else if attacker.is_dead() {
            // A life swap can hand a dying total to the attacker.
            FightStatus::Won {
                winner: defender.pid,
                loser: attacker.pid,
            }
        } else {
            self.switch_turn();
            FightStatus::Ongoing
        };

        (report, status)
    }

    /// Spends one escape attempt of the active fighter. `succeeded` is the
    /// party's draw. Returns `None` when no attempts are left.
    pub fn attempt_escape(&mut self, succeeded: bool) -> Option<FightStatus> {
        let fighter = &mut self.fighters[self.active];
        if !fighter.can_escape() {
            return None;
        }
        fighter.remain_escape -= 1;
        let pid = fighter.pid;

        if succeeded {
            Some(FightStatus::Escaped { by: pid })
        } else {
            self.switch_turn();
            Some(FightStatus::Ongoing)
        }
    }

    pub fn into_fighters(self) -> [Fighter; 2] {
        self.fighters
    }

    fn split_active(&mut self) -> (&mut Fighter, &mut Fighter) {
        let [first, second] = &mut self.fighters;
        if self.active == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }
}
