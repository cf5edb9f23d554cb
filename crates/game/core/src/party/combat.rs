use super::Party;
use crate::action::ActionOutcome;
use crate::combat::{ExchangeRolls, Fight, FightStatus, Fighter, RollContext, RollKind};
use crate::config::PartyConfig;
use crate::error::PartyError;
use crate::events::{LogEvent, PartyEvent};
use crate::grid::ItemKind;
use crate::respawn::{self, DropSite};
use crate::state::{EffectFlags, Player, PlayerId};
use crate::turn::PauseReason;

/// How a fight came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FightEnd {
    Won { winner: PlayerId, loser: PlayerId },
    Escaped,
    /// `loser` forfeited mid-fight; nobody is credited a win.
    Abandoned { winner: PlayerId, loser: PlayerId },
}

/// Ice penalty `player` suffers against `foe`.
fn ice_penalty_against(foe: &Player) -> u32 {
    if foe.holds(ItemKind::DoubleIceBreak) {
        PartyConfig::ICE_PENALTY * 2
    } else {
        PartyConfig::ICE_PENALTY
    }
}

impl Party {
    /// Pauses the round and opens a fight between the current player and an
    /// adjacent opponent.
    pub(super) fn start_fight(&mut self, initiator: PlayerId, opponent: PlayerId) {
        let (Some(a), Some(b)) = (self.roster.get(initiator), self.roster.get(opponent)) else {
            return;
        };
        let project = |player: &Player, foe: &Player| {
            Fighter::from_player(
                player,
                self.grid.is_ice(player.position()),
                ice_penalty_against(foe),
                self.config.escape_attempts,
            )
        };
        let fight = Fight::new(project(a, b), project(b, a));

        self.pause_round(PauseReason::Fight);
        self.outbox.log(LogEvent::StartCombat {
            initiator,
            opponent,
        });
        self.outbox.broadcast(PartyEvent::FightStarted {
            fighters: fight.fighters().to_vec(),
        });
        self.outbox.broadcast(PartyEvent::FightTurn {
            player: fight.active().pid,
        });
        self.fight = Some(fight);
    }

    /// The active fighter attacks.
    ///
    /// In debug mode the attacker's die shows its highest face and the
    /// defender's shows 1.
    pub fn handle_attack(&mut self) -> Result<ActionOutcome, PartyError> {
        self.ensure_running()?;
        let fight = self.fight.as_ref().ok_or(PartyError::NoActiveFight)?;
        let (attacker, attack_die) = (fight.active().pid, fight.active().dice.attack);
        let (defender, defense_die) = (fight.passive().pid, fight.passive().dice.defense);

        let (attack_roll, defense_roll) = if self.debug {
            (attack_die.max_face(), 1)
        } else {
            (
                self.roller
                    .roll_die(attacker, attack_die.max_face(), RollContext::Attack),
                self.roller
                    .roll_die(defender, defense_die.max_face(), RollContext::Defense),
            )
        };
        let evaded = self
            .roller
            .chance(defender, self.config.evasion_chance, RollContext::Evasion);

        self.outbox.broadcast(PartyEvent::DiceRolled {
            pid: attacker,
            dice_type: attack_die,
            roll: RollKind::Attack,
            result: attack_roll,
        });
        self.outbox.broadcast(PartyEvent::DiceRolled {
            pid: defender,
            dice_type: defense_die,
            roll: RollKind::Defense,
            result: defense_roll,
        });

        let fight = self.fight.as_mut().ok_or(PartyError::NoActiveFight)?;
        let (report, status) = fight.resolve_attack(ExchangeRolls {
            attack_roll,
            defense_roll,
            evaded,
        });
        let next = fight.active().pid;

        self.outbox.log(LogEvent::Attack {
            attacker,
            defender,
            total: report.attack_total,
            hit: report.hit.is_some(),
        });
        self.outbox.log(LogEvent::Defense {
            defender,
            total: report.defense_total,
            evaded,
        });
        self.outbox.broadcast(PartyEvent::AttackResolved(report));

        match status {
            FightStatus::Ongoing => self
                .outbox
                .broadcast(PartyEvent::FightTurn { player: next }),
            FightStatus::Won { winner, loser } => {
                self.finish_fight(FightEnd::Won { winner, loser })
            }
            FightStatus::Escaped { .. } => self.finish_fight(FightEnd::Escaped),
        }
        Ok(ActionOutcome::Applied)
    }

    /// The active fighter tries to flee. Rejected once their attempts are
    /// spent.
    pub fn handle_escape(&mut self) -> Result<ActionOutcome, PartyError> {
        self.ensure_running()?;
        let fight = self.fight.as_ref().ok_or(PartyError::NoActiveFight)?;
        let player = fight.active().pid;
        if !fight.active().can_escape() {
            return Ok(self.reject(player));
        }

        let succeeded = self
            .roller
            .chance(player, self.config.escape_chance, RollContext::Escape);

        let fight = self.fight.as_mut().ok_or(PartyError::NoActiveFight)?;
        let Some(status) = fight.attempt_escape(succeeded) else {
            return Ok(self.reject(player));
        };
        let remaining = fight
            .fighters()
            .iter()
            .find(|fighter| fighter.pid == player)
            .map_or(0, |fighter| fighter.remain_escape);
        let next = fight.active().pid;

        self.outbox.log(LogEvent::Escape { player, succeeded });
        self.outbox.broadcast(PartyEvent::EscapeAttempted {
            player,
            succeeded,
            remaining,
        });

        match status {
            FightStatus::Escaped { .. } => self.finish_fight(FightEnd::Escaped),
            _ => self
                .outbox
                .broadcast(PartyEvent::FightTurn { player: next }),
        }
        Ok(ActionOutcome::Applied)
    }

    /// Writes the fight back into the roster and settles the round.
    pub(super) fn finish_fight(&mut self, end: FightEnd) {
        let Some(fight) = self.fight.take() else {
            return;
        };

        for fighter in fight.into_fighters() {
            let Some(player) = self.roster.get_mut(fighter.pid) else {
                continue;
            };
            player.stats.life = player.stats.max_life;
            if fighter.consumed.contains(EffectFlags::SWAP_OPPONENT_LIFE) {
                player.drop_item(ItemKind::SwapLife);
            }
            if fighter.consumed.contains(EffectFlags::SECOND_CHANCE) {
                player.drop_item(ItemKind::SecondChance);
            }
        }

        let (winner, loser) = match end {
            FightEnd::Won { winner, loser } | FightEnd::Abandoned { winner, loser } => {
                (Some(winner), Some(loser))
            }
            FightEnd::Escaped => (None, None),
        };
        self.outbox.log(LogEvent::EndCombat { winner, loser });
        self.outbox
            .broadcast(PartyEvent::FightEnded { winner, loser });

        if let FightEnd::Won { winner, loser } = end {
            let wins = self.credit_win(winner, loser);
            self.defeat(loser);
            if wins >= self.config.wins_to_victory {
                self.end_game(Some(winner));
                return;
            }
        }

        self.broadcast_player_list();
        self.settle_interruption(loser);
    }

    /// Returns the winner's new win count.
    fn credit_win(&mut self, winner: PlayerId, loser: PlayerId) -> u32 {
        let mut decrease = false;
        let mut wins = 0;
        if let Some(player) = self.roster.get_mut(winner) {
            player.wins += 1;
            wins = player.wins;
            decrease = player.holds(ItemKind::DecreaseLoserWins);
        }
        if decrease && let Some(player) = self.roster.get_mut(loser) {
            player.wins = player.wins.saturating_sub(1);
        }
        wins
    }

    /// Drops the loser's items where they fell and sends them home.
    fn defeat(&mut self, loser: PlayerId) {
        let Some(origin) = self.roster.get(loser).map(Player::position) else {
            return;
        };
        self.scatter_items(loser, DropSite::At(origin));

        if let Some(position) = respawn::replace_player(&self.grid, &mut self.roster, loser) {
            self.outbox.broadcast(PartyEvent::PlayerRespawned {
                player: loser,
                position,
            });
        }
    }

    /// Strips `pid` of every item and redistributes them around `site`.
    pub(super) fn scatter_items(&mut self, pid: PlayerId, site: DropSite) {
        let drop = respawn::replace_items(&mut self.grid, &mut self.roster, pid, site);
        if drop.lost_flag {
            self.outbox.log(LogEvent::ItemLost {
                player: pid,
                item: ItemKind::Flag,
            });
        }
        if !drop.placements.is_empty() {
            self.outbox.broadcast(PartyEvent::ItemsReplaced {
                placements: drop.placements,
            });
        }
    }
}
