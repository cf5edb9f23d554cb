use super::Party;
use super::combat::FightEnd;
use crate::action::{self, ActionOutcome, ActionTarget, WalkStop};
use crate::error::PartyError;
use crate::events::{DoorState, LogEvent, PartyEvent};
use crate::grid::ItemKind;
use crate::respawn::{self, DropSite};
use crate::state::{PlayerId, Position};
use crate::turn::{PauseReason, TurnPhase};

impl Party {
    /// Acts on an adjacent cell: fights the opponent standing there or
    /// toggles the door.
    ///
    /// Rejected unless `pid` holds the turn, has an action left and `target`
    /// is one of their interactive positions.
    pub fn execute_action(&mut self, pid: PlayerId, target: Position) -> Result<ActionOutcome, PartyError> {
        self.ensure_running()?;
        let has_action = self
            .roster
            .get(pid)
            .is_some_and(|player| player.actions_left > 0);
        if !self.is_turn_of(pid) || !has_action {
            return Ok(self.reject(pid));
        }
        let Some(kind) = action::classify(&self.grid, &self.roster, pid, target) else {
            return Ok(self.reject(pid));
        };

        self.roster.decrement_remaining_action(pid);
        match kind {
            ActionTarget::Opponent(opponent) => self.start_fight(pid, opponent),
            ActionTarget::Door => {
                self.toggle_door(pid, target);
                self.outbox
                    .unicast(pid, PartyEvent::ActionFinished { player: pid });
                if self.round_exhausted(pid) {
                    self.finish_round();
                }
            }
        }
        Ok(ActionOutcome::Applied)
    }

    fn toggle_door(&mut self, pid: PlayerId, door: Position) {
        let Some(state) = action::toggle_door(&mut self.grid, door) else {
            return;
        };
        self.outbox.log(match state {
            DoorState::Open => LogEvent::OpenDoor {
                player: pid,
                position: door,
            },
            DoorState::Closed => LogEvent::CloseDoor {
                player: pid,
                position: door,
            },
        });
        self.outbox.broadcast(PartyEvent::DoorToggled {
            door_position: door,
            door_state: state,
        });
    }

    /// Walks the current player towards `target` along the computed path.
    ///
    /// The walk stops on the first collectible item. A third item pauses the
    /// round until one is dropped with [`Party::remove_player_item`].
    pub fn move_player(&mut self, pid: PlayerId, target: Position) -> Result<ActionOutcome, PartyError> {
        self.ensure_running()?;
        if !self.is_turn_of(pid) {
            return Ok(self.reject(pid));
        }
        let path = self.path(pid, target);
        if path.is_empty() {
            return Ok(self.reject(pid));
        }

        let walk = action::apply_walk(&mut self.grid, &mut self.roster, pid, &path);
        if walk.moved() {
            self.outbox.broadcast(PartyEvent::PlayerMoved {
                player: pid,
                path: walk.walked.clone(),
            });
        }

        match walk.stop {
            WalkStop::FlagHome => {
                self.end_game(Some(pid));
                return Ok(ActionOutcome::Applied);
            }
            WalkStop::ItemPicked(item) => {
                self.outbox.log(LogEvent::ItemPicked { player: pid, item });
                if let Some(player) = self.roster.get(pid)
                    && player.must_choose_item()
                {
                    let items = player.items.to_vec();
                    self.pause_round(PauseReason::ItemChoice);
                    self.outbox
                        .unicast(pid, PartyEvent::ItemChoiceRequired { player: pid, items });
                    return Ok(ActionOutcome::Applied);
                }
                self.broadcast_player_list();
            }
            WalkStop::Completed | WalkStop::Blocked => {}
        }

        if self.round_exhausted(pid) {
            self.finish_round();
        }
        Ok(ActionOutcome::Applied)
    }

    /// Drops `item` while an item choice is pending for `pid`. The item lands
    /// under the player, or on the nearest free cell.
    pub fn remove_player_item(&mut self, pid: PlayerId, item: ItemKind) -> Result<ActionOutcome, PartyError> {
        self.ensure_running()?;
        let choosing = self.turn.phase() == TurnPhase::Paused(PauseReason::ItemChoice)
            && self.turn.current() == Some(pid);
        if !choosing {
            return Ok(self.reject(pid));
        }
        let dropped_at = self
            .roster
            .get_mut(pid)
            .and_then(|player| player.drop_item(item).then(|| player.position()));
        let Some(origin) = dropped_at else {
            return Ok(self.reject(pid));
        };

        if let Some(placement) = respawn::place_item(&mut self.grid, &self.roster, item, DropSite::At(origin)) {
            self.outbox.broadcast(PartyEvent::ItemsReplaced {
                placements: vec![placement],
            });
        }
        if item == ItemKind::Flag {
            self.outbox.log(LogEvent::ItemLost { player: pid, item });
        }
        self.broadcast_player_list();
        self.settle_interruption(None);
        Ok(ActionOutcome::Applied)
    }

    /// Forfeits `pid` for the rest of the party.
    ///
    /// Their items are scattered around their cell. The party ends by default
    /// when at most one player, or no human, is left.
    pub fn give_up(&mut self, pid: PlayerId) -> Result<ActionOutcome, PartyError> {
        self.ensure_running()?;
        if self.turn.phase() == TurnPhase::Setup {
            return Ok(self.reject(pid));
        }
        let Some(player) = self.roster.get_mut(pid) else {
            return Err(PartyError::UnknownPlayer(pid));
        };
        if player.forfeited {
            return Ok(self.reject(pid));
        }
        player.forfeited = true;
        let origin = player.position();
        let was_organizer = player.is_organizer;

        self.outbox.log(LogEvent::GiveUp { player: pid });
        self.scatter_items(pid, DropSite::Around(origin));

        if self.roster.active_count() <= 1 || self.roster.active_human_count() == 0 {
            let survivor = self
                .roster
                .iter()
                .find(|player| player.is_active())
                .filter(|_| self.roster.active_count() == 1)
                .map(|player| player.id);
            self.end_game(survivor);
            return Ok(ActionOutcome::Applied);
        }

        if was_organizer && self.debug {
            self.set_debug(pid, false);
        }
        self.broadcast_player_list();

        let opponent = self
            .fight
            .as_ref()
            .and_then(|fight| fight.opponent_of(pid))
            .map(|fighter| fighter.pid);
        if let Some(winner) = opponent {
            self.finish_fight(FightEnd::Abandoned { winner, loser: pid });
        } else if self.turn.current() == Some(pid) {
            self.finish_round();
        }
        Ok(ActionOutcome::Applied)
    }

    /// Organizer-only switch for debug mode.
    pub fn toggle_debug_mode(&mut self, pid: PlayerId) -> Result<ActionOutcome, PartyError> {
        self.ensure_running()?;
        if !self.roster.get(pid).is_some_and(|player| player.is_organizer) {
            return Ok(self.reject(pid));
        }
        self.set_debug(pid, !self.debug);
        Ok(ActionOutcome::Applied)
    }

    /// Debug-mode jump of the current player to any free walkable cell.
    pub fn teleport(&mut self, pid: PlayerId, target: Position) -> Result<ActionOutcome, PartyError> {
        self.ensure_running()?;
        if !self.debug || !self.is_turn_of(pid) {
            return Ok(self.reject(pid));
        }
        if !respawn::teleport_player(&self.grid, &mut self.roster, pid, target) {
            return Ok(self.reject(pid));
        }
        self.outbox.broadcast(PartyEvent::PlayerTeleported {
            player: pid,
            position: target,
        });
        Ok(ActionOutcome::Applied)
    }

    fn set_debug(&mut self, pid: PlayerId, enabled: bool) {
        self.debug = enabled;
        self.outbox.log(LogEvent::DebugToggled {
            player: pid,
            enabled,
        });
        self.outbox.broadcast(PartyEvent::DebugMode { enabled });
    }
}
