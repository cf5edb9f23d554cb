use super::Party;
use crate::action::ActionOutcome;
use crate::error::PartyError;
use crate::events::{LogEvent, PartyEvent, TimerDirective};
use crate::state::PlayerId;
use crate::turn::{PauseReason, TurnPhase};

impl Party {
    /// Opens the party: logs its beginning, publishes the roster and starts
    /// the first countdown.
    pub fn start(&mut self) -> Result<(), PartyError> {
        match self.turn.phase() {
            TurnPhase::Setup => {}
            TurnPhase::Finished => return Err(PartyError::Finished),
            _ => return Err(PartyError::AlreadyStarted),
        }

        self.outbox.log(LogEvent::BeginParty {
            players: self.turn.order().to_vec(),
        });
        if let Some(first) = self.turn.current() {
            self.roster.set_current(first);
        }
        self.broadcast_player_list();
        self.begin_countdown();
        Ok(())
    }

    /// Countdown expiry: the current player's round begins.
    pub fn countdown_elapsed(&mut self) {
        if self.turn.phase() != TurnPhase::Countdown {
            return;
        }
        let Some(player) = self.turn.current() else {
            return;
        };

        self.turn.set_phase(TurnPhase::Active);
        self.outbox.log(LogEvent::StartTurn { player });
        self.outbox.broadcast(PartyEvent::TurnStarted { player });
        if self.roster.get(player).is_some_and(|p| p.is_virtual()) {
            self.outbox
                .broadcast(PartyEvent::VirtualPlayerTurn { player });
        }
        self.outbox.timer(TimerDirective::StartRound {
            secs: self.config.round_secs,
        });
    }

    /// Round timer expiry behaves like the current player ending the round.
    pub fn round_elapsed(&mut self) {
        if self.turn.phase() == TurnPhase::Active {
            self.finish_round();
        }
    }

    /// Ends `pid`'s round early. Only the current player may do so while
    /// their round timer runs.
    pub fn end_round(&mut self, pid: PlayerId) -> Result<ActionOutcome, PartyError> {
        self.ensure_running()?;
        if !self.is_turn_of(pid) {
            return Ok(self.reject(pid));
        }
        self.finish_round();
        Ok(ActionOutcome::Applied)
    }

    /// Stops every timer. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.fight = None;
        self.turn.set_phase(TurnPhase::Finished);
        self.outbox.timer(TimerDirective::Stop);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Resets the ending player, hands the turn on and restarts the
    /// countdown.
    pub(super) fn finish_round(&mut self) {
        let Some(ending) = self.turn.current() else {
            return;
        };

        self.roster.reset_attributes(ending);
        self.outbox.log(LogEvent::EndTurn { player: ending });

        if let Some(next) = self.turn.advance(&self.roster) {
            self.roster.set_current(next);
            self.roster.reset_attributes(next);
        }

        self.outbox.broadcast(PartyEvent::RoundCount {
            rounds: self.turn.rounds(),
        });
        self.broadcast_player_list();
        self.begin_countdown();
    }

    pub(super) fn pause_round(&mut self, reason: PauseReason) {
        self.turn.set_phase(TurnPhase::Paused(reason));
        self.outbox.timer(TimerDirective::Pause);
        self.outbox.broadcast(PartyEvent::TurnPaused { reason });
    }

    pub(super) fn resume_round(&mut self) {
        self.turn.set_phase(TurnPhase::Active);
        self.outbox.timer(TimerDirective::Resume);
        self.outbox.broadcast(PartyEvent::TurnResumed);
    }

    /// After a fight or an item choice: the round ends if `out` was the
    /// current player or the current player has nothing left to do,
    /// otherwise the round timer picks up where it stopped.
    pub(super) fn settle_interruption(&mut self, out: Option<PlayerId>) {
        let Some(current) = self.turn.current() else {
            return;
        };
        if out == Some(current) || self.round_exhausted(current) {
            self.finish_round();
        } else {
            self.resume_round();
        }
    }

    pub(super) fn end_game(&mut self, winner: Option<PlayerId>) {
        if self.turn.is_finished() {
            return;
        }
        self.fight = None;
        self.winner = winner;
        self.turn.set_phase(TurnPhase::Finished);
        self.outbox.timer(TimerDirective::Stop);
        self.outbox.log(LogEvent::EndGame { winner });
        self.outbox.broadcast(PartyEvent::GameEnded { winner });
    }

    fn begin_countdown(&mut self) {
        self.turn.set_phase(TurnPhase::Countdown);
        self.outbox.timer(TimerDirective::StartCountdown {
            secs: self.config.countdown_secs,
        });
    }
}
