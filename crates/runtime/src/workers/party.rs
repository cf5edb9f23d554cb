//! Party worker that owns one authoritative [`tactics_core::Party`].
//!
//! Commands from [`crate::PartyHandle`] and timer signals from the party's
//! [`TurnTimer`] are serialized through a single loop, so a tick never
//! interleaves with an intent. After every party operation the worker
//! drains the outbox: dispatches go to the [`EventBus`], timer directives
//! go to the [`TurnTimer`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use tactics_core::{
    ActionOutcome, Fighter, Party, PartyError, PartyEvent, PlayerId, Position, TimerDirective,
};

use crate::api::{Intent, PartySnapshot, Result};
use crate::events::{Envelope, EventBus};
use crate::timer::{TimerEvent, TimerKind, TimerSignal, TurnTimer};

/// Commands that can be sent to the party worker
pub(crate) enum Command {
    /// Emit the opening events and start the first countdown.
    Start { reply: oneshot::Sender<Result<()>> },
    /// Apply one player intent.
    Submit {
        intent: Intent,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    AccessiblePositions {
        player: PlayerId,
        reply: oneshot::Sender<Vec<Position>>,
    },
    InteractivePositions {
        player: PlayerId,
        reply: oneshot::Sender<Vec<Position>>,
    },
    Path {
        player: PlayerId,
        end: Position,
        reply: oneshot::Sender<Vec<Position>>,
    },
    Fighters {
        reply: oneshot::Sender<Option<[Fighter; 2]>>,
    },
    Snapshot {
        reply: oneshot::Sender<PartySnapshot>,
    },
    /// Stop the timers, close the bus and leave the loop.
    Destroy { reply: oneshot::Sender<()> },
}

/// Background task that processes one party's commands and timer signals.
pub(crate) struct PartyWorker {
    party: Party,
    command_rx: mpsc::Receiver<Command>,
    timer: TurnTimer,
    timer_rx: mpsc::Receiver<TimerSignal>,
    event_bus: EventBus,
}

impl PartyWorker {
    pub fn new(
        party: Party,
        command_rx: mpsc::Receiver<Command>,
        timer: TurnTimer,
        timer_rx: mpsc::Receiver<TimerSignal>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            party = %party.id(),
            players = party.roster().len(),
            "party worker initialized"
        );

        Self {
            party,
            command_rx,
            timer,
            timer_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Destroy { reply }) => {
                        self.shutdown().await;
                        if reply.send(()).is_err() {
                            debug!(target: "runtime::worker", "Destroy reply channel closed (caller dropped)");
                        }
                        return;
                    }
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(signal) = self.timer_rx.recv() => self.handle_timer(signal),
            }
        }

        // Every handle is gone; nobody can reach this party any more.
        self.shutdown().await;
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                let result = self.party.start().map_err(Into::into);
                self.flush();
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Start reply channel closed (caller dropped)");
                }
            }
            Command::Submit { intent, reply } => {
                let result = self.apply(intent);
                self.flush();
                if reply.send(result.map_err(Into::into)).is_err() {
                    debug!(target: "runtime::worker", "Submit reply channel closed (caller dropped)");
                }
            }
            Command::AccessiblePositions { player, reply } => {
                let _ = reply.send(self.party.accessible_positions(player));
            }
            Command::InteractivePositions { player, reply } => {
                let _ = reply.send(self.party.interactive_positions(player));
            }
            Command::Path { player, end, reply } => {
                let _ = reply.send(self.party.path(player, end));
            }
            Command::Fighters { reply } => {
                let _ = reply.send(self.party.fighters().cloned());
            }
            Command::Snapshot { reply } => {
                let snapshot = PartySnapshot::capture(&self.party, self.timer.remaining());
                let _ = reply.send(snapshot);
            }
            Command::Destroy { .. } => {}
        }
    }

    fn apply(&mut self, intent: Intent) -> std::result::Result<ActionOutcome, PartyError> {
        let outcome = match intent {
            Intent::ExecuteAction { player, target } => self.party.execute_action(player, target),
            Intent::Move { player, target } => self.party.move_player(player, target),
            Intent::Attack => self.party.handle_attack(),
            Intent::Escape => self.party.handle_escape(),
            Intent::GiveUp { player } => self.party.give_up(player),
            Intent::ToggleDebugMode { player } => self.party.toggle_debug_mode(player),
            Intent::RemovePlayerItem { player, item } => self.party.remove_player_item(player, item),
            Intent::EndRound { player } => self.party.end_round(player),
            Intent::Teleport { player, target } => self.party.teleport(player, target),
        };

        match &outcome {
            Ok(ActionOutcome::Applied) => {
                debug!(target: "runtime::worker", party = %self.party.id(), ?intent, "intent applied");
            }
            Ok(ActionOutcome::Rejected) => {
                debug!(target: "runtime::worker", party = %self.party.id(), ?intent, "intent rejected");
            }
            Err(err) => {
                warn!(target: "runtime::worker", party = %self.party.id(), ?intent, %err, "intent failed");
            }
        }
        outcome
    }

    fn handle_timer(&mut self, signal: TimerSignal) {
        if !self.timer.accept(&signal) {
            return;
        }

        match (signal.kind, signal.event) {
            (TimerKind::Countdown, TimerEvent::Tick { remaining }) => {
                self.publish_tick(PartyEvent::CountdownTick { remaining });
            }
            (TimerKind::Round, TimerEvent::Tick { remaining }) => {
                self.publish_tick(PartyEvent::TimerTick { remaining });
            }
            (TimerKind::Countdown, TimerEvent::Expired) => {
                self.party.countdown_elapsed();
                self.flush();
            }
            (TimerKind::Round, TimerEvent::Expired) => {
                debug!(
                    target: "runtime::worker",
                    party = %self.party.id(),
                    player = ?self.party.current_player(),
                    "round timer expired"
                );
                self.party.round_elapsed();
                self.flush();
            }
        }
    }

    fn publish_tick(&self, event: PartyEvent) {
        self.event_bus
            .publish(Envelope::broadcast(self.party.id().clone(), event));
    }

    /// Routes everything the last operation emitted.
    fn flush(&mut self) {
        let (dispatches, directives) = self.party.drain();
        for dispatch in dispatches {
            if let PartyEvent::GameEnded { winner } = &dispatch.event {
                info!(target: "runtime::worker", party = %self.party.id(), ?winner, "party over");
            }
            self.event_bus
                .publish(Envelope::from_dispatch(self.party.id().clone(), dispatch));
        }
        for directive in directives {
            self.timer.apply(directive);
        }
    }

    async fn shutdown(&mut self) {
        self.party.destroy();
        self.flush();
        // Covers a party that was never started or already finished.
        self.timer.apply(TimerDirective::Stop);
        self.event_bus.close().await;
        info!(target: "runtime::worker", party = %self.party.id(), "party worker stopped");
    }
}
