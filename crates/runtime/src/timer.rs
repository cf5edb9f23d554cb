//! Countdown and round timers of one party.
//!
//! [`TurnTimer`] runs at most one ticking task at a time. Each start bumps a
//! generation counter carried by every [`TimerSignal`], so signals of a
//! stopped or replaced run that were already queued are discarded by
//! [`TurnTimer::accept`] instead of reaching the party.
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use tactics_core::TimerDirective;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerKind {
    Countdown,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerEvent {
    Tick { remaining: u32 },
    Expired,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TimerSignal {
    generation: u64,
    pub kind: TimerKind,
    pub event: TimerEvent,
}

struct Run {
    kind: TimerKind,
    remaining: u32,
    task: JoinHandle<()>,
}

pub(crate) struct TurnTimer {
    tick: Duration,
    signal_tx: mpsc::Sender<TimerSignal>,
    generation: u64,
    running: Option<Run>,
    /// Seconds left on a paused round.
    paused: Option<u32>,
}

impl TurnTimer {
    pub fn new(tick: Duration, signal_tx: mpsc::Sender<TimerSignal>) -> Self {
        Self {
            tick,
            signal_tx,
            generation: 0,
            running: None,
            paused: None,
        }
    }

    pub fn apply(&mut self, directive: TimerDirective) {
        match directive {
            TimerDirective::StartCountdown { secs } => self.start(TimerKind::Countdown, secs),
            TimerDirective::StartRound { secs } => self.start(TimerKind::Round, secs),
            TimerDirective::Pause => self.pause(),
            TimerDirective::Resume => self.resume(),
            TimerDirective::Stop => self.stop(),
        }
    }

    /// Replaces whatever runs with a fresh run of `secs` seconds.
    fn start(&mut self, kind: TimerKind, secs: u32) {
        self.stop();
        self.generation += 1;
        debug!(target: "runtime::timer", ?kind, secs, generation = self.generation, "timer started");

        let task = tokio::spawn(tick_loop(
            self.tick,
            secs,
            self.generation,
            kind,
            self.signal_tx.clone(),
        ));
        self.running = Some(Run {
            kind,
            remaining: secs,
            task,
        });
    }

    /// Stops a running round and keeps what is left of it. No-op otherwise.
    fn pause(&mut self) {
        let Some(run) = self.running.take_if(|run| run.kind == TimerKind::Round) else {
            return;
        };
        run.task.abort();
        self.generation += 1;
        self.paused = Some(run.remaining);
        debug!(target: "runtime::timer", remaining = run.remaining, "round paused");
    }

    fn resume(&mut self) {
        if let Some(remaining) = self.paused.take() {
            self.start(TimerKind::Round, remaining);
        }
    }

    /// Stops every run. Safe when nothing runs.
    pub fn stop(&mut self) {
        if let Some(run) = self.running.take() {
            run.task.abort();
            self.generation += 1;
        }
        self.paused = None;
    }

    /// Whether `signal` belongs to the current run. Tracks the remaining
    /// seconds of that run as a side effect.
    pub fn accept(&mut self, signal: &TimerSignal) -> bool {
        if signal.generation != self.generation {
            return false;
        }
        match signal.event {
            TimerEvent::Tick { remaining } => {
                if let Some(run) = self.running.as_mut() {
                    run.remaining = remaining;
                }
            }
            TimerEvent::Expired => self.running = None,
        }
        true
    }

    pub fn kind(&self) -> Option<TimerKind> {
        self.running.as_ref().map(|run| run.kind)
    }

    pub fn remaining(&self) -> Option<u32> {
        self.running.as_ref().map(|run| run.remaining).or(self.paused)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.is_some()
    }
}

impl Drop for TurnTimer {
    fn drop(&mut self) {
        if let Some(run) = self.running.take() {
            run.task.abort();
        }
    }
}

/// Emits one tick per period down to zero, then the expiry.
async fn tick_loop(
    period: Duration,
    secs: u32,
    generation: u64,
    kind: TimerKind,
    signal_tx: mpsc::Sender<TimerSignal>,
) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    interval.tick().await;

    let signal = |event| TimerSignal {
        generation,
        kind,
        event,
    };
    let mut remaining = secs;
    while remaining > 0 {
        interval.tick().await;
        remaining -= 1;
        if signal_tx
            .send(signal(TimerEvent::Tick { remaining }))
            .await
            .is_err()
        {
            return;
        }
    }
    let _ = signal_tx.send(signal(TimerEvent::Expired)).await;
}
