//! Deterministic random draws for dice, evasion and escapes.
//!
//! Every draw is derived from the party seed, a monotonically increasing
//! draw counter, the acting player and a per-purpose context, so a party can
//! be replayed from its seed.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::state::PlayerId;

/// Random source keyed by an explicit seed.
///
/// Implementations must return the same value for the same seed.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        (self.next_u32(seed) % sides.max(1)) + 1
    }

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        self.roll_die(seed, 100)
    }
}

/// PCG-XSH-RR: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Replays queued raw draws in order, ignoring the seed.
///
/// Once the queue is empty every draw returns `0`, which makes dice show 1
/// and percentage checks succeed. Meant for tests and scripted replays.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    draws: Mutex<VecDeque<u32>>,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: Mutex::new(draws.into_iter().collect()),
        }
    }

    /// Queues a die face (`1..=sides`).
    pub fn push_face(&self, face: u32) {
        self.push(face.saturating_sub(1));
    }

    /// Queues the outcome of a percentage check.
    pub fn push_chance(&self, succeeds: bool) {
        self.push(if succeeds { 0 } else { 99 });
    }

    pub fn push(&self, raw: u32) {
        self.draws
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(raw);
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.draws
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(0)
    }
}

/// Purpose of a draw; keeps independent rolls of one exchange uncorrelated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Attack = 0,
    Defense = 1,
    Evasion = 2,
    Escape = 3,
    Setup = 4,
}

/// Mixes the party seed with the draw coordinates.
pub fn compute_seed(party_seed: u64, nonce: u64, actor: PlayerId, context: RollContext) -> u64 {
    let mut hash = party_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor.0 as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Seeded draw sequence owned by one party.
#[derive(Clone)]
pub struct Roller {
    oracle: Arc<dyn RngOracle>,
    seed: u64,
    nonce: u64,
}

impl Roller {
    pub fn new(oracle: Arc<dyn RngOracle>, seed: u64) -> Self {
        Self {
            oracle,
            seed,
            nonce: 0,
        }
    }

    pub fn pcg(seed: u64) -> Self {
        Self::new(Arc::new(PcgRng), seed)
    }

    fn next_seed(&mut self, actor: PlayerId, context: RollContext) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, actor, context);
        self.nonce += 1;
        seed
    }

    /// Face in `1..=sides`.
    pub fn roll_die(&mut self, actor: PlayerId, sides: u32, context: RollContext) -> u32 {
        let seed = self.next_seed(actor, context);
        self.oracle.roll_die(seed, sides)
    }

    /// True with `percent` % probability.
    pub fn chance(&mut self, actor: PlayerId, percent: u32, context: RollContext) -> bool {
        let seed = self.next_seed(actor, context);
        self.oracle.roll_d100(seed) <= percent
    }

    /// Index in `0..len`; `0` for empty ranges.
    pub fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let seed = self.next_seed(PlayerId(0), RollContext::Setup);
        self.oracle.next_u32(seed) as usize % len
    }

    /// Fisher-Yates shuffle driven by the party seed.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for upper in (1..items.len()).rev() {
            let swap_with = self.pick(upper + 1);
            items.swap(upper, swap_with);
        }
    }
}

impl fmt::Debug for Roller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Roller")
            .field("seed", &self.seed)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}
