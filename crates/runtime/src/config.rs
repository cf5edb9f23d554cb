//! Runtime configuration shared by the registry and party workers.
use std::env;
use std::time::Duration;

use tactics_core::PartyConfig;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub party: PartyConfig,
    /// Capacity of each event bus channel.
    pub event_buffer_size: usize,
    /// Capacity of each party's command queue.
    pub command_buffer_size: usize,
    /// Period between two timer ticks. One second in production; tests and
    /// simulations shorten it.
    pub tick: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            party: PartyConfig::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
            tick: Duration::from_secs(1),
        }
    }
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PARTY_COUNTDOWN_SECS` - Pre-round countdown (default: 3)
    /// - `PARTY_ROUND_SECS` - Round length (default: 30)
    /// - `PARTY_WINS_TO_VICTORY` - Fight wins that end the party (default: 3)
    /// - `PARTY_EVENT_BUFFER` - Event bus capacity per topic (default: 256)
    /// - `PARTY_COMMAND_BUFFER` - Command queue capacity (default: 32)
    /// - `PARTY_TICK_MILLIS` - Timer tick period (default: 1000)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secs) = read_env::<u32>("PARTY_COUNTDOWN_SECS") {
            config.party.countdown_secs = secs;
        }
        if let Some(secs) = read_env::<u32>("PARTY_ROUND_SECS") {
            config.party.round_secs = secs.max(1);
        }
        if let Some(wins) = read_env::<u32>("PARTY_WINS_TO_VICTORY") {
            config.party.wins_to_victory = wins.max(1);
        }
        if let Some(size) = read_env::<usize>("PARTY_EVENT_BUFFER") {
            config.event_buffer_size = size.max(1);
        }
        if let Some(size) = read_env::<usize>("PARTY_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }
        if let Some(millis) = read_env::<u64>("PARTY_TICK_MILLIS") {
            config.tick = Duration::from_millis(millis.max(1));
        }

        config
    }

    pub fn with_party(mut self, party: PartyConfig) -> Self {
        self.party = party;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
