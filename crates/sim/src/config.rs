//! Simulation settings read from the environment.
use std::env;
use std::time::Duration;

use tactics_runtime::RuntimeConfig;

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub runtime: RuntimeConfig,
    /// Number of bots seated, capped by the scenario's start points.
    pub bots: usize,
    /// Wall-clock limit for the whole party.
    pub deadline: Duration,
}

impl SimConfig {
    /// Environment variables, on top of those read by
    /// [`RuntimeConfig::from_env`]:
    /// - `SIM_BOTS` - Bots seated (default: 4)
    /// - `SIM_DEADLINE_SECS` - Wall-clock limit (default: 120)
    ///
    /// Timers tick every 20 ms unless `PARTY_TICK_MILLIS` says otherwise.
    pub fn from_env() -> Self {
        let mut runtime = RuntimeConfig::from_env();
        if env::var_os("PARTY_TICK_MILLIS").is_none() {
            runtime.tick = Duration::from_millis(20);
        }

        Self {
            runtime,
            bots: read_env("SIM_BOTS").unwrap_or(4),
            deadline: Duration::from_secs(read_env("SIM_DEADLINE_SECS").unwrap_or(120)),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
