//! Headless bot-vs-bot party.
//!
//! Seats up to four bots on a fixed arena, drives them through
//! [`tactics_runtime::PartyHandle`] exactly like a transport would, and logs
//! every party event as JSON at debug level.
//!
//! ```bash
//! RUST_LOG=runtime=debug SIM_BOTS=3 cargo run -p party-sim
//! ```
mod bot;
mod config;
mod scenario;

use std::sync::Arc;

use anyhow::Result;
use tactics_core::PartyId;
use tactics_runtime::{PartyRegistry, TracingSink, spawn_forwarder};

use crate::bot::BotDriver;
use crate::config::SimConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(bots = config.bots, tick = ?config.runtime.tick, "starting simulation");

    let registry = PartyRegistry::new(config.runtime.clone());
    let id = PartyId::new("sim");
    let handle = registry.create(id.clone(), scenario::setup(config.bots)).await?;

    let forwarder = spawn_forwarder(&handle, Arc::new(TracingSink))?;
    let events = handle.subscribe_all()?;
    registry.start(&id).await?;

    let driver = BotDriver::new(handle.clone());
    match tokio::time::timeout(config.deadline, driver.run(events)).await {
        Ok(Ok(winner)) => {
            let snapshot = handle.snapshot().await?;
            tracing::info!(?winner, rounds = snapshot.rounds, "simulation finished");
            for player in &snapshot.players {
                tracing::info!(player = %player.id, name = %player.name, wins = player.wins, "final standing");
            }
        }
        Ok(Err(err)) => {
            registry.shutdown().await?;
            return Err(err.into());
        }
        Err(_) => tracing::warn!(deadline = ?config.deadline, "deadline reached before the party ended"),
    }

    registry.destroy(&id).await?;
    forwarder.await?;
    Ok(())
}
