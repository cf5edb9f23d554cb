//! Async runtime hosting live parties.
//!
//! This crate wires each [`tactics_core::Party`] to a single-owner worker
//! task, a countdown/round timer and a topic-based event bus. Consumers
//! create parties through [`PartyRegistry`] and drive them through the
//! cloneable [`PartyHandle`].
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`sink`] forwards bus traffic to a transport
//! - [`config`] holds runtime tunables
//! - `workers` and `timer` keep background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod sink;

mod timer;
mod workers;

pub use api::{Intent, PartyHandle, PartyRegistry, PartySnapshot, Result, RuntimeError};
pub use config::RuntimeConfig;
pub use events::{Envelope, EventBus, Topic};
pub use sink::{EventSink, TracingSink, spawn_forwarder};
