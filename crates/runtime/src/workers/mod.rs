//! Background workers. Internal to the crate.
mod party;

pub(crate) use party::{Command, PartyWorker};
