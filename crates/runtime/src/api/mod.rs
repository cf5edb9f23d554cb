//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on workers and infrastructure.

pub mod errors;
pub mod handle;
pub mod intent;
pub mod registry;
pub mod snapshot;

pub use errors::{Result, RuntimeError};
pub use handle::PartyHandle;
pub use intent::Intent;
pub use registry::PartyRegistry;
pub use snapshot::PartySnapshot;
