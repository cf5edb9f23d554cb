//! Topic-based event bus for party events.
//!
//! Every party owns one [`EventBus`]. The party worker publishes each
//! drained dispatch as an [`Envelope`] to the topic of its event, and
//! consumers subscribe only to the topics they need.

mod bus;
mod envelope;

pub use bus::{EventBus, Topic};
pub use envelope::Envelope;
