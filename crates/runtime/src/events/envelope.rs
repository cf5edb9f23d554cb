//! Addressed party events as they travel through the bus.

use serde::{Deserialize, Serialize};

use tactics_core::{Audience, Dispatch, PartyEvent, PartyId};

use super::Topic;

/// One party event together with the party it belongs to and its audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub party: PartyId,
    pub audience: Audience,
    pub event: PartyEvent,
}

impl Envelope {
    pub fn new(party: PartyId, audience: Audience, event: PartyEvent) -> Self {
        Self {
            party,
            audience,
            event,
        }
    }

    pub fn broadcast(party: PartyId, event: PartyEvent) -> Self {
        Self::new(party, Audience::Party, event)
    }

    pub fn from_dispatch(party: PartyId, dispatch: Dispatch) -> Self {
        Self::new(party, dispatch.audience, dispatch.event)
    }

    pub fn topic(&self) -> Topic {
        Topic::of(&self.event)
    }

    /// JSON rendering handed to transports.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
