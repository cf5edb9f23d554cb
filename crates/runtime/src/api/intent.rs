//! Player intents accepted by a party, in a transport-friendly shape.
use serde::{Deserialize, Serialize};

use tactics_core::{ItemKind, PlayerId, Position};

/// One request against a running party.
///
/// Fight intents carry no player: they always act for the fighter whose
/// exchange it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "intent",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Intent {
    ExecuteAction { player: PlayerId, target: Position },
    Move { player: PlayerId, target: Position },
    Attack,
    Escape,
    GiveUp { player: PlayerId },
    ToggleDebugMode { player: PlayerId },
    RemovePlayerItem { player: PlayerId, item: ItemKind },
    EndRound { player: PlayerId },
    Teleport { player: PlayerId, target: Position },
}

impl Intent {
    /// Player on whose behalf the intent was sent, if it names one.
    pub fn player(&self) -> Option<PlayerId> {
        match *self {
            Intent::ExecuteAction { player, .. }
            | Intent::Move { player, .. }
            | Intent::GiveUp { player }
            | Intent::ToggleDebugMode { player }
            | Intent::RemovePlayerItem { player, .. }
            | Intent::EndRound { player }
            | Intent::Teleport { player, .. } => Some(player),
            Intent::Attack | Intent::Escape => None,
        }
    }
}
