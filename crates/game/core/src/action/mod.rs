//! Resolution of "act on an adjacent cell" intents and path walking.
//!
//! These helpers only look at the grid and the roster. [`crate::Party`]
//! wraps them with turn checks, fights and event emission.

mod movement;

pub use movement::{Walk, WalkStop, apply_walk};

use crate::events::DoorState;
use crate::grid::{Grid, TerrainKind};
use crate::state::{PlayerId, Position, Roster};

/// Result of a player intent.
///
/// Illegal-but-expected intents are `Rejected`: nothing changed and the
/// actor was told its action finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ActionOutcome {
    Applied,
    Rejected,
}

impl ActionOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// What an interactive neighbour holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionTarget {
    Opponent(PlayerId),
    Door,
}

/// Classifies `target` for `pid`. `None` when the cell is not one of the
/// player's interactive neighbours.
///
/// An opponent standing in a doorway is fought, not shut in.
pub fn classify(grid: &Grid, roster: &Roster, pid: PlayerId, target: Position) -> Option<ActionTarget> {
    let actor = roster.get(pid)?;
    if target == actor.position() || !target.is_adjacent(actor.position()) || !grid.contains(target) {
        return None;
    }

    if let Some(occupant) = roster.occupant_at(target)
        && occupant.id != pid
    {
        return Some(ActionTarget::Opponent(occupant.id));
    }
    grid.is_door(target).then_some(ActionTarget::Door)
}

/// Orthogonal neighbours of `pid` holding a door or an active opponent.
pub fn interactive_positions(grid: &Grid, roster: &Roster, pid: PlayerId) -> Vec<Position> {
    let Some(actor) = roster.get(pid) else {
        return Vec::new();
    };

    grid.neighbors(actor.position())
        .into_iter()
        .filter(|&neighbor| classify(grid, roster, pid, neighbor).is_some())
        .collect()
}

/// Flips the door at `position`. Returns its new state, or `None` when the
/// cell is not a door.
pub fn toggle_door(grid: &mut Grid, position: Position) -> Option<DoorState> {
    let terrain = grid.tile_at(position).filter(|terrain| terrain.is_door())?;
    let toggled = terrain.toggled();
    grid.set_tile(position, toggled);

    Some(match toggled {
        TerrainKind::DoorClosed => DoorState::Closed,
        _ => DoorState::Open,
    })
}
