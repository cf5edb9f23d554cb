//! Relocation of defeated players and dropped items.
//!
//! Both searches expand in square rings (Chebyshev shells) around an origin
//! and take the first free cell, row-major within a ring. A fully packed map
//! is a configuration error upstream; the search then returns `None` and the
//! caller leaves things where they are.

use crate::grid::{Grid, ItemKind};
use crate::state::{PlayerId, Position, Roster};

/// One item put back on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPlacement {
    pub item: ItemKind,
    pub position: Position,
}

/// Items stripped from a player and where they landed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemDrop {
    pub placements: Vec<ItemPlacement>,
    pub lost_flag: bool,
}

/// Where a dropped item should land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropSite {
    /// On the cell itself when it is free, else the nearest ring around it.
    At(Position),
    /// The nearest ring around the cell, never the cell itself.
    Around(Position),
}

impl DropSite {
    pub fn origin(self) -> Position {
        match self {
            DropSite::At(origin) | DropSite::Around(origin) => origin,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Occupant {
    Player(PlayerId),
    Item,
}

fn is_open(grid: &Grid, position: Position) -> bool {
    grid.contains(position) && !grid.is_wall(position) && !grid.is_door(position)
}

/// Ring-search predicate: open, bare and unoccupied (except by `pid` itself).
fn is_free(grid: &Grid, roster: &Roster, position: Position, occupant: Occupant) -> bool {
    if !is_open(grid, position) || grid.item_at(position) != ItemKind::None {
        return false;
    }

    match occupant {
        Occupant::Player(pid) => roster
            .occupant_at(position)
            .is_none_or(|player| player.id == pid),
        Occupant::Item => !roster.is_occupied(position),
    }
}

/// Cells at Chebyshev distance exactly `radius` from `origin`, row-major.
fn ring(origin: Position, radius: i32) -> impl Iterator<Item = Position> {
    (-radius..=radius).flat_map(move |dy| {
        (-radius..=radius)
            .filter(move |dx| dx.abs() == radius || dy.abs() == radius)
            .map(move |dx| Position::new(origin.x + dx, origin.y + dy))
    })
}

fn nearest_free(grid: &Grid, roster: &Roster, origin: Position, occupant: Occupant) -> Option<Position> {
    (1..=grid.size() as i32)
        .flat_map(|radius| ring(origin, radius))
        .find(|&candidate| is_free(grid, roster, candidate, occupant))
}

/// Sends a defeated player back to their start cell, or the nearest free
/// cell around it. Returns the new position.
pub fn replace_player(grid: &Grid, roster: &mut Roster, loser: PlayerId) -> Option<Position> {
    let start = roster.get(loser)?.placement.start;
    let occupant = Occupant::Player(loser);

    // Only the loser's own spawn marker may be stood on.
    let start_free = is_open(grid, start)
        && matches!(grid.item_at(start), ItemKind::None | ItemKind::StartPoint)
        && roster.occupant_at(start).is_none_or(|player| player.id == loser);

    let target = if start_free {
        start
    } else {
        nearest_free(grid, roster, start, occupant)?
    };

    roster.update_position(loser, target);
    Some(target)
}

/// Puts one item on the board according to `site`. `None` when the item
/// found no room and was discarded.
pub fn place_item(grid: &mut Grid, roster: &Roster, item: ItemKind, site: DropSite) -> Option<ItemPlacement> {
    let position = match site {
        DropSite::At(origin) if is_open(grid, origin) && grid.item_at(origin) == ItemKind::None => origin,
        _ => nearest_free(grid, roster, site.origin(), Occupant::Item)?,
    };

    grid.add_item(position, item)
        .then_some(ItemPlacement { item, position })
}

/// Strips every item from `pid` and puts each one back on the board around
/// `site`.
///
/// Items that find no free cell are discarded.
pub fn replace_items(grid: &mut Grid, roster: &mut Roster, pid: PlayerId, site: DropSite) -> ItemDrop {
    let Some(player) = roster.get_mut(pid) else {
        return ItemDrop::default();
    };
    let items = player.drain_items();

    ItemDrop {
        lost_flag: items.contains(&ItemKind::Flag),
        placements: items
            .into_iter()
            .filter_map(|item| place_item(grid, roster, item, site))
            .collect(),
    }
}

/// Moves `pid` straight to `target` when it is a walkable, unoccupied cell
/// other than the one they stand on.
pub fn teleport_player(grid: &Grid, roster: &mut Roster, pid: PlayerId, target: Position) -> bool {
    let Some(player) = roster.get(pid) else {
        return false;
    };
    if player.position() == target || !grid.is_walkable(target) || roster.is_occupied(target) {
        return false;
    }
    roster.update_position(pid, target)
}
