use crate::grid::{Grid, ItemKind};
use crate::state::{PlayerId, Position, Roster};

/// Why a walk stopped where it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStop {
    /// Reached the end of the path.
    Completed,
    /// Stepped on an item and picked it up.
    ItemPicked(ItemKind),
    /// Carried the flag back onto the walker's start cell.
    FlagHome,
    /// Next cell was impassable, occupied or too expensive.
    Blocked,
}

/// Cells actually entered and what stopped the walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walk {
    pub walked: Vec<Position>,
    pub spent: u32,
    pub stop: WalkStop,
}

impl Walk {
    pub fn moved(&self) -> bool {
        !self.walked.is_empty()
    }
}

/// Moves `pid` along `path` one hop at a time, paying each cell's entry
/// cost from the movement budget.
pub fn apply_walk(grid: &mut Grid, roster: &mut Roster, pid: PlayerId, path: &[Position]) -> Walk {
    let mut walk = Walk {
        walked: Vec::with_capacity(path.len()),
        spent: 0,
        stop: WalkStop::Completed,
    };

    for &cell in path {
        let Some(cost) = grid.cost_of(cell) else {
            walk.stop = WalkStop::Blocked;
            break;
        };
        if roster.occupant_at(cell).is_some_and(|occupant| occupant.id != pid) {
            walk.stop = WalkStop::Blocked;
            break;
        }
        let Some(walker) = roster.get_mut(pid) else {
            walk.stop = WalkStop::Blocked;
            break;
        };
        if walker.movement_left < cost {
            walk.stop = WalkStop::Blocked;
            break;
        }

        walker.movement_left -= cost;
        walk.spent += cost;
        roster.update_position(pid, cell);
        walk.walked.push(cell);

        if grid.item_at(cell).is_collectible() {
            let item = grid.remove_item(cell);
            if let Some(walker) = roster.get_mut(pid) {
                walker.take_item(item);
            }
            walk.stop = WalkStop::ItemPicked(item);
            break;
        }

        if roster
            .get(pid)
            .is_some_and(|walker| walker.holds(ItemKind::Flag) && walker.placement.start == cell)
        {
            walk.stop = WalkStop::FlagHome;
            break;
        }
    }

    walk
}
