use crate::grid::Grid;
use crate::state::Position;

/// Scratch state of one cell during a reachability sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileNode {
    pub position: Position,
    /// Best movement budget left on arrival; `-1` when unreached.
    pub remaining_moves: i32,
    /// Entry cost; `-1` when impassable for this sweep.
    pub cost: i32,
}

impl TileNode {
    pub const UNREACHED: i32 = -1;
    pub const IMPASSABLE: i32 = -1;

    pub fn is_reached(&self) -> bool {
        self.remaining_moves >= 0
    }

    pub fn is_passable(&self) -> bool {
        self.cost >= 0
    }
}

/// Fixed-size node buffer indexed like the grid, reused across sweeps.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<TileNode>,
}

impl NodeArena {
    /// Rebuilds every node from `grid`, marking `blocked` cells impassable.
    pub fn reset(&mut self, grid: &Grid, blocked: &[Position]) {
        self.nodes.clear();
        self.nodes.extend(grid.positions().map(|position| TileNode {
            position,
            remaining_moves: TileNode::UNREACHED,
            cost: grid
                .cost_of(position)
                .map_or(TileNode::IMPASSABLE, |cost| cost as i32),
        }));

        for &position in blocked {
            if let Some(index) = grid.index(position) {
                self.nodes[index].cost = TileNode::IMPASSABLE;
            }
        }
    }

    pub fn nodes(&self) -> &[TileNode] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> &TileNode {
        &self.nodes[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut TileNode {
        &mut self.nodes[index]
    }
}
