use std::collections::VecDeque;

use arrayvec::ArrayVec;

use super::node::NodeArena;
use crate::grid::Grid;
use crate::state::Position;

/// Budget-propagation sweep over a grid.
///
/// Owns its node buffer and queue so repeated queries for the same party do
/// not allocate once warmed up.
#[derive(Clone, Debug, Default)]
pub struct Reachability {
    arena: NodeArena,
    queue: VecDeque<usize>,
}

impl Reachability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes every cell reachable from `start` with `budget` movement.
    ///
    /// `blocked` cells (other players) are impassable for this sweep; the
    /// start cell is exempt.
    pub fn compute<'a>(
        &'a mut self,
        grid: &'a Grid,
        start: Position,
        budget: u32,
        blocked: &[Position],
    ) -> Reach<'a> {
        self.arena.reset(grid, blocked);
        self.queue.clear();

        let Some(start_index) = grid.index(start) else {
            return Reach {
                grid,
                arena: &self.arena,
                start,
                start_index: None,
            };
        };

        {
            let node = self.arena.get_mut(start_index);
            node.cost = node.cost.max(0);
            node.remaining_moves = budget as i32;
        }
        self.queue.push_back(start_index);

        while let Some(index) = self.queue.pop_front() {
            let current = *self.arena.get(index);
            // Dead end: nothing left to spend.
            if current.remaining_moves <= 0 {
                continue;
            }

            for neighbor in grid.neighbors(current.position) {
                let Some(neighbor_index) = grid.index(neighbor) else {
                    continue;
                };
                let node = self.arena.get_mut(neighbor_index);
                if !node.is_passable() {
                    continue;
                }

                let candidate = current.remaining_moves - node.cost;
                if candidate >= 0 && candidate > node.remaining_moves {
                    node.remaining_moves = candidate;
                    self.queue.push_back(neighbor_index);
                }
            }
        }

        Reach {
            grid,
            arena: &self.arena,
            start,
            start_index: Some(start_index),
        }
    }
}

/// Result of one sweep, borrowed from the [`Reachability`] buffer.
#[derive(Debug)]
pub struct Reach<'a> {
    grid: &'a Grid,
    arena: &'a NodeArena,
    start: Position,
    start_index: Option<usize>,
}

impl<'a> Reach<'a> {
    pub fn start(&self) -> Position {
        self.start
    }

    /// Movement left on arrival at `position`, if reachable.
    pub fn remaining(&self, position: Position) -> Option<u32> {
        let index = self.grid.index(position)?;
        let node = self.arena.get(index);
        node.is_reached().then_some(node.remaining_moves as u32)
    }

    pub fn is_reachable(&self, position: Position) -> bool {
        self.remaining(position).is_some()
    }

    /// Every reachable cell, start included, row-major.
    pub fn positions(&self) -> Vec<Position> {
        self.arena
            .nodes()
            .iter()
            .filter(|node| node.is_reached())
            .map(|node| node.position)
            .collect()
    }

    /// Adjacent-hop path from the start to `end`, start excluded.
    ///
    /// Empty when `end` is unreachable or is the start itself.
    pub fn path_to(&self, end: Position) -> Vec<Position> {
        let (Some(start_index), Some(end_index)) = (self.start_index, self.grid.index(end)) else {
            return Vec::new();
        };
        if end_index == start_index || !self.arena.get(end_index).is_reached() {
            return Vec::new();
        }

        let mut visited = vec![false; self.arena.nodes().len()];
        visited[end_index] = true;
        let mut frames = vec![(end_index, self.successors(end_index, &visited))];

        // Depth-first walk from `end` back to the start: each step stacks the
        // cells that could have handed their budget to the current one and
        // follows the most recently stacked.
        loop {
            let Some((_, candidates)) = frames.last_mut() else {
                return Vec::new();
            };
            match candidates.pop() {
                Some(next) if next == start_index => break,
                Some(next) if !visited[next] => {
                    visited[next] = true;
                    let successors = self.successors(next, &visited);
                    frames.push((next, successors));
                }
                Some(_) => {}
                None => {
                    frames.pop();
                }
            }
        }

        let raw: Vec<Position> = frames
            .iter()
            .rev()
            .map(|(index, _)| self.arena.get(*index).position)
            .collect();
        compact(self.start, &raw)
    }

    /// Neighbours of `index` whose budget, minus the entry cost of `index`,
    /// is exactly what `index` ended up with.
    ///
    /// For regular terrain this means strictly more moves left; for ice
    /// (zero cost) an equal amount qualifies.
    fn successors(&self, index: usize, visited: &[bool]) -> ArrayVec<usize, 4> {
        let node = self.arena.get(index);
        self.grid
            .neighbors(node.position)
            .into_iter()
            .filter_map(|neighbor| self.grid.index(neighbor))
            .filter(|&candidate| {
                let parent = self.arena.get(candidate);
                let is_start = Some(candidate) == self.start_index;
                (is_start || !visited[candidate])
                    && parent.is_reached()
                    && parent.remaining_moves - node.cost == node.remaining_moves
            })
            .collect()
    }
}

/// Keeps only the hops needed: from the running head, jump to the last cell
/// of `raw` that is still adjacent to it.
fn compact(start: Position, raw: &[Position]) -> Vec<Position> {
    let mut path = Vec::with_capacity(raw.len());
    let mut head = start;
    let mut index = 0;

    while index < raw.len() {
        let furthest = (index..raw.len())
            .rev()
            .find(|&candidate| raw[candidate].is_adjacent(head))
            .unwrap_or(index);
        head = raw[furthest];
        path.push(head);
        index = furthest + 1;
    }

    path
}
