//! Movement reachability over the party grid.
//!
//! A sweep propagates the mover's budget outward, deducting each cell's entry
//! cost and keeping the best budget seen per cell (see [`Reachability`]).
//! Paths are then rebuilt backward from the target over that budget field.
//!
//! Cost-only evaluation of an arbitrary path (closed doors treated as
//! passable) lives on [`crate::grid::Grid::path_cost`].

mod engine;
mod node;

pub use engine::{Reach, Reachability};
pub use node::{NodeArena, TileNode};
