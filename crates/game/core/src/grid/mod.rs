//! Tile matrix of a party and its geometric queries.
//!
//! Each cell packs a terrain type and an item into one integer (see
//! [`tile::Cell`]). [`Grid`] owns the decoded matrix and is the only place
//! where cells are mutated.

mod map;
pub mod tile;

pub use map::{Grid, Neighbors};
pub use tile::{Cell, ItemKind, TerrainKind};

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Malformed map input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell code {value} at {position}")]
    UnknownCode { position: Position, value: u16 },

    #[error("grid size is fixed at {expected}, got {found}")]
    SizeMismatch { expected: usize, found: usize },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "GRID_EMPTY",
            Self::NotSquare { .. } => "GRID_NOT_SQUARE",
            Self::UnknownCode { .. } => "GRID_UNKNOWN_CODE",
            Self::SizeMismatch { .. } => "GRID_SIZE_MISMATCH",
        }
    }
}
