use arrayvec::ArrayVec;

use super::GridError;
use super::tile::{Cell, ItemKind, TerrainKind};
use crate::state::{Direction, Position};

/// Up to four orthogonal neighbours, in `Direction::ALL` order.
pub type Neighbors = ArrayVec<Position, 4>;

/// Square tile matrix owned by one party.
///
/// Cells are stored row-major; `Position::y` selects the row. The size never
/// changes for the lifetime of a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    /// Closed doors as of the last `set_grid`/`set_tile`.
    closed_doors: Vec<Position>,
    doors_ignored: bool,
}

impl Grid {
    /// Builds a grid from raw encoded rows.
    pub fn from_rows(rows: &[Vec<u16>]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(GridError::NotSquare {
                    row: y,
                    expected: size,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                let cell = Cell::decode(value).ok_or(GridError::UnknownCode {
                    position: Position::new(x as i32, y as i32),
                    value,
                })?;
                cells.push(cell);
            }
        }

        let mut grid = Self {
            size,
            cells,
            closed_doors: Vec::new(),
            doors_ignored: false,
        };
        grid.refresh_closed_doors();
        Ok(grid)
    }

    /// All-base grid of the given size.
    pub fn filled(size: usize, cell: Cell) -> Self {
        let mut grid = Self {
            size,
            cells: vec![cell; size * size],
            closed_doors: Vec::new(),
            doors_ignored: false,
        };
        grid.refresh_closed_doors();
        grid
    }

    /// Replaces the whole matrix; the size must match.
    pub fn set_grid(&mut self, rows: &[Vec<u16>]) -> Result<(), GridError> {
        let replacement = Self::from_rows(rows)?;
        if replacement.size != self.size {
            return Err(GridError::SizeMismatch {
                expected: self.size,
                found: replacement.size,
            });
        }
        *self = replacement;
        Ok(())
    }

    /// Encoded rows, as stored by the party data store.
    pub fn to_rows(&self) -> Vec<Vec<u16>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|cell| cell.encode()).collect())
            .collect()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.size
            && (position.y as usize) < self.size
    }

    /// Row-major index of an in-bounds position.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.size + position.x as usize)
    }

    pub fn position_at(&self, index: usize) -> Position {
        Position::new((index % self.size) as i32, (index / self.size) as i32)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(|index| self.position_at(index))
    }

    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    pub fn tile_at(&self, position: Position) -> Option<TerrainKind> {
        self.cell(position).map(|cell| cell.terrain)
    }

    pub fn item_at(&self, position: Position) -> ItemKind {
        self.cell(position).map_or(ItemKind::None, |cell| cell.item)
    }

    /// Overwrites a cell's terrain. Legality is the caller's concern.
    pub fn set_tile(&mut self, position: Position, terrain: TerrainKind) -> bool {
        let Some(index) = self.index(position) else {
            return false;
        };
        self.cells[index].terrain = terrain;
        self.closed_doors.retain(|door| *door != position);
        if terrain == TerrainKind::DoorClosed {
            self.closed_doors.push(position);
        }
        true
    }

    /// Places an item on an empty cell. No-op when the cell already has one.
    pub fn add_item(&mut self, position: Position, item: ItemKind) -> bool {
        match self.index(position) {
            Some(index) if !self.cells[index].item.is_some() => {
                self.cells[index].item = item;
                true
            }
            _ => false,
        }
    }

    /// Clears a cell's item and returns what was there.
    pub fn remove_item(&mut self, position: Position) -> ItemKind {
        match self.index(position) {
            Some(index) => std::mem::replace(&mut self.cells[index].item, ItemKind::None),
            None => ItemKind::None,
        }
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.tile_at(position) == Some(TerrainKind::Wall)
    }

    pub fn is_door(&self, position: Position) -> bool {
        self.tile_at(position).is_some_and(TerrainKind::is_door)
    }

    pub fn is_open_door(&self, position: Position) -> bool {
        self.tile_at(position) == Some(TerrainKind::DoorOpen)
    }

    pub fn is_closed_door(&self, position: Position) -> bool {
        self.tile_at(position) == Some(TerrainKind::DoorClosed)
    }

    pub fn is_ice(&self, position: Position) -> bool {
        self.tile_at(position) == Some(TerrainKind::Ice)
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.cost_of(position).is_some()
    }

    /// Movement cost of entering `position`; `None` when impassable or out
    /// of bounds.
    pub fn cost_of(&self, position: Position) -> Option<u32> {
        self.tile_at(position).and_then(TerrainKind::cost)
    }

    /// In-bounds orthogonal neighbours: up, left, down, right.
    pub fn neighbors(&self, position: Position) -> Neighbors {
        Direction::ALL
            .iter()
            .map(|&direction| position.step(direction))
            .filter(|&candidate| self.contains(candidate))
            .collect()
    }

    /// Positions of every start-point marker, row-major.
    pub fn start_points(&self) -> Vec<Position> {
        self.positions()
            .filter(|&position| self.item_at(position) == ItemKind::StartPoint)
            .collect()
    }

    pub fn closed_doors(&self) -> &[Position] {
        &self.closed_doors
    }

    /// Temporarily treats every closed door as base terrain.
    ///
    /// Must be paired with [`Grid::restore_closed_doors`].
    pub fn ignore_closed_doors(&mut self) {
        if self.doors_ignored {
            return;
        }
        for door in &self.closed_doors {
            if let Some(index) = self.index(*door) {
                self.cells[index].terrain = TerrainKind::Base;
            }
        }
        self.doors_ignored = true;
    }

    pub fn restore_closed_doors(&mut self) {
        if !self.doors_ignored {
            return;
        }
        for door in &self.closed_doors {
            if let Some(index) = self.index(*door) {
                self.cells[index].terrain = TerrainKind::DoorClosed;
            }
        }
        self.doors_ignored = false;
    }

    /// Runs `f` with closed doors neutralised, restoring them afterwards.
    pub fn with_closed_doors_ignored<R>(&mut self, f: impl FnOnce(&Grid) -> R) -> R {
        self.ignore_closed_doors();
        let result = f(self);
        self.restore_closed_doors();
        result
    }

    /// Summed entry cost of every cell on `path`, counting closed doors as
    /// base terrain. `None` if the path crosses a wall or leaves the grid.
    pub fn path_cost(&mut self, path: &[Position]) -> Option<u32> {
        self.with_closed_doors_ignored(|grid| {
            path.iter()
                .try_fold(0u32, |total, &cell| Some(total + grid.cost_of(cell)?))
        })
    }

    fn refresh_closed_doors(&mut self) {
        self.closed_doors = self
            .positions()
            .filter(|&position| self.tile_at(position) == Some(TerrainKind::DoorClosed))
            .collect();
        self.doors_ignored = false;
    }
}
