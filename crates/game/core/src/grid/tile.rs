//! Cell encoding: one integer carries both the terrain and the item.

use crate::config::PartyConfig;

/// Terrain component of a cell (`value / TILE_BASE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::FromRepr, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[repr(u16)]
pub enum TerrainKind {
    Base = 0,
    Wall = 1,
    Water = 2,
    Ice = 3,
    DoorOpen = 4,
    DoorClosed = 5,
}

impl TerrainKind {
    /// Movement cost of entering a cell; `None` when impassable.
    pub const fn cost(self) -> Option<u32> {
        match self {
            TerrainKind::Wall | TerrainKind::DoorClosed => None,
            TerrainKind::Ice => Some(0),
            TerrainKind::Base | TerrainKind::DoorOpen => Some(1),
            TerrainKind::Water => Some(2),
        }
    }

    pub const fn is_door(self) -> bool {
        matches!(self, TerrainKind::DoorOpen | TerrainKind::DoorClosed)
    }

    /// The other door state; other terrains are returned unchanged.
    pub const fn toggled(self) -> Self {
        match self {
            TerrainKind::DoorOpen => TerrainKind::DoorClosed,
            TerrainKind::DoorClosed => TerrainKind::DoorOpen,
            other => other,
        }
    }
}

/// Item component of a cell (`value % TILE_BASE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::FromRepr, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[repr(u16)]
pub enum ItemKind {
    None = 0,
    StartPoint = 1,
    Random = 2,
    AttackBoost = 3,
    DefenseBoost = 4,
    SwapLife = 5,
    SecondChance = 6,
    DoubleIceBreak = 7,
    DecreaseLoserWins = 8,
    Flag = 9,
}

impl ItemKind {
    /// Kinds a random-item marker may resolve to.
    pub const RANDOM_POOL: [ItemKind; 6] = [
        ItemKind::AttackBoost,
        ItemKind::DefenseBoost,
        ItemKind::SwapLife,
        ItemKind::SecondChance,
        ItemKind::DoubleIceBreak,
        ItemKind::DecreaseLoserWins,
    ];

    /// True for items a player can carry.
    pub const fn is_collectible(self) -> bool {
        !matches!(
            self,
            ItemKind::None | ItemKind::StartPoint | ItemKind::Random
        )
    }

    pub const fn is_some(self) -> bool {
        !matches!(self, ItemKind::None)
    }
}

/// Decoded view of a cell value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub terrain: TerrainKind,
    pub item: ItemKind,
}

impl Cell {
    pub const EMPTY: Self = Self::new(TerrainKind::Base, ItemKind::None);

    pub const fn new(terrain: TerrainKind, item: ItemKind) -> Self {
        Self { terrain, item }
    }

    /// Decodes a raw cell value; `None` for unknown terrain or item codes.
    pub fn decode(value: u16) -> Option<Self> {
        let terrain = TerrainKind::from_repr(value / PartyConfig::TILE_BASE)?;
        let item = ItemKind::from_repr(value % PartyConfig::TILE_BASE)?;
        Some(Self { terrain, item })
    }

    pub const fn encode(self) -> u16 {
        self.terrain as u16 * PartyConfig::TILE_BASE + self.item as u16
    }

    pub const fn with_terrain(self, terrain: TerrainKind) -> Self {
        Self { terrain, ..self }
    }

    pub const fn with_item(self, item: ItemKind) -> Self {
        Self { item, ..self }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_terrain_and_item_components() {
        let cell = Cell::decode(36).unwrap();
        assert_eq!(cell.terrain, TerrainKind::Ice);
        assert_eq!(cell.item, ItemKind::SecondChance);
        assert_eq!(cell.encode(), 36);
    }

    #[test]
    fn rejects_unknown_terrain_codes() {
        assert!(Cell::decode(60).is_none());
        assert!(Cell::decode(9).is_some());
    }

    #[test]
    fn terrain_costs_follow_movement_rules() {
        assert_eq!(TerrainKind::Wall.cost(), None);
        assert_eq!(TerrainKind::DoorClosed.cost(), None);
        assert_eq!(TerrainKind::Ice.cost(), Some(0));
        assert_eq!(TerrainKind::DoorOpen.cost(), Some(1));
        assert_eq!(TerrainKind::Water.cost(), Some(2));
    }

    #[test]
    fn start_points_and_random_markers_are_not_collectible() {
        assert!(!ItemKind::StartPoint.is_collectible());
        assert!(!ItemKind::Random.is_collectible());
        assert!(ItemKind::Flag.is_collectible());
    }
}
