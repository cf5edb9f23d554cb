use std::collections::HashSet;

use super::Party;
use crate::combat::Roller;
use crate::config::PartyConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::events::Outbox;
use crate::grid::{Grid, GridError, ItemKind};
use crate::reach::Reachability;
use crate::state::{PartyId, Placement, Player, PlayerId, Roster};
use crate::turn::TurnCycle;

/// Everything needed to create a party.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartySetup {
    /// Encoded cell values, one row per `Vec`.
    pub map: Vec<Vec<u16>>,
    /// Participants in join order.
    pub players: Vec<Player>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("a party needs at least one player")]
    NoPlayers,

    #[error("{count} players exceed the limit of {max}")]
    TooManyPlayers { count: usize, max: usize },

    #[error("player {0} joined twice")]
    DuplicatePlayer(PlayerId),

    #[error("map has {available} start points for {needed} players")]
    NotEnoughStartPoints { needed: usize, available: usize },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Grid(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Grid(err) => err.error_code(),
            Self::NoPlayers => "SETUP_NO_PLAYERS",
            Self::TooManyPlayers { .. } => "SETUP_TOO_MANY_PLAYERS",
            Self::DuplicatePlayer(_) => "SETUP_DUPLICATE_PLAYER",
            Self::NotEnoughStartPoints { .. } => "SETUP_NOT_ENOUGH_START_POINTS",
        }
    }
}

impl Party {
    /// Builds a party ready to [`start`](Party::start). Emits nothing.
    ///
    /// Start points are dealt by a seeded shuffle, unused start markers are
    /// cleared and random-item markers are resolved. The rotation is ordered
    /// by speed, fastest first, ties by join order.
    pub fn new(
        id: PartyId,
        config: PartyConfig,
        setup: PartySetup,
        mut roller: Roller,
    ) -> Result<Self, SetupError> {
        let mut grid = Grid::from_rows(&setup.map)?;
        validate_players(&setup.players)?;

        let mut roster = Roster::new(setup.players);
        assign_start_points(&mut grid, &mut roster, &mut roller)?;
        resolve_random_items(&mut grid, &mut roller);

        let turn = TurnCycle::new(roster.speed_order());

        Ok(Self {
            id,
            config,
            grid,
            roster,
            turn,
            fight: None,
            reach: Reachability::new(),
            roller,
            debug: false,
            winner: None,
            destroyed: false,
            outbox: Outbox::new(),
        })
    }
}

fn validate_players(players: &[Player]) -> Result<(), SetupError> {
    if players.is_empty() {
        return Err(SetupError::NoPlayers);
    }
    if players.len() > PartyConfig::MAX_PLAYERS {
        return Err(SetupError::TooManyPlayers {
            count: players.len(),
            max: PartyConfig::MAX_PLAYERS,
        });
    }

    let mut seen = HashSet::with_capacity(players.len());
    for player in players {
        if !seen.insert(player.id) {
            return Err(SetupError::DuplicatePlayer(player.id));
        }
    }
    Ok(())
}

fn assign_start_points(grid: &mut Grid, roster: &mut Roster, roller: &mut Roller) -> Result<(), SetupError> {
    let mut starts = grid.start_points();
    if starts.len() < roster.len() {
        return Err(SetupError::NotEnoughStartPoints {
            needed: roster.len(),
            available: starts.len(),
        });
    }
    roller.shuffle(&mut starts);

    for (player, &start) in roster.iter_mut().zip(&starts) {
        player.placement = Placement {
            current: start,
            previous: start,
            start,
        };
        player.stats.life = player.stats.max_life;
        player.refresh_item_effects();
        player.reset_round_attributes();
    }

    for &unused in &starts[roster.len()..] {
        grid.remove_item(unused);
    }
    Ok(())
}

/// Replaces each random marker with a kind not yet on the map, or with any
/// pool kind once every one of them is present.
fn resolve_random_items(grid: &mut Grid, roller: &mut Roller) {
    let markers: Vec<_> = grid
        .positions()
        .filter(|&position| grid.item_at(position) == ItemKind::Random)
        .collect();

    for position in markers {
        let present: HashSet<ItemKind> = grid
            .positions()
            .map(|cell| grid.item_at(cell))
            .collect();
        let mut pool: Vec<ItemKind> = ItemKind::RANDOM_POOL
            .into_iter()
            .filter(|kind| !present.contains(kind))
            .collect();
        if pool.is_empty() {
            pool = ItemKind::RANDOM_POOL.to_vec();
        }

        let item = pool[roller.pick(pool.len())];
        grid.remove_item(position);
        grid.add_item(position, item);
    }
}
