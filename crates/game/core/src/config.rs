/// Party rules constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyConfig {
    /// Pre-round delay before the round timer starts.
    pub countdown_secs: u32,
    /// Length of one player's round.
    pub round_secs: u32,
    /// Fight wins needed to end the party.
    pub wins_to_victory: u32,
    /// Escape attempts granted to each fighter per fight.
    pub escape_attempts: u32,
    /// Success chance of an escape attempt, in percent.
    pub escape_chance: u32,
    /// Chance that a defender evades an exchange, in percent.
    pub evasion_chance: u32,
}

impl PartyConfig {
    // ===== compile-time constants =====
    /// Base of the cell encoding: `terrain * TILE_BASE + item`.
    pub const TILE_BASE: u16 = 10;
    pub const MAX_PLAYERS: usize = 6;
    pub const MAX_INVENTORY: usize = 2;
    /// Held items plus one pending pick-up awaiting an item choice.
    pub const INVENTORY_SLOTS: usize = Self::MAX_INVENTORY + 1;
    pub const ACTIONS_PER_ROUND: u32 = 1;
    pub const ICE_PENALTY: u32 = 2;
    pub const ITEM_BONUS: u32 = 2;
    pub const SWAP_LIFE_THRESHOLD: u32 = 2;
    pub const SECOND_CHANCE_THRESHOLD: u32 = 1;
    pub const SECOND_CHANCE_BONUS: u32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;
    pub const DEFAULT_ROUND_SECS: u32 = 30;
    pub const DEFAULT_WINS_TO_VICTORY: u32 = 3;
    pub const DEFAULT_ESCAPE_ATTEMPTS: u32 = 2;
    pub const DEFAULT_ESCAPE_CHANCE: u32 = 40;
    pub const DEFAULT_EVASION_CHANCE: u32 = 40;

    pub fn new() -> Self {
        Self {
            countdown_secs: Self::DEFAULT_COUNTDOWN_SECS,
            round_secs: Self::DEFAULT_ROUND_SECS,
            wins_to_victory: Self::DEFAULT_WINS_TO_VICTORY,
            escape_attempts: Self::DEFAULT_ESCAPE_ATTEMPTS,
            escape_chance: Self::DEFAULT_ESCAPE_CHANCE,
            evasion_chance: Self::DEFAULT_EVASION_CHANCE,
        }
    }

    pub fn with_timers(countdown_secs: u32, round_secs: u32) -> Self {
        Self {
            countdown_secs,
            round_secs,
            ..Self::new()
        }
    }
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self::new()
    }
}
