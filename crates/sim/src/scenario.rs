//! Fixed arena used by the simulation.
use tactics_core::{
    BotProfile, DiceAssignment, PartySetup, Player, PlayerId, PlayerKind, PlayerStats,
};

/// 10x10 arena: walls, water, ice, two closed doors and an open one, four
/// start points in the corners, boost items, two random markers and the
/// flag in the middle.
const ARENA: [[u16; 10]; 10] = [
    [1, 0, 0, 20, 20, 0, 0, 0, 0, 1],
    [0, 10, 10, 0, 0, 0, 10, 10, 0, 0],
    [0, 10, 2, 0, 30, 30, 0, 10, 0, 0],
    [0, 0, 0, 0, 30, 30, 0, 0, 3, 0],
    [50, 0, 10, 10, 9, 0, 10, 10, 0, 40],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 4, 0, 20, 20, 0, 0, 2, 0, 0],
    [0, 10, 10, 0, 0, 5, 10, 10, 0, 0],
    [0, 0, 0, 0, 30, 0, 0, 0, 0, 0],
    [1, 0, 0, 0, 50, 0, 0, 0, 0, 1],
];

const ROSTER: [(&str, BotProfile, PlayerStats); 4] = [
    ("Brute", BotProfile::Aggressive, PlayerStats::new(6, 4, 6, 4, DiceAssignment::ATTACK_D6)),
    ("Warden", BotProfile::Defensive, PlayerStats::new(6, 4, 4, 6, DiceAssignment::DEFENSE_D6)),
    ("Scout", BotProfile::Aggressive, PlayerStats::new(4, 6, 4, 4, DiceAssignment::ATTACK_D6)),
    ("Hermit", BotProfile::Defensive, PlayerStats::new(4, 6, 4, 4, DiceAssignment::DEFENSE_D6)),
];

/// Arena with `bots` bots seated, at least two.
pub fn setup(bots: usize) -> PartySetup {
    let players = ROSTER
        .iter()
        .take(bots.clamp(2, ROSTER.len()))
        .zip(1u32..)
        .map(|(&(name, profile, stats), id)| {
            let player = Player::new(PlayerId(id), name, PlayerKind::Virtual(profile), stats);
            if id == 1 { player.organizer() } else { player }
        })
        .collect();

    PartySetup {
        map: ARENA.iter().map(|row| row.to_vec()).collect(),
        players,
    }
}
