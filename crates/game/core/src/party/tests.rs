use std::sync::Arc;

use super::*;
use crate::combat::{DiceAssignment, DiceType, HitEffect, RollKind, ScriptedRng};
use crate::events::{Audience, DoorState, LogEvent, TimerDirective};
use crate::grid::{ItemKind, TerrainKind};
use crate::state::{BotProfile, EffectFlags, PlayerKind, PlayerStats};
use crate::turn::PauseReason;

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);
const P3: PlayerId = PlayerId(3);

fn player(id: u32, speed: u32) -> Player {
    Player::new(
        PlayerId(id),
        format!("p{id}"),
        PlayerKind::Human,
        PlayerStats::new(4, speed, 4, 4, DiceAssignment::ATTACK_D6),
    )
}

/// `size`x`size` base map with start points on the top row.
fn map(size: usize, starts: usize) -> Vec<Vec<u16>> {
    let mut rows = vec![vec![0u16; size]; size];
    for x in 0..starts {
        rows[0][x * 2] = ItemKind::StartPoint as u16;
    }
    rows
}

fn create(rows: Vec<Vec<u16>>, players: Vec<Player>) -> (Party, Arc<ScriptedRng>) {
    let rng = Arc::new(ScriptedRng::default());
    let party = Party::new(
        PartyId::new("test"),
        PartyConfig::new(),
        PartySetup { map: rows, players },
        Roller::new(rng.clone(), 7),
    )
    .unwrap();
    (party, rng)
}

/// Started party with the first round running and the outbox drained.
fn running(rows: Vec<Vec<u16>>, players: Vec<Player>) -> (Party, Arc<ScriptedRng>) {
    let (mut party, rng) = create(rows, players);
    party.start().unwrap();
    party.countdown_elapsed();
    party.drain();
    (party, rng)
}

fn place(party: &mut Party, pid: PlayerId, position: Position) {
    party.roster.update_position(pid, position);
}

fn events(party: &mut Party) -> (Vec<PartyEvent>, Vec<TimerDirective>) {
    let (dispatches, directives) = party.drain();
    (dispatches.into_iter().map(|d| d.event).collect(), directives)
}

/// P1 (fast, organizer) at (2, 2) facing P2 at (2, 3); P1 holds the turn.
fn duel() -> (Party, Arc<ScriptedRng>) {
    let (mut party, rng) = running(map(5, 3), vec![player(1, 6).organizer(), player(2, 4), player(3, 3)]);
    place(&mut party, P1, Position::new(2, 2));
    place(&mut party, P2, Position::new(2, 3));
    place(&mut party, P3, Position::new(4, 4));
    (party, rng)
}

fn script_hit(rng: &ScriptedRng) {
    rng.push_face(6);
    rng.push_face(1);
    rng.push_chance(false);
}

// ===== setup =====

#[test]
fn setup_deals_start_points_and_orders_by_speed() {
    let (party, _) = create(map(6, 3), vec![player(1, 3), player(2, 5)]);

    assert_eq!(party.turn_order(), &[P2, P1]);
    assert_eq!(party.grid().start_points().len(), 2);
    for p in party.roster().iter() {
        assert_eq!(p.position(), p.placement.start);
        assert_eq!(party.grid().item_at(p.position()), ItemKind::StartPoint);
    }
    assert_ne!(party.player(P1).unwrap().position(), party.player(P2).unwrap().position());
    assert_eq!(party.phase(), TurnPhase::Setup);
}

#[test]
fn setup_rejects_bad_rosters() {
    let err = |players: Vec<Player>| {
        Party::new(
            PartyId::new("bad"),
            PartyConfig::new(),
            PartySetup { map: map(5, 2), players },
            Roller::pcg(1),
        )
        .unwrap_err()
    };

    assert_eq!(err(vec![]), SetupError::NoPlayers);
    assert_eq!(err(vec![player(1, 4), player(1, 4)]), SetupError::DuplicatePlayer(P1));
    assert_eq!(
        err(vec![player(1, 4), player(2, 4), player(3, 4)]),
        SetupError::NotEnoughStartPoints { needed: 3, available: 2 }
    );
    assert_eq!(
        err((1..=7).map(|id| player(id, 4)).collect()),
        SetupError::TooManyPlayers { count: 7, max: 6 }
    );

    let malformed = Party::new(
        PartyId::new("bad"),
        PartyConfig::new(),
        PartySetup { map: vec![vec![1, 0], vec![0]], players: vec![player(1, 4)] },
        Roller::pcg(1),
    );
    assert!(matches!(malformed, Err(SetupError::Grid(_))));
}

#[test]
fn random_markers_resolve_to_missing_kinds() {
    let mut rows = map(5, 1);
    rows[2][2] = ItemKind::AttackBoost as u16;
    rows[3][1] = ItemKind::Random as u16;
    rows[4][4] = ItemKind::Random as u16;

    let (party, _) = create(rows, vec![player(1, 4)]);

    // Draws of 0 take the first missing kind each time.
    assert_eq!(party.grid().item_at(Position::new(1, 3)), ItemKind::DefenseBoost);
    assert_eq!(party.grid().item_at(Position::new(4, 4)), ItemKind::SwapLife);
}

// ===== turn cycle =====

#[test]
fn start_opens_with_a_countdown() {
    let (mut party, _) = create(map(5, 2), vec![player(1, 6), player(2, 4)]);
    party.start().unwrap();

    let (events, directives) = events(&mut party);
    assert_eq!(events[0], PartyEvent::Log(LogEvent::BeginParty { players: vec![P1, P2] }));
    assert!(matches!(events[1], PartyEvent::PlayerList { .. }));
    assert_eq!(directives, vec![TimerDirective::StartCountdown { secs: 3 }]);
    assert_eq!(party.roster().current().map(|p| p.id), Some(P1));
    assert_eq!(party.start(), Err(PartyError::AlreadyStarted));
}

#[test]
fn countdown_expiry_starts_the_round() {
    let bot = Player::new(P1, "bot", PlayerKind::Virtual(BotProfile::Aggressive), PlayerStats::default());
    let (mut party, _) = create(map(5, 2), vec![bot, player(2, 1)]);
    party.start().unwrap();
    party.drain();

    party.countdown_elapsed();
    let (events, directives) = events(&mut party);

    assert!(events.contains(&PartyEvent::TurnStarted { player: P1 }));
    assert!(events.contains(&PartyEvent::VirtualPlayerTurn { player: P1 }));
    assert_eq!(directives, vec![TimerDirective::StartRound { secs: 30 }]);
    assert_eq!(party.phase(), TurnPhase::Active);

    // A stray expiry outside the countdown changes nothing.
    party.countdown_elapsed();
    assert!(party.drain().0.is_empty());
}

#[test]
fn round_expiry_hands_the_turn_on() {
    let (mut party, _) = running(map(5, 2), vec![player(1, 6), player(2, 4)]);
    party.roster.get_mut(P1).unwrap().movement_left = 0;

    party.round_elapsed();
    let (events, directives) = events(&mut party);

    assert!(events.contains(&PartyEvent::Log(LogEvent::EndTurn { player: P1 })));
    assert!(events.contains(&PartyEvent::RoundCount { rounds: 1 }));
    assert_eq!(directives, vec![TimerDirective::StartCountdown { secs: 3 }]);
    assert_eq!(party.current_player(), Some(P2));
    assert_eq!(party.player(P1).unwrap().movement_left, 6);
    assert_eq!(party.roster().iter().filter(|p| p.is_current).count(), 1);
}

#[test]
fn only_the_current_player_may_end_the_round() {
    let (mut party, _) = running(map(5, 2), vec![player(1, 6), player(2, 4)]);

    assert_eq!(party.end_round(P2), Ok(ActionOutcome::Rejected));
    let (dispatches, _) = party.drain();
    assert_eq!(dispatches[0].audience, Audience::Player(P2));
    assert_eq!(dispatches[0].event, PartyEvent::ActionFinished { player: P2 });

    assert_eq!(party.end_round(P1), Ok(ActionOutcome::Applied));
    assert_eq!(party.current_player(), Some(P2));
}

// ===== queries =====

#[test]
fn accessible_positions_follow_the_budget() {
    let (mut party, _) = running(map(10, 1), vec![player(1, 3)]);
    assert_eq!(party.player(P1).unwrap().position(), Position::ORIGIN);

    let cells = party.accessible_positions(P1);
    for expected in [(0, 0), (1, 0), (0, 1), (2, 0), (0, 2), (1, 1)] {
        assert!(cells.contains(&Position::new(expected.0, expected.1)));
    }
    assert!(cells.iter().all(|cell| cell.manhattan(Position::ORIGIN) <= 3));

    let path = party.path(P1, Position::new(2, 1));
    assert_eq!(path.last(), Some(&Position::new(2, 1)));
    assert!(party.path_cost(&path).is_some_and(|cost| cost <= 3));
    assert!(party.path(P1, Position::ORIGIN).is_empty());
    assert!(party.accessible_positions(PlayerId(9)).is_empty());
}

#[test]
fn other_players_block_movement() {
    let (mut party, _) = duel();
    assert!(!party.accessible_positions(P1).contains(&Position::new(2, 3)));
    assert!(party.path(P1, Position::new(2, 3)).is_empty());
}

// ===== actions =====

#[test]
fn acting_on_an_opponent_starts_a_fight() {
    let (mut party, _) = duel();

    let outcome = party.execute_action(P1, Position::new(2, 3));
    let (events, directives) = events(&mut party);

    assert_eq!(outcome, Ok(ActionOutcome::Applied));
    assert_eq!(party.player(P1).unwrap().actions_left, 0);
    assert_eq!(party.phase(), TurnPhase::Paused(PauseReason::Fight));
    assert_eq!(directives, vec![TimerDirective::Pause]);
    assert!(events.contains(&PartyEvent::Log(LogEvent::StartCombat { initiator: P1, opponent: P2 })));
    assert!(events.contains(&PartyEvent::FightTurn { player: P1 }));
    assert_eq!(party.grid().tile_at(Position::new(2, 3)), Some(TerrainKind::Base));

    let fighters = party.fighters().unwrap();
    assert_eq!((fighters[0].pid, fighters[1].pid), (P1, P2));
}

#[test]
fn illegal_actions_are_absorbed() {
    let (mut party, _) = duel();

    assert_eq!(party.execute_action(P1, Position::new(2, 2)), Ok(ActionOutcome::Rejected));
    assert_eq!(party.execute_action(P1, Position::new(0, 0)), Ok(ActionOutcome::Rejected));
    assert_eq!(party.execute_action(P2, Position::new(2, 2)), Ok(ActionOutcome::Rejected));
    assert_eq!(party.execute_action(PlayerId(9), Position::new(2, 2)), Ok(ActionOutcome::Rejected));

    let (events, directives) = events(&mut party);
    assert!(directives.is_empty());
    assert!(events.iter().all(|e| matches!(e, PartyEvent::ActionFinished { .. })));
    assert_eq!(party.player(P1).unwrap().actions_left, 1);
}

#[test]
fn doors_toggle_and_report_their_state() {
    let (mut party, _) = running(map(5, 1), vec![player(1, 4)]);
    let door = Position::new(0, 1);
    party.grid.set_tile(door, TerrainKind::DoorClosed);
    assert!(party.interactive_positions(P1).contains(&door));

    assert_eq!(party.execute_action(P1, door), Ok(ActionOutcome::Applied));
    let (events, _) = events(&mut party);

    assert!(party.grid().is_open_door(door));
    assert!(events.contains(&PartyEvent::DoorToggled {
        door_position: door,
        door_state: DoorState::Open
    }));
    assert!(events.contains(&PartyEvent::Log(LogEvent::OpenDoor { player: P1, position: door })));
    // Movement is left, so the round goes on.
    assert_eq!(party.phase(), TurnPhase::Active);
    assert_eq!(party.execute_action(P1, door), Ok(ActionOutcome::Rejected));
}

#[test]
fn spent_round_ends_on_its_own() {
    let (mut party, _) = running(map(5, 2), vec![player(1, 4), player(2, 3)]);
    let door = Position::new(3, 4);
    party.grid.set_tile(door, TerrainKind::DoorClosed);
    place(&mut party, P1, Position::new(3, 3));
    party.roster.get_mut(P1).unwrap().movement_left = 0;

    party.execute_action(P1, door).unwrap();
    assert_eq!(party.phase(), TurnPhase::Countdown);
    assert_eq!(party.current_player(), Some(P2));
}

// ===== fights =====

#[test]
fn killing_blow_credits_the_winner_and_respawns_the_loser() {
    let (mut party, rng) = duel();
    party.roster.get_mut(P2).unwrap().stats.life = 1;
    party.roster.get_mut(P2).unwrap().take_item(ItemKind::DefenseBoost);
    party.execute_action(P1, Position::new(2, 3)).unwrap();
    party.drain();

    script_hit(&rng);
    assert_eq!(party.handle_attack(), Ok(ActionOutcome::Applied));
    let (events, directives) = events(&mut party);

    assert!(events.contains(&PartyEvent::DiceRolled {
        pid: P1,
        dice_type: DiceType::D6,
        roll: RollKind::Attack,
        result: 6
    }));
    assert!(events.contains(&PartyEvent::FightEnded { winner: Some(P1), loser: Some(P2) }));
    assert!(events.iter().any(|e| matches!(e, PartyEvent::ItemsReplaced { .. })));

    let loser = party.player(P2).unwrap();
    assert_eq!(loser.position(), loser.placement.start);
    assert_eq!(loser.stats.life, 4);
    assert!(loser.items.is_empty());
    assert_eq!(party.grid().item_at(Position::new(2, 3)), ItemKind::DefenseBoost);
    assert_eq!(party.player(P1).unwrap().wins, 1);

    // P1 can still walk, so their round resumes.
    assert!(party.fighters().is_none());
    assert_eq!(party.phase(), TurnPhase::Active);
    assert_eq!(directives, vec![TimerDirective::Resume]);
}

#[test]
fn enough_wins_end_the_party() {
    let (mut party, rng) = duel();
    party.config.wins_to_victory = 1;
    party.roster.get_mut(P2).unwrap().stats.life = 1;
    party.execute_action(P1, Position::new(2, 3)).unwrap();

    script_hit(&rng);
    party.handle_attack().unwrap();
    let (events, directives) = events(&mut party);

    assert!(events.contains(&PartyEvent::GameEnded { winner: Some(P1) }));
    assert_eq!(directives.last(), Some(&TimerDirective::Stop));
    assert!(party.is_finished());
    assert_eq!(party.winner(), Some(P1));
    assert_eq!(party.execute_action(P1, Position::new(2, 3)), Err(PartyError::Finished));
    assert_eq!(party.handle_attack(), Err(PartyError::Finished));
}

#[test]
fn swap_life_item_is_consumed() {
    let (mut party, rng) = duel();
    {
        let defender = party.roster.get_mut(P2).unwrap();
        defender.stats.life = 2;
        defender.take_item(ItemKind::SwapLife);
    }
    party.execute_action(P1, Position::new(2, 3)).unwrap();
    party.drain();

    script_hit(&rng);
    party.handle_attack().unwrap();
    let (events, _) = events(&mut party);

    let report = events.iter().find_map(|e| match e {
        PartyEvent::AttackResolved(report) => Some(*report),
        _ => None,
    });
    let report = report.unwrap();
    assert_eq!(report.hit, Some(HitEffect::LifeSwapped));
    assert_eq!((report.attacker_life, report.defender_life), (2, 4));
    assert!(party.fighters().unwrap()[1].consumed.contains(EffectFlags::SWAP_OPPONENT_LIFE));
    assert!(events.contains(&PartyEvent::FightTurn { player: P2 }));
}

#[test]
fn fight_apis_need_a_fight() {
    let (mut party, _) = duel();
    assert_eq!(party.handle_attack(), Err(PartyError::NoActiveFight));
    assert_eq!(party.handle_escape(), Err(PartyError::NoActiveFight));
}

#[test]
fn successful_escape_ends_the_fight_without_winner() {
    let (mut party, rng) = duel();
    party.execute_action(P1, Position::new(2, 3)).unwrap();
    party.drain();

    rng.push_chance(true);
    party.handle_escape().unwrap();
    let (events, _) = events(&mut party);

    assert!(events.contains(&PartyEvent::EscapeAttempted {
        player: P1,
        succeeded: true,
        remaining: 1
    }));
    assert!(events.contains(&PartyEvent::FightEnded { winner: None, loser: None }));
    assert_eq!(party.player(P1).unwrap().wins, 0);
    assert_eq!(party.phase(), TurnPhase::Active);
}

#[test]
fn spent_escapes_are_rejected() {
    let (mut party, rng) = duel();
    party.config.escape_attempts = 0;
    party.execute_action(P1, Position::new(2, 3)).unwrap();
    party.drain();

    rng.push_chance(true);
    assert_eq!(party.handle_escape(), Ok(ActionOutcome::Rejected));
    assert!(party.fighters().is_some());
}

#[test]
fn double_ice_break_doubles_the_opponent_penalty() {
    let (mut party, _) = duel();
    party.grid.set_tile(Position::new(2, 2), TerrainKind::Ice);
    party.grid.set_tile(Position::new(2, 3), TerrainKind::Ice);
    party.roster.get_mut(P1).unwrap().take_item(ItemKind::DoubleIceBreak);

    party.execute_action(P1, Position::new(2, 3)).unwrap();
    let fighters = party.fighters().unwrap();

    assert_eq!((fighters[0].attack, fighters[0].defense), (2, 2));
    assert_eq!((fighters[1].attack, fighters[1].defense), (0, 0));
}

// ===== debug mode =====

#[test]
fn debug_mode_is_organizer_only_and_rigs_the_dice() {
    let (mut party, rng) = duel();
    assert_eq!(party.toggle_debug_mode(P2), Ok(ActionOutcome::Rejected));
    assert_eq!(party.toggle_debug_mode(P1), Ok(ActionOutcome::Applied));
    assert!(party.is_debug());

    party.execute_action(P1, Position::new(2, 3)).unwrap();
    party.drain();
    rng.push_chance(false);
    party.handle_attack().unwrap();

    let (events, _) = events(&mut party);
    assert!(events.contains(&PartyEvent::DiceRolled {
        pid: P2,
        dice_type: DiceType::D4,
        roll: RollKind::Defense,
        result: 1
    }));
    assert_eq!(party.player(P2).unwrap().stats.life, 4);
    assert_eq!(party.fighters().unwrap()[1].life, 3);
}

#[test]
fn teleport_needs_debug_mode() {
    let (mut party, _) = duel();
    let target = Position::new(0, 4);
    assert_eq!(party.teleport(P1, target), Ok(ActionOutcome::Rejected));

    party.toggle_debug_mode(P1).unwrap();
    assert_eq!(party.teleport(P1, target), Ok(ActionOutcome::Applied));
    assert_eq!(party.player(P1).unwrap().position(), target);
    assert_eq!(party.teleport(P1, Position::new(2, 3)), Ok(ActionOutcome::Rejected));
}

// ===== movement =====

#[test]
fn third_item_pauses_for_a_choice() {
    let mut rows = map(5, 1);
    rows[0][2] = ItemKind::DefenseBoost as u16;
    rows[0][4] = ItemKind::SwapLife as u16;
    rows[2][4] = ItemKind::SecondChance as u16;
    let (mut party, _) = running(rows, vec![player(1, 6)]);

    for target in [Position::new(2, 0), Position::new(4, 0)] {
        assert_eq!(party.move_player(P1, target), Ok(ActionOutcome::Applied));
        assert_eq!(party.phase(), TurnPhase::Active);
    }
    party.drain();

    party.move_player(P1, Position::new(4, 2)).unwrap();
    let (dispatches, directives) = party.drain();
    assert_eq!(party.phase(), TurnPhase::Paused(PauseReason::ItemChoice));
    assert_eq!(directives, vec![TimerDirective::Pause]);
    assert!(dispatches.iter().any(|d| d.audience == Audience::Player(P1)
        && matches!(d.event, PartyEvent::ItemChoiceRequired { .. })));

    assert_eq!(party.move_player(P1, Position::new(4, 3)), Ok(ActionOutcome::Rejected));
    assert_eq!(party.remove_player_item(P1, ItemKind::Flag), Ok(ActionOutcome::Rejected));
    assert_eq!(party.remove_player_item(P1, ItemKind::SwapLife), Ok(ActionOutcome::Applied));

    let held = &party.player(P1).unwrap().items;
    assert_eq!(held.as_slice(), &[ItemKind::DefenseBoost, ItemKind::SecondChance]);
    assert_eq!(party.grid().item_at(Position::new(4, 2)), ItemKind::SwapLife);
    // Budget spent: the round closes instead of resuming.
    assert_eq!(party.phase(), TurnPhase::Countdown);
}

#[test]
fn carrying_the_flag_home_wins() {
    let mut rows = map(5, 1);
    rows[0][2] = ItemKind::Flag as u16;
    let (mut party, _) = running(rows, vec![player(1, 6)]);

    party.move_player(P1, Position::new(2, 0)).unwrap();
    assert!(party.player(P1).unwrap().holds(ItemKind::Flag));
    assert!(!party.is_finished());

    party.move_player(P1, Position::ORIGIN).unwrap();
    let (events, _) = events(&mut party);
    assert!(events.contains(&PartyEvent::GameEnded { winner: Some(P1) }));
    assert_eq!(party.winner(), Some(P1));
}

#[test]
fn moves_outside_the_turn_are_rejected() {
    let (mut party, _) = duel();
    assert_eq!(party.move_player(P2, Position::new(2, 4)), Ok(ActionOutcome::Rejected));
    party.roster.get_mut(P1).unwrap().movement_left = 1;
    assert_eq!(party.move_player(P1, Position::new(0, 4)), Ok(ActionOutcome::Rejected));
}

// ===== give up =====

#[test]
fn forfeit_scatters_items_and_leaves_the_rotation() {
    let (mut party, _) = duel();
    let former = Position::new(2, 3);
    party.roster.get_mut(P2).unwrap().take_item(ItemKind::Flag);

    assert_eq!(party.give_up(P2), Ok(ActionOutcome::Applied));
    let (events, _) = events(&mut party);

    assert!(events.contains(&PartyEvent::Log(LogEvent::ItemLost { player: P2, item: ItemKind::Flag })));
    assert!(party.player(P2).unwrap().items.is_empty());
    assert_eq!(party.grid().item_at(former), ItemKind::None);
    assert!(party.grid().positions().any(|p| party.grid().item_at(p) == ItemKind::Flag));
    assert!(!party.interactive_positions(P1).contains(&former));

    assert_eq!(party.give_up(P2), Ok(ActionOutcome::Rejected));
    let (dispatches, _) = party.drain();
    assert_eq!(dispatches.len(), 1);
    assert_eq!(dispatches[0].audience, Audience::Player(P2));
    assert_eq!(dispatches[0].event, PartyEvent::ActionFinished { player: P2 });

    party.end_round(P1).unwrap();
    assert_eq!(party.current_player(), Some(P3));
}

#[test]
fn last_player_standing_wins_by_default() {
    let (mut party, _) = running(map(5, 2), vec![player(1, 6), player(2, 4)]);
    party.give_up(P1).unwrap();

    let (events, directives) = events(&mut party);
    assert!(events.contains(&PartyEvent::GameEnded { winner: Some(P2) }));
    assert_eq!(directives.last(), Some(&TimerDirective::Stop));
    assert_eq!(party.give_up(P2), Err(PartyError::Finished));
}

#[test]
fn no_humans_left_ends_the_party() {
    let bot = |id| Player::new(PlayerId(id), "bot", PlayerKind::Virtual(BotProfile::Defensive), PlayerStats::default());
    let (mut party, _) = running(map(7, 3), vec![player(1, 9), bot(2), bot(3)]);

    party.give_up(P1).unwrap();
    assert!(party.is_finished());
    assert_eq!(party.winner(), None);
}

#[test]
fn forfeit_mid_fight_hands_the_fight_over() {
    let (mut party, _) = duel();
    party.toggle_debug_mode(P1).unwrap();
    party.execute_action(P1, Position::new(2, 3)).unwrap();
    party.drain();

    party.give_up(P2).unwrap();
    let (events, _) = events(&mut party);

    assert!(events.contains(&PartyEvent::FightEnded { winner: Some(P1), loser: Some(P2) }));
    assert_eq!(party.player(P1).unwrap().wins, 0);
    assert!(party.fighters().is_none());
    assert_eq!(party.phase(), TurnPhase::Active);
    assert!(party.is_debug());
}

#[test]
fn organizer_forfeit_turns_debug_off() {
    let (mut party, _) = duel();
    party.toggle_debug_mode(P1).unwrap();
    party.drain();

    party.give_up(P1).unwrap();
    let (events, _) = events(&mut party);

    assert!(!party.is_debug());
    assert!(events.contains(&PartyEvent::DebugMode { enabled: false }));
    assert_eq!(party.current_player(), Some(P2));
}

#[test]
fn give_up_before_start_is_ignored() {
    let (mut party, _) = create(map(5, 2), vec![player(1, 6), player(2, 4)]);
    assert_eq!(party.give_up(P1), Ok(ActionOutcome::Rejected));
    assert_eq!(party.give_up(PlayerId(9)), Ok(ActionOutcome::Rejected));
    assert!(party.player(P1).unwrap().is_active());
}

#[test]
fn destroy_is_idempotent() {
    let (mut party, _) = duel();
    party.destroy();
    party.destroy();

    let (_, directives) = party.drain();
    assert_eq!(directives, vec![TimerDirective::Stop]);
    assert!(party.is_destroyed());
    assert_eq!(party.give_up(P1), Err(PartyError::Finished));
}
