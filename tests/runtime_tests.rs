// tests/runtime_tests.rs

use std::collections::{BTreeMap, BTreeSet};

use swiss_engine::domain::{PlayerName, ResourceKind, RosterError, TableId, TournamentConfig};
use swiss_engine::engine::EngineError;
use swiss_engine::{TournamentError, TournamentPhase, TournamentRuntime};

fn runtime_with(names: &[&str], config: TournamentConfig, seed: u64) -> TournamentRuntime {
    let mut rt = TournamentRuntime::with_seed(config, seed).unwrap();
    for n in names {
        rt.add_player(*n).unwrap();
    }
    rt
}

/// 4 игрока, 2 стола, 3 раунда.
fn four_player_runtime(seed: u64) -> TournamentRuntime {
    runtime_with(&["A", "B", "C", "D"], TournamentConfig::small(2, 3), seed)
}

/// Побеждает первый игрок каждой пары.
fn first_seat_wins(rt: &TournamentRuntime) -> BTreeMap<TableId, PlayerName> {
    rt.current_pairings()
        .iter()
        .map(|(&t, p)| (t, p.a.clone()))
        .collect()
}

fn play_round(rt: &mut TournamentRuntime) {
    rt.pair_next_round().unwrap();
    let winners = first_seat_wins(rt);
    rt.submit_results(&winners).unwrap();
}

//
// TEST 1: полный цикл фаз
//
#[test]
fn phases_follow_round_lifecycle() {
    let mut rt = four_player_runtime(1);
    assert_eq!(rt.phase(), TournamentPhase::NotStarted);
    assert!(rt.standings().is_empty());

    rt.start().unwrap();
    assert_eq!(rt.phase(), TournamentPhase::AwaitingPairing);
    assert_eq!(rt.round_no(), 0);
    assert_eq!(rt.standings().len(), 4);

    for round in 1..=3 {
        rt.pair_next_round().unwrap();
        assert_eq!(rt.phase(), TournamentPhase::AwaitingResults);
        assert_eq!(rt.round_no(), round);
        assert_eq!(rt.current_pairings().len(), 2);

        let winners = first_seat_wins(&rt);
        rt.submit_results(&winners).unwrap();
        assert!(rt.current_pairings().is_empty());
    }

    assert_eq!(rt.phase(), TournamentPhase::Finished);
    assert!(rt.is_finished());
    assert_eq!(
        rt.pair_next_round(),
        Err(TournamentError::RoundCapReached { rounds: 3 })
    );
}

//
// TEST 2: четыре игрока, три раунда, ни одного реванша
//
#[test]
fn four_players_meet_everyone_exactly_once() {
    for seed in 0..20u64 {
        let mut rt = four_player_runtime(seed);
        rt.start().unwrap();
        for _ in 0..3 {
            play_round(&mut rt);
        }

        let meetings: BTreeSet<BTreeSet<&str>> = rt
            .data()
            .match_log
            .iter()
            .map(|m| [m.player_a.as_str(), m.player_b.as_str()].into_iter().collect())
            .collect();
        assert_eq!(meetings.len(), 6, "seed {seed}");

        for opps in rt.data().prev_opponents.values() {
            assert_eq!(opps.len(), 3);
        }
    }
}

//
// TEST 3: жеребьёвка до старта и повторная жеребьёвка
//
#[test]
fn pairing_requires_awaiting_pairing_phase() {
    let mut rt = four_player_runtime(2);
    assert_eq!(
        rt.pair_next_round(),
        Err(TournamentError::InvalidPhase {
            expected: TournamentPhase::AwaitingPairing,
            found: TournamentPhase::NotStarted,
        })
    );

    rt.start().unwrap();
    rt.pair_next_round().unwrap();
    assert_eq!(
        rt.pair_next_round(),
        Err(TournamentError::InvalidPhase {
            expected: TournamentPhase::AwaitingPairing,
            found: TournamentPhase::AwaitingResults,
        })
    );
    assert_eq!(rt.round_no(), 1);
}

//
// TEST 4: неполные или неверные результаты ничего не меняют
//
#[test]
fn bad_submissions_leave_state_untouched() {
    let mut rt = four_player_runtime(3);
    rt.start().unwrap();
    rt.pair_next_round().unwrap();
    let before = rt.data().clone();

    let full = first_seat_wins(&rt);
    let tables: Vec<TableId> = full.keys().copied().collect();

    // Один стол без победителя.
    let mut partial = full.clone();
    partial.remove(&tables[1]);
    assert_eq!(
        rt.submit_results(&partial),
        Err(TournamentError::IncompleteSubmission { table: tables[1] })
    );

    // Победитель не сидит за этим столом.
    let mut wrong = full.clone();
    let stranger = rt.current_pairings()[&tables[1]].a.clone();
    wrong.insert(tables[0], stranger.clone());
    assert_eq!(
        rt.submit_results(&wrong),
        Err(TournamentError::InvalidWinner {
            table: tables[0],
            winner: stranger,
        })
    );

    // Лишний стол.
    let mut extra = full.clone();
    extra.insert(99, "A".into());
    assert_eq!(
        rt.submit_results(&extra),
        Err(TournamentError::UnknownTable { table: 99 })
    );

    assert_eq!(rt.data(), &before);
    assert!(!rt.can_undo());
}

//
// TEST 5: undo возвращает состояние байт в байт
//
#[test]
fn undo_restores_exact_pre_submit_state() {
    let mut rt = four_player_runtime(4);
    rt.start().unwrap();
    play_round(&mut rt);

    rt.pair_next_round().unwrap();
    let before_submit = rt.data().clone();
    let winners = first_seat_wins(&rt);

    rt.submit_results(&winners).unwrap();
    let after_submit = rt.data().clone();
    assert_eq!(rt.undo_depth(), 2);

    rt.undo().unwrap();
    assert_eq!(rt.data(), &before_submit);
    assert_eq!(rt.phase(), TournamentPhase::AwaitingResults);
    assert_eq!(rt.undo_depth(), 1);

    rt.submit_results(&winners).unwrap();
    assert_eq!(rt.data(), &after_submit);
}

#[test]
fn undo_with_empty_history_fails() {
    let mut rt = four_player_runtime(5);
    assert_eq!(rt.undo(), Err(TournamentError::UndoUnavailable));

    rt.start().unwrap();
    assert!(!rt.can_undo());
    assert_eq!(rt.undo(), Err(TournamentError::UndoUnavailable));
}

//
// TEST 6: после финального раунда undo снова открывает раунд
//
#[test]
fn undo_after_final_round_reopens_it() {
    let mut rt = four_player_runtime(6);
    rt.start().unwrap();
    for _ in 0..3 {
        play_round(&mut rt);
    }
    assert!(rt.is_finished());

    rt.undo().unwrap();
    assert_eq!(rt.phase(), TournamentPhase::AwaitingResults);
    assert_eq!(rt.round_no(), 3);
    assert_eq!(rt.data().match_log.len(), 4);
}

//
// TEST 7: ростер
//
#[test]
fn roster_is_frozen_after_start() {
    let mut rt = four_player_runtime(7);
    rt.start().unwrap();

    assert_eq!(
        rt.add_player("E"),
        Err(TournamentError::Roster(RosterError::EditAfterStart))
    );
    assert_eq!(
        rt.remove_player("A"),
        Err(TournamentError::Roster(RosterError::EditAfterStart))
    );
    assert_eq!(rt.data().roster.len(), 4);
}

#[test]
fn roster_capacity_follows_table_count() {
    let mut rt = four_player_runtime(8);
    assert_eq!(
        rt.add_player("E"),
        Err(TournamentError::Roster(RosterError::CapacityExceeded {
            capacity: 4
        }))
    );
}

#[test]
fn odd_roster_cannot_start() {
    let mut rt = runtime_with(&["A", "B", "C"], TournamentConfig::small(2, 3), 9);
    assert_eq!(
        rt.can_start(),
        Err(TournamentError::Roster(RosterError::OddCount { count: 3 }))
    );
    assert!(rt.start().is_err());
    assert_eq!(rt.phase(), TournamentPhase::NotStarted);

    rt.remove_player("C").unwrap();
    assert!(rt.start().is_ok());
}

//
// TEST 8: нехватка колод: старт отклонён, ничего не поменялось
//
#[test]
fn short_deck_pool_blocks_start_without_side_effects() {
    let config = TournamentConfig {
        deck_pool: vec!["Alice".into()],
        ..TournamentConfig::small(2, 3)
    };
    let mut rt = runtime_with(&["A", "B", "C", "D"], config, 10);
    let before = rt.data().clone();

    assert_eq!(
        rt.start(),
        Err(TournamentError::Resource(EngineError::InsufficientPool {
            kind: ResourceKind::Deck,
            needed: 8,
            available: 1,
        }))
    );
    assert_eq!(rt.data(), &before);
    assert_eq!(rt.phase(), TournamentPhase::NotStarted);
}

#[test]
fn start_deals_resources_for_every_table() {
    let mut rt = four_player_runtime(11);
    rt.start().unwrap();

    let res = rt.resources();
    assert_eq!(res.decks.len(), 2);
    assert_eq!(res.maps.len(), 2);
    assert_ne!(res.map_for(1), res.map_for(2));
    for table in 1..=2 {
        assert_eq!(res.decks_for(table).len(), 4);
    }

    // Ресурсы не меняются от раунда к раунду.
    let dealt = res.clone();
    play_round(&mut rt);
    assert_eq!(rt.resources(), &dealt);
}

//
// TEST 9: reset
//
#[test]
fn reset_returns_to_empty_tournament() {
    let mut rt = four_player_runtime(12);
    rt.start().unwrap();
    play_round(&mut rt);

    rt.reset();
    assert_eq!(rt.phase(), TournamentPhase::NotStarted);
    assert!(rt.data().roster.is_empty());
    assert!(rt.data().match_log.is_empty());
    assert!(rt.resources().is_empty());
    assert_eq!(rt.undo_depth(), 0);
    assert_eq!(rt.round_no(), 0);
}

//
// TEST 10: полный турнир на 24 игрока
//
#[test]
fn full_default_tournament_keeps_invariants() {
    let names: Vec<String> = (1..=24).map(|i| format!("Player {:02}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut rt = runtime_with(&refs, TournamentConfig::default(), 2024);
    rt.start().unwrap();

    while !rt.is_finished() {
        let forced = rt.pair_next_round().unwrap();
        for r in &forced {
            assert!(rt.data().prev_tables[&r.player].contains(&r.table));
        }
        assert_eq!(rt.current_pairings().len(), 12);
        let winners = first_seat_wins(&rt);
        rt.submit_results(&winners).unwrap();
    }

    let data = rt.data();
    assert_eq!(data.round_no, 5);
    assert_eq!(data.match_log.len(), 60);

    for round in 1..=5 {
        let seated: BTreeSet<&str> = data
            .match_log
            .iter()
            .filter(|m| m.round == round)
            .flat_map(|m| [m.player_a.as_str(), m.player_b.as_str()])
            .collect();
        assert_eq!(seated.len(), 24, "round {round}");
    }

    let table = rt.standings();
    assert_eq!(table.len(), 24);
    assert_eq!(table[0].place, 1);
    let total_wins: u32 = table.iter().map(|r| r.standing.wins).sum();
    assert_eq!(total_wins, 60);
    for r in &table {
        assert_eq!(r.standing.score, data.score_of(&r.standing.player));
        assert_eq!(r.standing.wins + r.standing.losses, 5);
    }
}

//
// TEST 11: один сид, один турнир
//
#[test]
fn same_seed_replays_same_tournament() {
    let run = |seed: u64| {
        let mut rt = four_player_runtime(seed);
        rt.start().unwrap();
        for _ in 0..3 {
            play_round(&mut rt);
        }
        rt.data().clone()
    };

    assert_eq!(run(77), run(77));
}

#[test]
fn set_seed_makes_pairing_reproducible() {
    let mut r1 = four_player_runtime(100);
    let mut r2 = four_player_runtime(200);
    r1.set_seed(7);
    r2.set_seed(7);

    r1.start().unwrap();
    r2.start().unwrap();
    r1.pair_next_round().unwrap();
    r2.pair_next_round().unwrap();

    assert_eq!(r1.resources(), r2.resources());
    assert_eq!(r1.current_pairings(), r2.current_pairings());
}

#[test]
fn invalid_config_is_rejected() {
    let err = TournamentRuntime::new(TournamentConfig::small(0, 3)).unwrap_err();
    assert!(matches!(err, TournamentError::InvalidConfig(_)));
}
