// tests/dealer_tests.rs

use std::collections::HashSet;

use swiss_engine::domain::{default_deck_pool, default_map_pool, ResourceKind};
use swiss_engine::engine::{deal_decks, deal_maps, EngineError};
use swiss_engine::infra::DeterministicRng;

fn pool(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

//
// TEST 1: каждый стол получает нужное число разных колод
//
#[test]
fn default_pool_deals_distinct_decks_per_table() {
    for seed in 0..50u64 {
        let mut rng = DeterministicRng::from_seed(seed);
        let decks = deal_decks(&default_deck_pool(), 12, 4, &mut rng).unwrap();

        assert_eq!(decks.len(), 12);
        assert_eq!(decks.keys().copied().collect::<Vec<_>>(), (1..=12).collect::<Vec<_>>());

        for (table, list) in &decks {
            assert_eq!(list.len(), 4, "table {table}");
            let unique: HashSet<&String> = list.iter().collect();
            assert_eq!(unique.len(), 4, "seed {seed}: duplicate deck at table {table}");
        }
    }
}

//
// TEST 2: колоды берутся из пула, не больше, чем там было
//
#[test]
fn dealt_decks_never_exceed_pool_multiplicity() {
    let pool = default_deck_pool();
    let mut rng = DeterministicRng::from_seed(7);
    let decks = deal_decks(&pool, 12, 4, &mut rng).unwrap();

    let mut remaining = pool.clone();
    for d in decks.values().flatten() {
        let pos = remaining
            .iter()
            .position(|x| x == d)
            .expect("deck must come from the pool");
        remaining.swap_remove(pos);
    }
    assert_eq!(remaining.len(), pool.len() - 48);
}

//
// TEST 3: короткий пул
//
#[test]
fn short_deck_pool_is_rejected() {
    let mut rng = DeterministicRng::from_seed(1);
    let err = deal_decks(&pool(&["A", "B", "C"]), 1, 4, &mut rng).unwrap_err();

    assert_eq!(
        err,
        EngineError::InsufficientPool {
            kind: ResourceKind::Deck,
            needed: 4,
            available: 3,
        }
    );
}

//
// TEST 4: пул из одинаковых колод не даёт разных за столом
//
#[test]
fn uniform_deck_pool_fails_distinctness() {
    let mut rng = DeterministicRng::from_seed(1);
    let err = deal_decks(&pool(&["X", "X", "X", "X"]), 1, 2, &mut rng).unwrap_err();

    assert_eq!(
        err,
        EngineError::NoDistinctItem {
            kind: ResourceKind::Deck,
            table: 1,
        }
    );
}

//
// TEST 5: карты уникальны между столами
//
#[test]
fn maps_are_unique_across_tables() {
    let mut rng = DeterministicRng::from_seed(3);
    let maps = deal_maps(&default_map_pool(), 12, &mut rng).unwrap();

    assert_eq!(maps.len(), 12);
    let unique: HashSet<&String> = maps.values().collect();
    assert_eq!(unique.len(), 12);
    assert!(maps.keys().all(|t| (1..=12).contains(t)));
}

//
// TEST 6: дубликаты в пуле карт не считаются
//
#[test]
fn duplicate_map_names_collapse() {
    let mut rng = DeterministicRng::from_seed(3);
    let maps = deal_maps(&pool(&["Soho", "Soho", "Yukon"]), 2, &mut rng).unwrap();
    let mut got: Vec<&String> = maps.values().collect();
    got.sort();
    assert_eq!(got, vec!["Soho", "Yukon"]);

    let err = deal_maps(&pool(&["Soho", "Soho", "Yukon"]), 3, &mut rng).unwrap_err();
    assert_eq!(
        err,
        EngineError::InsufficientPool {
            kind: ResourceKind::Map,
            needed: 3,
            available: 2,
        }
    );
}

//
// TEST 7: один сид, одна раздача
//
#[test]
fn same_seed_same_resources() {
    let mut r1 = DeterministicRng::from_seed(99);
    let mut r2 = DeterministicRng::from_seed(99);

    assert_eq!(
        deal_decks(&default_deck_pool(), 12, 4, &mut r1).unwrap(),
        deal_decks(&default_deck_pool(), 12, 4, &mut r2).unwrap()
    );
    assert_eq!(
        deal_maps(&default_map_pool(), 12, &mut r1).unwrap(),
        deal_maps(&default_map_pool(), 12, &mut r2).unwrap()
    );
}
