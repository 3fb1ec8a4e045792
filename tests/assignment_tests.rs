// tests/assignment_tests.rs

use std::collections::{BTreeMap, BTreeSet, HashSet};

use proptest::prelude::*;

use swiss_engine::domain::{ForcedRepeat, Pairing, PlayerName, TableId};
use swiss_engine::engine::{assign_tables, EngineError};
use swiss_engine::infra::DeterministicRng;

fn pairs_of(n: usize) -> Vec<Pairing> {
    (0..n)
        .map(|i| Pairing::new(format!("P{:02}", 2 * i + 1), format!("P{:02}", 2 * i + 2)))
        .collect()
}

fn used(entries: &[(&str, Vec<TableId>)]) -> BTreeMap<PlayerName, BTreeSet<TableId>> {
    entries
        .iter()
        .map(|(p, tables)| (p.to_string(), tables.iter().copied().collect()))
        .collect()
}

proptest! {
    /// Пары раскладываются по разным столам из 1..=N, каждая ровно один раз.
    #[test]
    fn prop_assignment_is_injective(seed in any::<u64>(), n_pairs in 1usize..=12) {
        let pairs = pairs_of(n_pairs);
        let mut rng = DeterministicRng::from_seed(seed);

        let out = assign_tables(&pairs, &BTreeMap::new(), 12, 100, &mut rng).unwrap();

        prop_assert_eq!(out.tables.len(), n_pairs);
        prop_assert!(out.tables.keys().all(|t| (1..=12).contains(t)));
        prop_assert!(out.forced_repeats.is_empty());

        let placed: HashSet<&Pairing> = out.tables.values().collect();
        let wanted: HashSet<&Pairing> = pairs.iter().collect();
        prop_assert_eq!(placed, wanted);
    }
}

#[test]
fn more_pairs_than_tables_is_rejected() {
    let mut rng = DeterministicRng::from_seed(1);
    let err = assign_tables(&pairs_of(3), &BTreeMap::new(), 2, 10, &mut rng).unwrap_err();
    assert_eq!(err, EngineError::TooManyPairs { pairs: 3, tables: 2 });
}

#[test]
fn no_pairs_no_assignment() {
    let mut rng = DeterministicRng::from_seed(1);
    let err = assign_tables(&[], &BTreeMap::new(), 2, 10, &mut rng).unwrap_err();
    assert_eq!(err, EngineError::AssignmentExhausted { attempts: 0 });
}

#[test]
fn strict_pass_avoids_used_table_when_possible() {
    let pairs = vec![Pairing::new("A", "B"), Pairing::new("C", "D")];
    let prev = used(&[("A", vec![1]), ("B", vec![1])]);

    for seed in 0..100u64 {
        let mut rng = DeterministicRng::from_seed(seed);
        let out = assign_tables(&pairs, &prev, 3, 100, &mut rng).unwrap();

        assert!(out.forced_repeats.is_empty(), "seed {seed}");
        assert_ne!(out.tables.get(&1), Some(&pairs[0]), "seed {seed}");
    }
}

//
// Два стола, две пары, все уже сидели за обоими: повтор неизбежен
// и каждый игрок попадает в список вынужденных повторов.
//
#[test]
fn exhausted_tables_report_forced_repeats() {
    let pairs = vec![Pairing::new("A", "B"), Pairing::new("C", "D")];
    let prev = used(&[
        ("A", vec![1, 2]),
        ("B", vec![1, 2]),
        ("C", vec![1, 2]),
        ("D", vec![1, 2]),
    ]);
    let mut rng = DeterministicRng::from_seed(11);

    let out = assign_tables(&pairs, &prev, 2, 3, &mut rng).unwrap();

    assert_eq!(out.tables.len(), 2);
    assert_eq!(out.forced_repeats.len(), 4);

    for (&table, pair) in &out.tables {
        for p in pair.players() {
            assert!(out.forced_repeats.contains(&ForcedRepeat {
                player: p.to_string(),
                table,
            }));
        }
    }
}

#[test]
fn relaxed_pass_prefers_lower_penalty_table() {
    // Стол 1 использован обоими A и B, стол 2 только A: A-B должны сесть за 2.
    let pairs = vec![Pairing::new("A", "B")];
    let prev = used(&[("A", vec![1, 2]), ("B", vec![1])]);

    for seed in 0..20u64 {
        let mut rng = DeterministicRng::from_seed(seed);
        let out = assign_tables(&pairs, &prev, 2, 2, &mut rng).unwrap();

        assert_eq!(out.tables.get(&2), Some(&pairs[0]));
        assert_eq!(
            out.forced_repeats,
            vec![ForcedRepeat {
                player: "A".into(),
                table: 2,
            }]
        );
    }
}
