//! RNG tests for swiss-engine
//!
//! Эти тесты проверяют:
//! - детерминированность DeterministicRng
//! - различие seed → различие перемешиваний
//! - что shuffle() только переставляет элементы
//! - работу SystemRng через RandomSource

use swiss_engine::engine::RandomSource;
use swiss_engine::infra::{DeterministicRng, SystemRng};

//
// TEST 1: DeterministicRng reproducibility
//
#[test]
fn deterministic_rng_same_seed_same_shuffle() {
    let mut r1 = DeterministicRng::from_seed(123);
    let mut r2 = DeterministicRng::from_seed(123);

    let mut a: Vec<u32> = (0..24).collect();
    let mut b: Vec<u32> = (0..24).collect();

    r1.shuffle(&mut a);
    r2.shuffle(&mut b);

    assert_eq!(a, b, "Same seed must produce identical shuffle");
}

//
// TEST 2: different seeds produce different shuffle
//
#[test]
fn deterministic_rng_different_seeds_different_shuffle() {
    let mut r1 = DeterministicRng::from_seed(111);
    let mut r2 = DeterministicRng::from_seed(222);

    let mut a: Vec<u32> = (0..52).collect();
    let mut b: Vec<u32> = (0..52).collect();

    r1.shuffle(&mut a);
    r2.shuffle(&mut b);

    assert_ne!(a, b, "Different seeds must produce different shuffle");
}

//
// TEST 3: shuffle keeps every element exactly once
//
#[test]
fn shuffle_is_a_permutation() {
    let mut rng = DeterministicRng::from_seed(7);
    let mut v: Vec<u32> = (0..52).collect();

    rng.shuffle(&mut v);

    let mut sorted = v.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..52).collect::<Vec<_>>());
}

//
// TEST 4: successive shuffles advance the stream
//
#[test]
fn successive_shuffles_differ() {
    let mut rng = DeterministicRng::from_seed(9);

    let mut first: Vec<u32> = (0..52).collect();
    let mut second: Vec<u32> = (0..52).collect();
    rng.shuffle(&mut first);
    rng.shuffle(&mut second);

    assert_ne!(first, second);
}

//
// TEST 5: SystemRng работает через тот же трейт
//
#[test]
fn system_rng_shuffles_through_trait() {
    fn shuffled<R: RandomSource>(rng: &mut R) -> Vec<u32> {
        let mut v: Vec<u32> = (0..24).collect();
        rng.shuffle(&mut v);
        v.sort_unstable();
        v
    }

    let mut rng = SystemRng::default();
    assert_eq!(shuffled(&mut rng), (0..24).collect::<Vec<_>>());
}

//
// TEST 6: пустой и одноэлементный срез
//
#[test]
fn tiny_slices_are_fine() {
    let mut rng = DeterministicRng::from_seed(1);

    let mut empty: Vec<u32> = Vec::new();
    rng.shuffle(&mut empty);
    assert!(empty.is_empty());

    let mut one = vec![5u32];
    rng.shuffle(&mut one);
    assert_eq!(one, vec![5]);
}
