use lotto_core::{EventBus, LottoConfig, SelectError, Selector};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

fn preselected(seed: u64, picks: &[u8]) -> (Selector, EventBus) {
    let mut selector = Selector::with_seed(seed);
    let mut events = EventBus::default();
    for pick in picks {
        selector
            .add_preselection(*pick, &mut events)
            .expect("preselect");
    }
    (selector, events)
}

fn assert_valid_draw(numbers: &[u8], picks: &[u8]) {
    assert_eq!(numbers.len(), 6);
    let unique: HashSet<u8> = numbers.iter().copied().collect();
    assert_eq!(unique.len(), 6, "duplicates in {numbers:?}");
    assert!(numbers.iter().all(|n| (1..=45).contains(n)));
    assert_eq!(&numbers[..picks.len()], picks);
}

macro_rules! draw_case {
    ($name:ident, [$($pick:expr),*]) => {
        #[test]
        fn $name() {
            let picks: &[u8] = &[$($pick),*];
            let (mut selector, mut events) = preselected(0xC0FFEE, picks);
            let result = selector.draw(&mut events);
            assert_valid_draw(result.numbers(), picks);
            assert_eq!(result.fillers().len(), 6 - picks.len());
        }
    };
}

draw_case!(draw_without_preselection, []);
draw_case!(draw_with_one, [45]);
draw_case!(draw_with_two, [7, 22]);
draw_case!(draw_with_three, [1, 2, 3]);
draw_case!(draw_with_four, [40, 10, 30, 20]);
draw_case!(draw_with_five, [1, 11, 21, 31, 41]);

macro_rules! reject_case {
    ($name:ident, [$($pick:expr),*], $extra:expr, $expected:pat) => {
        #[test]
        fn $name() {
            let picks: &[u8] = &[$($pick),*];
            let (mut selector, mut events) = preselected(1, picks);
            let err = selector.add_preselection($extra, &mut events).unwrap_err();
            assert!(matches!(err, $expected), "unexpected {err:?}");
            assert_eq!(selector.preselected(), picks);
        }
    };
}

reject_case!(reject_sixth, [1, 2, 3, 4, 5], 6, SelectError::CapacityExceeded { max: 5 });
reject_case!(reject_duplicate, [8], 8, SelectError::DuplicateValue(8));
reject_case!(reject_zero, [], 0, SelectError::OutOfRange { .. });
reject_case!(reject_above_range, [3], 46, SelectError::OutOfRange { .. });
reject_case!(full_set_reports_capacity_before_duplicate, [1, 2, 3, 4, 5], 1, SelectError::CapacityExceeded { .. });

#[test]
fn same_seed_and_actions_replay_identically() {
    let (mut left, mut left_events) = preselected(99, &[4, 5]);
    let (mut right, mut right_events) = preselected(99, &[4, 5]);
    for _ in 0..3 {
        assert_eq!(left.draw(&mut left_events), right.draw(&mut right_events));
    }
}

#[test]
fn redraws_vary_fillers() {
    let (mut selector, mut events) = preselected(3, &[7, 22]);
    let draws: HashSet<Vec<u8>> = (0..20)
        .map(|_| selector.draw(&mut events).fillers().to_vec())
        .collect();
    assert!(draws.len() > 1);
}

#[test]
fn fillers_cover_unused_pool_evenly() {
    let (mut selector, mut events) = preselected(2024, &[7, 22]);
    let mut counts: BTreeMap<u8, u32> = BTreeMap::new();
    let rounds = 4300;
    for _ in 0..rounds {
        for number in selector.draw(&mut events).fillers() {
            *counts.entry(*number).or_default() += 1;
        }
    }
    assert!(!counts.contains_key(&7));
    assert!(!counts.contains_key(&22));
    assert_eq!(counts.len(), 43);
    // 4300 rounds * 4 fillers / 43 numbers = 400 expected hits each.
    for (number, hits) in counts {
        assert!((300..=500).contains(&hits), "{number} hit {hits} times");
    }
}

#[test]
fn empty_preselection_samples_whole_range_evenly() {
    let (mut selector, mut events) = preselected(77, &[]);
    let mut counts: BTreeMap<u8, u32> = BTreeMap::new();
    let rounds = 3000;
    for _ in 0..rounds {
        let result = selector.draw(&mut events);
        assert!(result.preselected().is_empty());
        for number in result.numbers() {
            *counts.entry(*number).or_default() += 1;
        }
    }
    assert_eq!(counts.len(), 45);
    assert_eq!(counts.keys().next(), Some(&1));
    assert_eq!(counts.keys().last(), Some(&45));
    // 3000 rounds * 6 numbers / 45 = 400 expected hits each.
    for (number, hits) in counts {
        assert!((300..=500).contains(&hits), "{number} hit {hits} times");
    }
}

#[test]
fn custom_config_draws_within_range() {
    let config = LottoConfig {
        min_number: 1,
        max_number: 49,
        pick_count: 7,
        max_preselect: 3,
    };
    let mut selector = Selector::new(config, 5).expect("config");
    let mut events = EventBus::default();
    selector.add_preselection(49, &mut events).expect("preselect");
    let result = selector.draw(&mut events);
    assert_eq!(result.len(), 7);
    assert_eq!(result.preselected(), &[49]);
    assert!(result.numbers().iter().all(|n| (1..=49).contains(n)));
}

#[test]
fn invalid_config_is_rejected() {
    let config = LottoConfig {
        pick_count: 50,
        ..LottoConfig::default()
    };
    assert!(Selector::new(config, 0).is_err());
}

fn picks_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::hash_set(1u8..=45, 0..=5).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn every_draw_is_six_distinct_numbers(picks in picks_strategy(), seed in any::<u64>()) {
        let (mut selector, mut events) = preselected(seed, &picks);
        let result = selector.draw(&mut events);
        let unique: HashSet<u8> = result.numbers().iter().copied().collect();
        prop_assert_eq!(result.len(), 6);
        prop_assert_eq!(unique.len(), 6);
        prop_assert!(result.numbers().iter().all(|n| (1..=45).contains(n)));
        prop_assert_eq!(result.preselected(), picks.as_slice());
        prop_assert!(result.fillers().iter().all(|n| !picks.contains(n)));
    }

    #[test]
    fn reset_always_returns_to_idle(picks in picks_strategy(), draws in 0usize..3) {
        let (mut selector, mut events) = preselected(11, &picks);
        for _ in 0..draws {
            selector.draw(&mut events);
        }
        selector.reset(&mut events);
        prop_assert!(selector.preselected().is_empty());
        prop_assert!(!selector.has_run());
        prop_assert!(selector.add_preselection(1, &mut events).is_ok());
    }
}
