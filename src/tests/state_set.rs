use super::*;

use std::collections::HashSet;

use rand::Rng;

use super::state_map::random_state;

#[test]
fn state_set_is_consistent_with_hash_set() {
    const FUZZ_TIMES: usize = 200;

    let mut prng = deterministic_prng();

    for _ in 0..FUZZ_TIMES {
        let (mut state_set, reference) = random_state_set_pair(&mut prng);

        for state in reference.iter().copied() {
            assert!(state_set.contains(state));
            assert!(state_set.add(state).did_addend_already_exist);
        }

        assert_eq!(state_set.len(), reference.len());

        let mut visited = 0;
        state_set.visit_in_key_order(|state| {
            assert!(reference.contains(&state));
            visited += 1;
        });

        assert_eq!(visited, reference.len());
    }
}

#[test]
fn state_set_is_visited_in_key_order() {
    const FUZZ_TIMES: usize = 200;

    let mut prng = deterministic_prng();

    for _ in 0..FUZZ_TIMES {
        let (state_set, _) = random_state_set_pair(&mut prng);
        let mut visited = vec![];
        state_set.visit_in_key_order(|state| visited.push(state));

        for i in 1..visited.len() {
            assert!(visited[i - 1] < visited[i]);
        }
    }
}

#[test]
fn union_is_consistent_with_hash_set() {
    const FUZZ_TIMES: usize = 50;

    let mut prng = deterministic_prng();

    for _ in 0..FUZZ_TIMES {
        let (left, left_reference) = random_state_set_pair(&mut prng);
        let (right, right_reference) = random_state_set_pair(&mut prng);

        let union = left.union(&right);
        let reference: HashSet<State> = left_reference.union(&right_reference).copied().collect();

        assert_eq!(union.len(), reference.len());
        for state in reference {
            assert!(union.contains(state));
        }
    }
}

#[test]
fn absent_state_is_not_contained() {
    let mut state_set = StateSet::empty();
    state_set.add(State::opening(Player::O));

    assert!(state_set.contains(State::opening(Player::O)));
    assert!(!state_set.contains(State::opening(Player::X)));
    assert!(!StateSet::empty().contains(State::opening(Player::O)));
}

fn random_state_set_pair(prng: &mut XorShiftRng) -> (StateSet, HashSet<State>) {
    let mut state_set = StateSet::empty();
    let mut reference = HashSet::new();

    let count = prng.gen_range(0..500);
    for _ in 0..count {
        let state = random_state(prng);
        state_set.add(state);
        reference.insert(state);
    }

    (state_set, reference)
}
