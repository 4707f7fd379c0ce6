use super::*;

#[test]
fn completing_a_line_ends_in_the_losers_sentinel() {
    let state = play(Player::O, &[0, 4, 1, 5, 2]);

    assert_eq!(state, State::terminal(Player::X));
    assert_eq!(state.winner(), Some(Player::O));
    assert_eq!(solver().evaluate(state).unwrap(), Outcome::Loss);
    assert_eq!(solver().distance_to_end(state).unwrap(), Some(0));
    assert!(state.legal_moves().is_empty());
}

#[test]
fn fourth_placement_evicts_oldest_mark() {
    let before = play(Player::O, &[0, 4, 1, 8, 5, 2]);
    assert_eq!(before.queue(Player::O).to_vec(), cells(&[0, 1, 5]));
    assert_eq!(before.occupant(Cell(0)), Some(Player::O));

    let after = before.apply_move(Cell(3)).unwrap();

    assert!(!after.is_terminal());
    assert_eq!(after.queue(Player::O).to_vec(), cells(&[1, 5, 3]));
    assert_eq!(after.queue(Player::X).to_vec(), cells(&[4, 8, 2]));
    assert_eq!(after.occupant(Cell(0)), None);
    assert_eq!(after.turn(), Player::X);
    assert!(after.legal_moves().contains(&Cell(0)));
}

#[test]
fn third_mark_on_a_line_wins_before_any_eviction() {
    let state = play(Player::O, &[0, 4, 1, 8]);
    assert_eq!(
        state.apply_move(Cell(2)).unwrap(),
        State::terminal(Player::X)
    );
}

#[test]
fn line_completed_after_eviction_wins() {
    let state = State::new(&cells(&[4, 0, 1]), &cells(&[3, 6]), Player::O).unwrap();
    assert_eq!(
        state.apply_move(Cell(2)).unwrap(),
        State::terminal(Player::X)
    );
}

#[test]
fn evicted_mark_does_not_count_toward_a_line() {
    let state = State::new(&cells(&[0, 1, 3]), &cells(&[4, 8]), Player::O).unwrap();
    let child = state.apply_move(Cell(2)).unwrap();

    assert!(!child.is_terminal());
    assert_eq!(child.queue(Player::O).to_vec(), cells(&[1, 3, 2]));
}

#[test]
fn short_queue_never_wins() {
    let queue = MarkQueue::EMPTY.push(Cell(0)).0.push(Cell(4)).0;
    assert_eq!(queue.len(), 2);
    assert!(!queue.has_win());
}

#[test]
fn moves_alternate_turns() {
    let mut state = State::opening(Player::X);
    for (ply, cell) in [4, 0, 8, 2].into_iter().enumerate() {
        let mover = if ply % 2 == 0 { Player::X } else { Player::O };
        assert_eq!(state.turn(), mover);
        state = state.apply_move(Cell(cell)).unwrap();
    }
    assert_eq!(state.turn(), Player::X);
}

#[test]
fn occupied_cell_is_rejected() {
    let state = play(Player::O, &[4, 0]);
    for cell in [Cell(0), Cell(4)] {
        assert!(matches!(
            state.apply_move(cell),
            Err(Error::IllegalMove {
                reason: IllegalMoveReason::Occupied,
                ..
            })
        ));
    }
}

#[test]
fn cell_about_to_vanish_is_still_occupied() {
    let state = play(Player::O, &[0, 4, 1, 8, 5, 2]);
    assert!(matches!(
        state.apply_move(Cell(0)),
        Err(Error::IllegalMove {
            reason: IllegalMoveReason::Occupied,
            ..
        })
    ));
}

#[test]
fn off_board_cell_is_rejected() {
    assert!(matches!(
        State::opening(Player::O).apply_move(Cell(9)),
        Err(Error::IllegalMove {
            reason: IllegalMoveReason::OffBoard,
            ..
        })
    ));
}

#[test]
fn sentinel_rejects_every_move() {
    for loser in Player::BOTH {
        assert!(matches!(
            State::terminal(loser).apply_move(Cell(0)),
            Err(Error::IllegalMove {
                reason: IllegalMoveReason::GameOver,
                ..
            })
        ));
    }
}

#[test]
fn every_reachable_key_round_trips() {
    for node in solver().graph().nodes() {
        let state = node.state;
        assert_eq!(
            State::from_key(state.key()).unwrap(),
            state,
            "{}",
            state.pretty()
        );
        assert_eq!(state.key() >> KEY_BITS, 0);
    }
}

#[test]
fn malformed_keys_are_rejected() {
    let malformed = [
        // Beyond the key width.
        1 << KEY_BITS,
        // Sentinel with marks.
        (1 << 25) | 0x1,
        // Empty slot before a filled one.
        0x10,
        // Cell 9.
        0xA,
        // Same cell twice in one queue.
        0x11,
        // Same cell in both queues.
        0x1 | (0x1 << 12),
    ];

    for key in malformed {
        assert!(
            matches!(State::from_key(key), Err(Error::MalformedKey { .. })),
            "{key:#x}"
        );
    }
}

#[test]
fn malformed_states_are_rejected() {
    let cases: [(&[u8], &[u8]); 4] = [
        (&[0, 1, 2, 3], &[]),
        (&[9], &[]),
        (&[4, 4], &[]),
        (&[4], &[4]),
    ];

    for (o, x) in cases {
        assert!(
            matches!(
                State::new(&cells(o), &cells(x), Player::O),
                Err(Error::MalformedState { .. })
            ),
            "o: {o:?}, x: {x:?}"
        );
    }
}
