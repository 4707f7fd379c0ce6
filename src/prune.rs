use std::collections::VecDeque;

use super::*;

/// Returns the set of states that are reachable by assuming that `engine` plays optimally
/// (any of its tied best moves) and the other player plays unpredictably.
///
/// Terminal sentinels are left out, since nobody moves from them.
pub fn reachable_under_optimal_play(
    solver: &Solver,
    engine: Player,
    mut on_state_processed: impl FnMut(State),
) -> Result<StateSet> {
    let mut once_enqueued = StateSet::empty();
    let mut queue = VecDeque::new();

    for turn in Player::BOTH {
        let opening = State::opening(turn);
        once_enqueued.add(opening);
        queue.push_back(opening);
    }

    while let Some(state) = queue.pop_front() {
        // If the active player is the engine,
        // we only need to explore its best moves.
        // Otherwise, we need to explore every move.
        let moves = if state.turn() == engine {
            solver.best_moves(state)?
        } else {
            state.legal_moves()
        };

        for cell in moves {
            let child = state.apply_move(cell)?;

            if child.is_terminal() || once_enqueued.add(child).did_addend_already_exist {
                continue;
            }

            queue.push_back(child);
        }

        on_state_processed(state);
    }

    Ok(once_enqueued)
}
