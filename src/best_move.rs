use super::*;

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

/// Picks one move out of several equally good ones.
pub trait TieBreak {
    /// `best_moves` is in ascending cell order.
    /// Returns `None` only if `best_moves` is empty.
    fn choose(&mut self, best_moves: &[Cell]) -> Option<Cell>;
}

/// Always the lowest cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstBest;

#[derive(Clone, Debug)]
pub struct UniformRandom<R>(pub R);

impl TieBreak for FirstBest {
    fn choose(&mut self, best_moves: &[Cell]) -> Option<Cell> {
        best_moves.first().copied()
    }
}

impl<R: Rng> TieBreak for UniformRandom<R> {
    fn choose(&mut self, best_moves: &[Cell]) -> Option<Cell> {
        best_moves.choose(&mut self.0).copied()
    }
}

/// Lower is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum MoveRank {
    Preferred(i64),
    Fallback,
}

impl Solver {
    /// Every move tied for best, in ascending cell order.
    ///
    /// - From a win, moves that leave the opponent lost, fastest first.
    /// - From a loss, moves that leave the opponent won, slowest first.
    /// - From a draw, moves that keep the draw.
    ///
    /// When no move meets the preference, every legal move ties.
    /// Terminal sentinels have no moves.
    pub fn best_moves(&self, state: State) -> Result<Vec<Cell>> {
        let outcome = self.outcome_of(self.node_id(state)?);

        let mut best_moves = Vec::new();
        let mut best_rank = None;

        state.visit_children(|cell, child| {
            let rank = self.rank_move(outcome, child);

            match best_rank.map(|best: MoveRank| rank.cmp(&best)) {
                None | Some(Ordering::Less) => {
                    best_rank = Some(rank);
                    best_moves.clear();
                    best_moves.push(cell);
                }
                Some(Ordering::Equal) => best_moves.push(cell),
                Some(Ordering::Greater) => {}
            }
        });

        Ok(best_moves)
    }

    pub fn best_move(&self, state: State) -> Result<Cell> {
        self.best_move_with(state, &mut FirstBest)
    }

    pub fn best_move_with(&self, state: State, tie_break: &mut impl TieBreak) -> Result<Cell> {
        let best_moves = self.best_moves(state)?;
        tie_break
            .choose(&best_moves)
            .ok_or(Error::StateExhausted { key: state.key() })
    }

    fn rank_move(&self, outcome: Outcome, child: State) -> MoveRank {
        let Some(child_id) = self.graph().id_of(child) else {
            panic!(
                "Child of a reachable state is missing from the graph.\n\nCHILD:\n\n{}",
                child.pretty()
            );
        };

        // A move into a sentinel is a loss at distance 0, so it ranks as a 1-ply win.
        let child_outcome = self.outcome_of(child_id);
        let child_distance = self.distance_of(child_id).map(i64::from);

        match (outcome, child_outcome, child_distance) {
            (Outcome::Win, Outcome::Loss, Some(distance)) => MoveRank::Preferred(1 + distance),
            (Outcome::Loss, Outcome::Win, Some(distance)) => MoveRank::Preferred(-(1 + distance)),
            (Outcome::Draw, Outcome::Draw, _) => MoveRank::Preferred(0),
            _ => MoveRank::Fallback,
        }
    }
}
