use super::*;

use std::time::Instant;

use log::info;

use crate::backward_pass::solve_outcomes;
use crate::distance_pass::solve_distances;

/// The solved game: every reachable state with its outcome
/// and distance to the end, built once and read-only afterwards.
#[derive(Clone, Debug)]
pub struct Solver {
    graph: StateGraph,
    outcomes: Vec<Outcome>,
    distances: Vec<Option<u32>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub win: usize,
    pub loss: usize,
    pub draw: usize,
}

impl Solver {
    pub fn new() -> Solver {
        let now = Instant::now();
        let mut expanded = 0usize;
        let graph = reachable_states(|_| expanded += 1);
        info!(
            "Built state graph: {} states ({expanded} expanded) in {:?}.",
            graph.len(),
            now.elapsed()
        );

        let now = Instant::now();
        let outcomes = solve_outcomes(&graph, |_| {});
        let counts = OutcomeCounts::tally(&outcomes);
        info!(
            "Labelled outcomes: {} wins, {} losses, {} draws in {:?}.",
            counts.win,
            counts.loss,
            counts.draw,
            now.elapsed()
        );

        let now = Instant::now();
        let distances = solve_distances(&graph, &outcomes);
        let longest = distances.iter().flatten().max().copied().unwrap_or(0);
        info!(
            "Solved distances: longest forced ending is {longest} plies, in {:?}.",
            now.elapsed()
        );

        Solver {
            graph,
            outcomes,
            distances,
        }
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn state_count(&self) -> usize {
        self.graph.len()
    }

    pub fn outcome_counts(&self) -> OutcomeCounts {
        OutcomeCounts::tally(&self.outcomes)
    }

    pub fn evaluate(&self, state: State) -> Result<Outcome> {
        Ok(self.outcome_of(self.node_id(state)?))
    }

    /// `None` for draws.
    pub fn distance_to_end(&self, state: State) -> Result<Option<u32>> {
        Ok(self.distance_of(self.node_id(state)?))
    }

    pub fn outcome_of(&self, id: NodeId) -> Outcome {
        self.outcomes[id.index()]
    }

    pub fn distance_of(&self, id: NodeId) -> Option<u32> {
        self.distances[id.index()]
    }

    pub fn node_id(&self, state: State) -> Result<NodeId> {
        self.graph
            .id_of(state)
            .ok_or(Error::InvalidState { key: state.key() })
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeCounts {
    fn tally(outcomes: &[Outcome]) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Win => counts.win += 1,
                Outcome::Loss => counts.loss += 1,
                Outcome::Draw => counts.draw += 1,
            }
        }
        counts
    }
}
