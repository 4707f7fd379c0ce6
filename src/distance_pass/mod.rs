use super::*;

use std::collections::VecDeque;

#[cfg(test)]
mod tests;

/// Computes, for every decided node, how many plies remain
/// until the game ends when the winner hurries and the loser stalls.
/// Draws have no distance.
///
/// The graph has cycles, so distances are raised from a lower bound of `0`
/// until nothing changes. A win takes `1 + min` over its losing children,
/// and a loss takes `1 + max` over its (all winning) children.
pub fn solve_distances(graph: &StateGraph, outcomes: &[Outcome]) -> Vec<Option<u32>> {
    assert_eq!(outcomes.len(), graph.len());

    let mut distances: Vec<Option<u32>> = outcomes
        .iter()
        .map(|&outcome| (outcome != Outcome::Draw).then_some(0))
        .collect();

    let mut queue = VecDeque::with_capacity(graph.len());
    let mut in_queue = vec![false; graph.len()];
    for id in graph.ids() {
        if !id.is_terminal() && outcomes[id.index()] != Outcome::Draw {
            queue.push_back(id);
            in_queue[id.index()] = true;
        }
    }

    let mut raise_count: u64 = 0;

    while let Some(id) = queue.pop_front() {
        in_queue[id.index()] = false;

        let Some(candidate) = candidate_distance(graph, outcomes, &distances, id) else {
            continue;
        };

        if candidate <= distances[id.index()].unwrap_or(0) {
            continue;
        }

        debug_assert!(
            candidate as usize <= graph.len(),
            "Distance of {} exceeded the node count.\n\nSTATE:\n\n{}",
            candidate,
            graph.state(id).pretty()
        );

        distances[id.index()] = Some(candidate);
        raise_count += 1;

        for &parent in graph.parents(id) {
            if parent.is_terminal()
                || outcomes[parent.index()] == Outcome::Draw
                || in_queue[parent.index()]
            {
                continue;
            }

            in_queue[parent.index()] = true;
            queue.push_back(parent);
        }
    }

    log::debug!("Distance relaxation converged after {raise_count} raises.");

    distances
}

fn candidate_distance(
    graph: &StateGraph,
    outcomes: &[Outcome],
    distances: &[Option<u32>],
    id: NodeId,
) -> Option<u32> {
    let outcome = outcomes[id.index()];
    let wanted = match outcome {
        Outcome::Win => Outcome::Loss,
        Outcome::Loss => Outcome::Win,
        Outcome::Draw => return None,
    };

    let child_distances = graph
        .children(id)
        .iter()
        .filter(|child| outcomes[child.index()] == wanted)
        .filter_map(|child| distances[child.index()]);

    let best = if outcome == Outcome::Win {
        child_distances.min()
    } else {
        child_distances.max()
    };

    best.map(|distance| distance + 1)
}
