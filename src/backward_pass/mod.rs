use super::*;

use std::collections::VecDeque;


/// Labels every node of `graph` as a win, loss, or draw
/// for the player to move.
///
/// Labels spread backward from the two sentinels.
/// A parent of a loss is a win. A parent whose children are all wins is a loss.
/// Whatever is still unlabelled once nothing more spreads is a draw,
/// since its player to move can keep the game going forever.
pub fn solve_outcomes(graph: &StateGraph, mut on_node_processed: impl FnMut(NodeId)) -> Vec<Outcome> {
    let mut labels: Vec<Option<Outcome>> = vec![None; graph.len()];

    // The number of children not yet known to be wins.
    let mut required_child_report_count: Vec<usize> =
        graph.nodes().iter().map(|node| node.children.len()).collect();

    let mut known_queue = VecDeque::with_capacity(graph.len());
    for terminal in [NodeId::TERMINAL_O, NodeId::TERMINAL_X] {
        labels[terminal.index()] = Some(Outcome::Loss);
        known_queue.push_back((terminal, Outcome::Loss));
    }

    while let Some((child, child_outcome)) = known_queue.pop_front() {
        for &parent in graph.parents(child) {
            let parent_label = &mut labels[parent.index()];
            if parent_label.is_some() {
                continue;
            }

            if child_outcome == Outcome::Loss {
                *parent_label = Some(Outcome::Win);
                known_queue.push_back((parent, Outcome::Win));
                continue;
            }

            let remaining = &mut required_child_report_count[parent.index()];
            *remaining -= 1;
            if *remaining == 0 {
                *parent_label = Some(Outcome::Loss);
                known_queue.push_back((parent, Outcome::Loss));
            }
        }

        on_node_processed(child);
    }

    labels
        .into_iter()
        .map(|label| label.unwrap_or(Outcome::Draw))
        .collect()
}
