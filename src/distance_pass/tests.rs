use super::*;

use crate::backward_pass::solve_outcomes;

struct Solved {
    graph: StateGraph,
    outcomes: Vec<Outcome>,
    distances: Vec<Option<u32>>,
}

fn solved() -> Solved {
    let graph = reachable_states(|_| {});
    let outcomes = solve_outcomes(&graph, |_| {});
    let distances = solve_distances(&graph, &outcomes);
    Solved {
        graph,
        outcomes,
        distances,
    }
}

#[test]
fn distances_satisfy_the_min_max_equations() {
    let Solved {
        graph,
        outcomes,
        distances,
    } = solved();

    for id in graph.ids() {
        let state = graph.state(id).pretty();
        let children = graph.children(id);

        let child_distances = |wanted: Outcome| -> Vec<u32> {
            children
                .iter()
                .filter(|child| outcomes[child.index()] == wanted)
                .map(|child| distances[child.index()].unwrap())
                .collect()
        };

        let expected = match outcomes[id.index()] {
            _ if id.is_terminal() => Some(0),
            Outcome::Win => child_distances(Outcome::Loss).into_iter().min().map(|d| d + 1),
            Outcome::Loss => child_distances(Outcome::Win).into_iter().max().map(|d| d + 1),
            Outcome::Draw => None,
        };

        assert_eq!(distances[id.index()], expected, "{state}");
    }
}

#[test]
fn draws_have_no_distance() {
    let Solved {
        graph,
        outcomes,
        distances,
    } = solved();

    for id in graph.ids() {
        assert_eq!(
            distances[id.index()].is_none(),
            outcomes[id.index()] == Outcome::Draw
        );
    }
}

#[test]
fn distance_parity_follows_outcome() {
    let Solved {
        graph,
        outcomes,
        distances,
    } = solved();

    for id in graph.ids() {
        let Some(distance) = distances[id.index()] else {
            continue;
        };

        match outcomes[id.index()] {
            Outcome::Win => assert_eq!(distance % 2, 1),
            Outcome::Loss => assert_eq!(distance % 2, 0),
            Outcome::Draw => unreachable!(),
        }
    }
}

#[test]
fn immediate_win_is_one_ply_away() {
    let Solved {
        graph, distances, ..
    } = solved();

    let state = State::new(&[Cell(0), Cell(1)], &[Cell(4), Cell(5)], Player::O).unwrap();
    let id = graph.id_of(state).unwrap();

    assert_eq!(distances[id.index()], Some(1));
    assert_eq!(distances[NodeId::TERMINAL_O.index()], Some(0));
    assert_eq!(distances[NodeId::TERMINAL_X.index()], Some(0));
}
