use super::*;

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Clone, Debug)]
pub struct Node {
    pub state: State,
    pub children: Vec<NodeId>,
    pub parents: Vec<NodeId>,
}

/// Every state reachable from the two openings, with edges in both directions.
///
/// Ids `0` and `1` are the terminal sentinels where O and X (respectively)
/// have lost. Ids `2` and `3` are the O and X openings.
/// Every other state is numbered in discovery order.
#[derive(Clone, Debug)]
pub struct StateGraph {
    nodes: Vec<Node>,
    index: StateMap<NodeId>,
}

/// An upper bound on the number of distinct states:
/// both sentinels, plus every pair of disjoint queues
/// of at most three marks, with either player to move.
pub const STATE_BOUND: usize = {
    let mut queue_pairs = 0;
    let mut o_len = 0;
    while o_len <= MAX_MARKS {
        let mut x_len = 0;
        while x_len <= MAX_MARKS {
            let mut arrangements = 1;
            let mut i = 0;
            while i < o_len + x_len {
                arrangements *= BOARD_CELLS as usize - i;
                i += 1;
            }
            queue_pairs += arrangements;
            x_len += 1;
        }
        o_len += 1;
    }
    2 * queue_pairs + 2
};

impl NodeId {
    pub const TERMINAL_O: NodeId = NodeId(0);
    pub const TERMINAL_X: NodeId = NodeId(1);

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn is_terminal(self) -> bool {
        self.0 <= NodeId::TERMINAL_X.0
    }

    pub const fn terminal(loser: Player) -> NodeId {
        match loser {
            Player::O => NodeId::TERMINAL_O,
            Player::X => NodeId::TERMINAL_X,
        }
    }
}

impl Null for NodeId {
    fn null() -> Self {
        NodeId(u32::MAX)
    }
}

/// Breadth-first enumeration of every state reachable from either opening.
pub fn reachable_states(mut on_state_processed: impl FnMut(State)) -> StateGraph {
    let mut graph = StateGraph {
        nodes: Vec::new(),
        index: StateMap::empty(),
    };

    for loser in Player::BOTH {
        graph.insert(State::terminal(loser));
    }

    let mut queue = VecDeque::new();
    for turn in Player::BOTH {
        let (opening, _) = graph.insert(State::opening(turn));
        queue.push_back(opening);
    }

    while let Some(parent) = queue.pop_front() {
        let state = graph.state(parent);

        let mut children = Vec::with_capacity(BOARD_CELLS as usize);
        state.visit_children(|_, child| {
            let (child_id, existed) = graph.insert(child);
            if !existed.did_addend_already_exist {
                queue.push_back(child_id);
            }
            children.push(child_id);
        });

        // Several moves may end the game, all in the same sentinel.
        children.sort_unstable();
        children.dedup();

        for &child in &children {
            graph.nodes[child.index()].parents.push(parent);
        }
        graph.nodes[parent.index()].children = children;

        on_state_processed(state);
    }

    assert!(
        graph.len() <= STATE_BOUND,
        "Enumerated {} states, but at most {STATE_BOUND} can exist. The transition model is broken.",
        graph.len()
    );

    graph
}

impl StateGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn id_of(&self, state: State) -> Option<NodeId> {
        let id = self.index.get(state);
        (!id.is_null()).then_some(id)
    }

    pub fn state(&self, id: NodeId) -> State {
        self.nodes[id.index()].state
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].parents
    }

    fn insert(&mut self, state: State) -> (NodeId, DidAddendAlreadyExist) {
        if let Some(existing) = self.id_of(state) {
            return (
                existing,
                DidAddendAlreadyExist {
                    did_addend_already_exist: true,
                },
            );
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            state,
            children: Vec::new(),
            parents: Vec::new(),
        });
        self.index.add(state, id);

        (
            id,
            DidAddendAlreadyExist {
                did_addend_already_exist: false,
            },
        )
    }
}
