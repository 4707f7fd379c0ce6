//! Perfect-play solver for vanishing tic-tac-toe, where each player keeps
//! at most three marks on the board and a fourth placement removes that
//! player's oldest mark.

use std::fmt::{self, Display, Formatter};
use std::ops::Not;

use serde::{Deserialize, Serialize};

pub use best_move::{FirstBest, TieBreak, UniformRandom};
pub use error::{Error, IllegalMoveReason, Result};
pub use forward_pass::{reachable_states, Node, NodeId, StateGraph, STATE_BOUND};
pub use lifetime::{LifetimeBoard, MARK_LIFETIME};
pub use pretty::Pretty;
pub use prune::reachable_under_optimal_play;
pub use solver::{OutcomeCounts, Solver};
pub use state_map::{DidAddendAlreadyExist, Null, StateMap};
pub use state_set::StateSet;
pub use table::{SolutionTable, TableEntry};

mod backward_pass;
mod best_move;
mod distance_pass;
mod error;
mod forward_pass;
mod lifetime;
mod pretty;
mod prune;
mod solver;
mod state_map;
mod state_set;
mod table;

#[cfg(test)]
mod tests;

pub const BOARD_CELLS: u8 = 9;

/// The number of marks a player may keep on the board.
pub const MAX_MARKS: usize = 3;

pub const WIN_LINES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const WIN_LINE_MASKS: [u16; 8] = {
    let mut masks = [0; 8];
    let mut i = 0;
    while i < WIN_LINES.len() {
        let [a, b, c] = WIN_LINES[i];
        masks[i] = (1u16 << a) | (1u16 << b) | (1u16 << c);
        i += 1;
    }
    masks
};

mod offsets {
    pub const O_QUEUE: u32 = 0;
    pub const X_QUEUE: u32 = 12;
    pub const TURN: u32 = 24;
    pub const TERMINAL: u32 = 25;
}

/// Every valid key fits in this many bits.
pub const KEY_BITS: u32 = 26;

const QUEUE_MASK: u32 = 0xFFF;
const SLOT_BITS: u32 = 4;
const SLOT_MASK: u16 = 0b1111;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    O,
    X,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// A position, packed into its canonical key.
///
/// Layout, from the least significant bit:
/// - 12 bits: O's marks, three 4-bit slots holding `cell + 1`, oldest first,
///   `0` for an empty slot
/// - 12 bits: X's marks, same layout
/// - 1 bit: the player to move (`0` for O)
/// - 1 bit: set for the two terminal sentinels, whose mark bits are all zero
///
/// A terminal sentinel means that the player to move has already lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State(u32);

/// One player's live marks in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct MarkQueue(u16);

impl Player {
    pub const BOTH: [Player; 2] = [Player::O, Player::X];

    #[inline(always)]
    const fn bit(self) -> u32 {
        match self {
            Player::O => 0,
            Player::X => 1,
        }
    }

    #[inline(always)]
    const fn queue_offset(self) -> u32 {
        match self {
            Player::O => offsets::O_QUEUE,
            Player::X => offsets::X_QUEUE,
        }
    }
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Player {
        match self {
            Player::O => Player::X,
            Player::X => Player::O,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Player::O => write!(f, "O"),
            Player::X => write!(f, "X"),
        }
    }
}

impl Cell {
    pub const ALL: [Cell; BOARD_CELLS as usize] = {
        let mut cells = [Cell(0); BOARD_CELLS as usize];
        let mut i = 0;
        while i < cells.len() {
            cells[i] = Cell(i as u8);
            i += 1;
        }
        cells
    };

    #[inline(always)]
    pub const fn is_on_board(self) -> bool {
        self.0 < BOARD_CELLS
    }

    #[inline(always)]
    const fn bit(self) -> u16 {
        1 << self.0
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl MarkQueue {
    pub const EMPTY: MarkQueue = MarkQueue(0);

    /// Slots are filled contiguously from the oldest one,
    /// so the first empty slot ends the queue.
    pub const fn len(self) -> usize {
        if self.0 == 0 {
            0
        } else if self.0 >> SLOT_BITS == 0 {
            1
        } else if self.0 >> (2 * SLOT_BITS) == 0 {
            2
        } else {
            3
        }
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn get(self, index: usize) -> Option<Cell> {
        if index >= MAX_MARKS {
            return None;
        }

        let slot = (self.0 >> (SLOT_BITS * index as u32)) & SLOT_MASK;
        if slot == 0 {
            None
        } else {
            Some(Cell(slot as u8 - 1))
        }
    }

    pub const fn oldest(self) -> Option<Cell> {
        self.get(0)
    }

    pub fn iter(self) -> impl Iterator<Item = Cell> {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn to_vec(self) -> Vec<Cell> {
        self.iter().collect()
    }

    pub const fn cell_mask(self) -> u16 {
        let mut mask = 0;
        let mut i = 0;
        while i < MAX_MARKS {
            if let Some(cell) = self.get(i) {
                mask |= cell.bit();
            }
            i += 1;
        }
        mask
    }

    pub const fn contains(self, cell: Cell) -> bool {
        self.cell_mask() & cell.bit() != 0
    }

    /// Appends `cell` as the newest mark.
    /// If the queue was already full, the oldest mark is evicted and returned.
    #[must_use]
    pub const fn push(self, cell: Cell) -> (MarkQueue, Option<Cell>) {
        let slot = cell.0 as u16 + 1;
        let len = self.len();

        if len < MAX_MARKS {
            return (MarkQueue(self.0 | (slot << (SLOT_BITS * len as u32))), None);
        }

        let evicted = self.oldest();
        let shifted = self.0 >> SLOT_BITS;
        (
            MarkQueue(shifted | (slot << (SLOT_BITS * (MAX_MARKS as u32 - 1)))),
            evicted,
        )
    }

    /// A queue of fewer than three marks never wins.
    pub fn has_win(self) -> bool {
        if self.len() < MAX_MARKS {
            return false;
        }

        let mask = self.cell_mask();
        WIN_LINE_MASKS.iter().any(|&line| mask & line == line)
    }

    fn from_cells(cells: &[Cell]) -> Result<MarkQueue> {
        if cells.len() > MAX_MARKS {
            return Err(Error::MalformedState {
                reason: "a player holds more than three marks",
            });
        }

        let mut queue = MarkQueue::EMPTY;
        for &cell in cells {
            if !cell.is_on_board() {
                return Err(Error::MalformedState {
                    reason: "a mark is off the board",
                });
            }

            if queue.contains(cell) {
                return Err(Error::MalformedState {
                    reason: "a player holds two marks on one cell",
                });
            }

            queue = queue.push(cell).0;
        }

        Ok(queue)
    }

    fn from_raw(raw: u16) -> Option<MarkQueue> {
        let mut mask = 0u16;
        let mut ended = false;

        for index in 0..MAX_MARKS {
            let slot = (raw >> (SLOT_BITS * index as u32)) & SLOT_MASK;

            if slot == 0 {
                ended = true;
                continue;
            }

            if ended || slot > BOARD_CELLS as u16 {
                return None;
            }

            let bit = Cell(slot as u8 - 1).bit();
            if mask & bit != 0 {
                return None;
            }
            mask |= bit;
        }

        Some(MarkQueue(raw))
    }
}

impl State {
    /// The empty board with `turn` to move.
    pub const fn opening(turn: Player) -> State {
        State(turn.bit() << offsets::TURN)
    }

    /// The sentinel that every position won by `!loser` collapses into.
    pub const fn terminal(loser: Player) -> State {
        State((1 << offsets::TERMINAL) | (loser.bit() << offsets::TURN))
    }

    pub fn new(o: &[Cell], x: &[Cell], turn: Player) -> Result<State> {
        let o = MarkQueue::from_cells(o)?;
        let x = MarkQueue::from_cells(x)?;

        if o.cell_mask() & x.cell_mask() != 0 {
            return Err(Error::MalformedState {
                reason: "a cell holds both an O and an X mark",
            });
        }

        Ok(State::from_parts(o, x, turn))
    }

    /// Decodes a canonical key, rejecting anything `State::key` cannot produce.
    pub fn from_key(key: u32) -> Result<State> {
        let malformed = Error::MalformedKey { key };

        if key >> KEY_BITS != 0 {
            return Err(malformed);
        }

        const QUEUES: u32 = (QUEUE_MASK << offsets::O_QUEUE) | (QUEUE_MASK << offsets::X_QUEUE);

        if key & (1 << offsets::TERMINAL) != 0 {
            return if key & QUEUES == 0 {
                Ok(State(key))
            } else {
                Err(malformed)
            };
        }

        let Some(o) = MarkQueue::from_raw(((key >> offsets::O_QUEUE) & QUEUE_MASK) as u16) else {
            return Err(malformed);
        };
        let Some(x) = MarkQueue::from_raw(((key >> offsets::X_QUEUE) & QUEUE_MASK) as u16) else {
            return Err(malformed);
        };

        if o.cell_mask() & x.cell_mask() != 0 {
            return Err(malformed);
        }

        Ok(State(key))
    }

    #[inline(always)]
    pub const fn key(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn is_terminal(self) -> bool {
        (self.0 >> offsets::TERMINAL) & 1 != 0
    }

    #[inline(always)]
    pub const fn turn(self) -> Player {
        if (self.0 >> offsets::TURN) & 1 == 0 {
            Player::O
        } else {
            Player::X
        }
    }

    #[inline(always)]
    pub const fn queue(self, player: Player) -> MarkQueue {
        MarkQueue(((self.0 >> player.queue_offset()) & QUEUE_MASK) as u16)
    }

    /// For a terminal sentinel, the player who completed a line.
    pub fn winner(self) -> Option<Player> {
        self.is_terminal().then(|| !self.turn())
    }

    pub const fn occupied_mask(self) -> u16 {
        self.queue(Player::O).cell_mask() | self.queue(Player::X).cell_mask()
    }

    pub const fn occupant(self, cell: Cell) -> Option<Player> {
        if self.queue(Player::O).contains(cell) {
            Some(Player::O)
        } else if self.queue(Player::X).contains(cell) {
            Some(Player::X)
        } else {
            None
        }
    }

    /// Free cells in ascending order. Terminal sentinels have none.
    pub fn legal_moves(self) -> Vec<Cell> {
        let mut moves = Vec::with_capacity(BOARD_CELLS as usize);
        self.visit_children(|cell, _| moves.push(cell));
        moves
    }

    /// Visits every legal move and its resulting state, in ascending cell order.
    pub fn visit_children(self, mut visitor: impl FnMut(Cell, State)) {
        if self.is_terminal() {
            return;
        }

        let occupied = self.occupied_mask();
        for cell in Cell::ALL {
            if occupied & cell.bit() == 0 {
                visitor(cell, self.apply_move_unchecked(cell));
            }
        }
    }

    pub fn apply_move(self, cell: Cell) -> Result<State> {
        let reason = if self.is_terminal() {
            IllegalMoveReason::GameOver
        } else if !cell.is_on_board() {
            IllegalMoveReason::OffBoard
        } else if self.occupied_mask() & cell.bit() != 0 {
            IllegalMoveReason::Occupied
        } else {
            return Ok(self.apply_move_unchecked(cell));
        };

        Err(Error::IllegalMove { cell, reason })
    }

    /// Precondition: `self` is not terminal and `cell` is free.
    fn apply_move_unchecked(self, cell: Cell) -> State {
        let mover = self.turn();
        let (queue, _evicted) = self.queue(mover).push(cell);

        if queue.has_win() {
            return State::terminal(!mover);
        }

        self.with_queue(mover, queue).with_turn(!mover)
    }

    const fn from_parts(o: MarkQueue, x: MarkQueue, turn: Player) -> State {
        State(
            ((o.0 as u32) << offsets::O_QUEUE)
                | ((x.0 as u32) << offsets::X_QUEUE)
                | (turn.bit() << offsets::TURN),
        )
    }

    #[must_use]
    const fn with_queue(self, player: Player, queue: MarkQueue) -> State {
        let offset = player.queue_offset();
        State((self.0 & !(QUEUE_MASK << offset)) | ((queue.0 as u32) << offset))
    }

    #[must_use]
    const fn with_turn(self, turn: Player) -> State {
        State((self.0 & !(1 << offsets::TURN)) | (turn.bit() << offsets::TURN))
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Loss => write!(f, "LOSS"),
            Outcome::Draw => write!(f, "DRAW"),
        }
    }
}
