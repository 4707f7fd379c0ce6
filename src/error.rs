use super::*;

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move at cell {cell}: {reason}")]
    IllegalMove {
        cell: Cell,
        reason: IllegalMoveReason,
    },

    #[error("state {key:#09x} is not reachable from either opening")]
    InvalidState { key: u32 },

    #[error("state {key:#09x} has no legal moves")]
    StateExhausted { key: u32 },

    #[error("malformed state: {reason}")]
    MalformedState { reason: &'static str },

    #[error("{key:#010x} is not a valid state key")]
    MalformedKey { key: u32 },

    #[error("malformed solution table: {reason}")]
    MalformedTable { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMoveReason {
    Occupied,
    OffBoard,
    GameOver,
}

impl Display for IllegalMoveReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveReason::Occupied => write!(f, "the cell is occupied"),
            IllegalMoveReason::OffBoard => write!(f, "the cell is off the board"),
            IllegalMoveReason::GameOver => write!(f, "the game is already over"),
        }
    }
}
