use super::*;

/// The number of half-moves a mark survives, counted from its own placement.
///
/// Every placement (by either player) first ages all marks by one,
/// so a mark disappears just before its owner's fourth placement after it.
pub const MARK_LIFETIME: u8 = 6;

/// A board that tracks how long each mark has left to live,
/// instead of tracking placement order.
///
/// This is how a front end would display a game.
/// It must agree with [`State`] move for move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifetimeBoard {
    cells: [Option<LiveMark>; BOARD_CELLS as usize],
    turn: Player,
    winner: Option<Player>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LiveMark {
    owner: Player,
    remaining: u8,
}

impl LifetimeBoard {
    pub fn new(first: Player) -> LifetimeBoard {
        LifetimeBoard {
            cells: [None; BOARD_CELLS as usize],
            turn: first,
            winner: None,
        }
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn occupant(&self, cell: Cell) -> Option<Player> {
        self.mark(cell).map(|mark| mark.owner)
    }

    /// Half-moves left for the mark on `cell`, if any.
    pub fn remaining(&self, cell: Cell) -> Option<u8> {
        self.mark(cell).map(|mark| mark.remaining)
    }

    pub fn place(&mut self, cell: Cell) -> Result<()> {
        let reason = if self.winner.is_some() {
            IllegalMoveReason::GameOver
        } else if !cell.is_on_board() {
            IllegalMoveReason::OffBoard
        } else if self.cells[cell.0 as usize].is_some() {
            // Occupancy is checked before aging,
            // so a mark about to vanish still blocks its cell.
            IllegalMoveReason::Occupied
        } else {
            self.place_unchecked(cell);
            return Ok(());
        };

        Err(Error::IllegalMove { cell, reason })
    }

    fn place_unchecked(&mut self, cell: Cell) {
        for slot in &mut self.cells {
            if let Some(mark) = slot {
                mark.remaining -= 1;
                if mark.remaining == 0 {
                    *slot = None;
                }
            }
        }

        let mover = self.turn;
        self.cells[cell.0 as usize] = Some(LiveMark {
            owner: mover,
            remaining: MARK_LIFETIME,
        });

        let owned = self.cell_mask(mover);
        if WIN_LINE_MASKS.iter().any(|&line| owned & line == line) {
            self.winner = Some(mover);
        }

        self.turn = !mover;
    }

    /// Orders each player's marks from the shortest remaining life to the longest,
    /// which is placement order.
    pub fn to_state(&self) -> Result<State> {
        if let Some(winner) = self.winner {
            return Ok(State::terminal(!winner));
        }

        let o = self.cells_by_age(Player::O);
        let x = self.cells_by_age(Player::X);
        State::new(&o, &x, self.turn)
    }

    fn mark(&self, cell: Cell) -> Option<LiveMark> {
        self.cells.get(cell.0 as usize).copied().flatten()
    }

    fn cell_mask(&self, owner: Player) -> u16 {
        Cell::ALL
            .into_iter()
            .filter(|&cell| self.occupant(cell) == Some(owner))
            .fold(0, |mask, cell| mask | cell.bit())
    }

    fn cells_by_age(&self, owner: Player) -> Vec<Cell> {
        let mut marks: Vec<(u8, Cell)> = Cell::ALL
            .into_iter()
            .filter_map(|cell| {
                let mark = self.mark(cell)?;
                (mark.owner == owner).then_some((mark.remaining, cell))
            })
            .collect();

        marks.sort_unstable();
        marks.into_iter().map(|(_, cell)| cell).collect()
    }
}
