use super::*;

use std::fmt::{self, Debug, Display, Formatter};

#[derive(Clone, Copy)]
pub struct Pretty<T>(pub T);

impl State {
    pub fn pretty(self) -> Pretty<Self> {
        Pretty(self)
    }
}

impl Display for Pretty<State> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.0;

        if state.is_terminal() {
            let loser = state.turn();
            return write!(f, "terminal: {loser} to move, {} has won", !loser);
        }

        let [[r0c0, r0c1, r0c2], [r1c0, r1c1, r1c2], [r2c0, r2c1, r2c2]] = self.into_array();
        let turn = state.turn();
        write!(
            f,
            "|---|\n|{r0c0}{r0c1}{r0c2}|\n|{r1c0}{r1c1}{r1c2}|\n|{r2c0}{r2c1}{r2c2}|\n|---|\nturn: {turn}",
        )
    }
}

impl Debug for Pretty<State> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self, f)
    }
}

impl Pretty<State> {
    fn into_array(self) -> [[char; 3]; 3] {
        let mut array = [['*'; 3]; 3];
        for (row, row_array) in array.iter_mut().enumerate() {
            for (col, square) in row_array.iter_mut().enumerate() {
                *square = self.char_at(Cell((row * 3 + col) as u8));
            }
        }
        array
    }

    /// A full queue's oldest mark is lowercase,
    /// since it vanishes on its owner's next placement.
    fn char_at(self, cell: Cell) -> char {
        let Some(owner) = self.0.occupant(cell) else {
            return '*';
        };

        let queue = self.0.queue(owner);
        let vanishing = queue.len() == MAX_MARKS && queue.oldest() == Some(cell);

        match (owner, vanishing) {
            (Player::O, false) => 'O',
            (Player::O, true) => 'o',
            (Player::X, false) => 'X',
            (Player::X, true) => 'x',
        }
    }
}

impl Display for Pretty<&[State]> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, state) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{}", state.pretty())?;
        }
        Ok(())
    }
}

impl Debug for Pretty<&[State]> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self, f)
    }
}
