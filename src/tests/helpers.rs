use super::*;

use std::sync::OnceLock;

use rand::SeedableRng;

pub use rand_xorshift::XorShiftRng;

pub fn deterministic_prng() -> XorShiftRng {
    XorShiftRng::seed_from_u64(0x7A5E_0F1C_2D3B_4E6F)
}

/// Solving takes a moment, so every test shares one solver.
pub fn solver() -> &'static Solver {
    static SOLVER: OnceLock<Solver> = OnceLock::new();
    SOLVER.get_or_init(Solver::new)
}

/// Plays `cells` from the opening where `first` moves first.
/// Panics on an illegal move.
pub fn play(first: Player, cells: &[u8]) -> State {
    cells
        .iter()
        .fold(State::opening(first), |state, &cell| {
            state
                .apply_move(Cell(cell))
                .unwrap_or_else(|err| panic!("{err}\n\nSTATE:\n\n{}", state.pretty()))
        })
}

pub fn cells(raw: &[u8]) -> Vec<Cell> {
    raw.iter().copied().map(Cell).collect()
}

/// The board symmetries, as cell permutations.
pub const SYMMETRIES: [[u8; 9]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8],
    [6, 3, 0, 7, 4, 1, 8, 5, 2],
    [8, 7, 6, 5, 4, 3, 2, 1, 0],
    [2, 5, 8, 1, 4, 7, 0, 3, 6],
    [2, 1, 0, 5, 4, 3, 8, 7, 6],
    [6, 7, 8, 3, 4, 5, 0, 1, 2],
    [0, 3, 6, 1, 4, 7, 2, 5, 8],
    [8, 5, 2, 7, 4, 1, 6, 3, 0],
];

pub fn transform(state: State, symmetry: &[u8; 9]) -> State {
    if state.is_terminal() {
        return state;
    }

    let map = |player: Player| -> Vec<Cell> {
        state
            .queue(player)
            .iter()
            .map(|cell| Cell(symmetry[cell.0 as usize]))
            .collect()
    };

    State::new(&map(Player::O), &map(Player::X), state.turn())
        .unwrap_or_else(|err| panic!("{err}\n\nSTATE:\n\n{}", state.pretty()))
}
