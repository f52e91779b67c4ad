//! Core Connect Four rules: board representation, players, win detection,
//! and an immutable game state.

mod board;
pub mod detector;
mod player;
mod state;

pub use board::{Board, Cell, MoveError, ParseBoardError, CENTER_COL, COLS, ROWS};
pub use detector::{detect, Outcome, WinningLine};
pub use player::Player;
pub use state::GameState;
