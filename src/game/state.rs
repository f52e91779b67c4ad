use super::detector::{self, Outcome};
use super::{Board, Player};
use crate::error::SessionError;

/// A board together with the side to move. Transitions return a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
}

impl GameState {
    /// Create initial game state with `first` to move
    pub fn initial(first: Player) -> Self {
        GameState {
            board: Board::new(),
            current_player: first,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Outcome of the position, recomputed from the board on every call.
    pub fn outcome(&self) -> Outcome {
        detector::detect(&self.board)
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Apply a move for the side to move and return the new state. The turn
    /// passes only when the move does not end the game.
    pub fn apply_move(&self, column: usize) -> Result<GameState, SessionError> {
        if self.is_terminal() {
            return Err(SessionError::GameOver);
        }

        let board = self.board.apply_move(column, self.current_player)?;
        let current_player = if detector::detect(&board).is_terminal() {
            self.current_player
        } else {
            self.current_player.other()
        };

        Ok(GameState {
            board,
            current_player,
        })
    }
}
