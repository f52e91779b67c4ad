use crate::error::AiError;
use crate::game::{detect, Board};

/// Universal interface for all move-choosing policies.
///
/// Agents always play the Computer discs of the board they are shown. To let
/// an agent play the other side, hand it [`Board::swapped`].
pub trait Agent {
    /// Select a legal column for the Computer side of `board`.
    ///
    /// Returns [`AiError::TerminalPosition`] if the game on `board` is
    /// already won or drawn.
    fn select_action(&mut self, board: &Board) -> Result<usize, AiError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Reject boards that are already decided.
pub(crate) fn ensure_playable(board: &Board) -> Result<(), AiError> {
    if detect(board).is_terminal() {
        Err(AiError::TerminalPosition)
    } else {
        Ok(())
    }
}
