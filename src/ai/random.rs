use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::{ensure_playable, Agent};
use crate::error::AiError;
use crate::game::Board;

/// Uniformly random legal column, or `None` on a full board.
pub fn random_column<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let legal = board.legal_columns();
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.random_range(0..legal.len())])
}

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent<R = StdRng> {
    rng: R,
}

impl RandomAgent<StdRng> {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomAgent<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomAgent<R> {
    /// Use a caller-supplied random source, e.g. a seeded one in tests.
    pub fn with_rng(rng: R) -> Self {
        RandomAgent { rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn select_action(&mut self, board: &Board) -> Result<usize, AiError> {
        ensure_playable(board)?;
        random_column(board, &mut self.rng).ok_or(AiError::TerminalPosition)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
