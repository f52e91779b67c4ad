//! Medium-tier play: take a win, stop a loss, otherwise move at random.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::agent::ensure_playable;
use super::minimax::MinimaxAgent;
use super::random::random_column;
use crate::error::AiError;
use crate::game::{detector, Board, Player};

/// How the Medium tier picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediumPolicy {
    /// Immediate win, then immediate block, then a random legal column.
    #[default]
    Heuristic,
    /// Coin flip between a shallow minimax search and a random legal column.
    Mixed,
}

/// First column (ascending) where `player` completes four in a row at once.
pub fn immediate_win(board: &Board, player: Player) -> Option<usize> {
    board.legal_columns().into_iter().find(|&col| {
        board
            .apply_move(col, player)
            .map(|next| detector::has_won(&next, player))
            .unwrap_or(false)
    })
}

/// Win, block, or random for the Computer side of `board`.
pub fn win_block_or_random<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    if let Some(col) = immediate_win(board, Player::Computer) {
        debug!(col, "taking immediate win");
        return Some(col);
    }
    if let Some(col) = immediate_win(board, Player::Human) {
        debug!(col, "blocking immediate loss");
        return Some(col);
    }
    random_column(board, rng)
}

/// Clamp a configured search probability to [0, 1]; NaN means never search.
fn search_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// The Medium tier. [`Engine`](super::Engine) owns one and hands it the
/// random source on every call.
pub struct MediumTier {
    policy: MediumPolicy,
    search: MinimaxAgent,
    search_probability: f64,
}

impl MediumTier {
    /// `search` and `probability` only matter for [`MediumPolicy::Mixed`].
    pub fn new(policy: MediumPolicy, search: MinimaxAgent, probability: f64) -> Self {
        MediumTier {
            policy,
            search,
            search_probability: search_probability(probability),
        }
    }

    pub fn policy(&self) -> MediumPolicy {
        self.policy
    }

    /// Pick a column for the Computer on `board`.
    pub fn choose<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Result<usize, AiError> {
        ensure_playable(board)?;
        let column = match self.policy {
            MediumPolicy::Heuristic => win_block_or_random(board, rng),
            MediumPolicy::Mixed => {
                if rng.random_bool(self.search_probability) {
                    Some(self.search.best_move(board)?.0)
                } else {
                    random_column(board, rng)
                }
            }
        };
        column.ok_or(AiError::TerminalPosition)
    }
}
