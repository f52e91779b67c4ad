use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::agent::{ensure_playable, Agent};
use super::minimax::{MinimaxAgent, WindowHeuristic, WindowWeights};
use super::random::random_column;
use super::tactical::{MediumPolicy, MediumTier};
use super::Difficulty;
use crate::error::AiError;
use crate::game::Board;

/// AI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Minimax depth for the Hard tier.
    pub hard_depth: u32,
    pub medium_policy: MediumPolicy,
    /// Minimax depth used when the mixed Medium policy searches.
    pub medium_depth: u32,
    /// Chance that the mixed Medium policy searches instead of moving at random.
    pub medium_search_probability: f64,
    /// Static evaluator weights used by every minimax search.
    pub evaluator: WindowWeights,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            hard_depth: 4,
            medium_policy: MediumPolicy::Heuristic,
            medium_depth: 3,
            medium_search_probability: 0.5,
            evaluator: WindowWeights::default(),
        }
    }
}

/// Chooses the Computer's move for any difficulty tier.
///
/// The engine keeps no search state between calls; the only thing it carries
/// is the random source used by the Easy tier and Medium's random branches.
pub struct Engine<R = StdRng> {
    config: AiConfig,
    rng: R,
    hard: MinimaxAgent,
    medium: MediumTier,
}

impl Engine<StdRng> {
    pub fn new(config: AiConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Engine with a reproducible random source.
    pub fn seeded(config: AiConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: AiConfig, rng: R) -> Self {
        let search = |depth| {
            MinimaxAgent::with_heuristic(depth, Box::new(WindowHeuristic::new(config.evaluator)))
        };
        Engine {
            hard: search(config.hard_depth),
            medium: MediumTier::new(
                config.medium_policy,
                search(config.medium_depth),
                config.medium_search_probability,
            ),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Pick a legal column for the Computer on `board`.
    pub fn choose_move(&mut self, board: &Board, difficulty: Difficulty) -> Result<usize, AiError> {
        ensure_playable(board)?;

        let column = match difficulty {
            Difficulty::Easy => {
                random_column(board, &mut self.rng).ok_or(AiError::TerminalPosition)?
            }
            Difficulty::Medium => self.medium.choose(board, &mut self.rng)?,
            Difficulty::Hard => self.hard.best_move(board)?.0,
        };

        debug!(%difficulty, column, "computer move chosen");
        Ok(column)
    }
}

/// An [`Engine`] pinned to one difficulty, usable wherever an [`Agent`] is.
pub struct TierAgent<R = StdRng> {
    engine: Engine<R>,
    difficulty: Difficulty,
    name: String,
}

impl<R: Rng> TierAgent<R> {
    pub fn new(engine: Engine<R>, difficulty: Difficulty) -> Self {
        TierAgent {
            engine,
            difficulty,
            name: difficulty.to_string(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl<R: Rng> Agent for TierAgent<R> {
    fn select_action(&mut self, board: &Board) -> Result<usize, AiError> {
        self.engine.choose_move(board, self.difficulty)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
