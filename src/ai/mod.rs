//! Computer opponent: the `Agent` trait, the three difficulty tiers, and the
//! `Engine` that dispatches between them.

mod agent;
mod difficulty;
pub mod engine;
pub mod minimax;
mod random;
pub mod tactical;

pub use agent::Agent;
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use engine::{AiConfig, Engine, TierAgent};
pub use minimax::{Heuristic, MinimaxAgent, WindowHeuristic, WindowWeights, WIN_SCORE};
pub use random::{random_column, RandomAgent};
pub use tactical::{MediumPolicy, MediumTier};
