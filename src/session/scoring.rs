use serde::{Deserialize, Serialize};

use super::report::GameResult;
use crate::ai::Difficulty;

/// Which scoring rule a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    /// Fixed points per difficulty, awarded only when the human wins.
    #[default]
    Table,
    /// Base plus bonuses, minus a penalty per human move.
    Formula,
}

/// Points for a human win at each difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointTable {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl Default for PointTable {
    fn default() -> Self {
        PointTable {
            easy: 100,
            medium: 250,
            hard: 500,
        }
    }
}

impl PointTable {
    pub fn points(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreFormula {
    pub base: u32,
    pub easy_bonus: u32,
    pub medium_bonus: u32,
    pub hard_bonus: u32,
    pub win_bonus: u32,
    pub draw_bonus: u32,
    pub move_penalty: u32,
}

impl Default for ScoreFormula {
    fn default() -> Self {
        ScoreFormula {
            base: 100,
            easy_bonus: 0,
            medium_bonus: 100,
            hard_bonus: 250,
            win_bonus: 300,
            draw_bonus: 100,
            move_penalty: 5,
        }
    }
}

impl ScoreFormula {
    fn difficulty_bonus(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_bonus,
            Difficulty::Medium => self.medium_bonus,
            Difficulty::Hard => self.hard_bonus,
        }
    }

    fn outcome_bonus(&self, result: GameResult) -> u32 {
        match result {
            GameResult::HumanWin => self.win_bonus,
            GameResult::Draw => self.draw_bonus,
            GameResult::ComputerWin => 0,
        }
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub policy: ScoringPolicy,
    pub table: PointTable,
    pub formula: ScoreFormula,
}

impl ScoringConfig {
    /// Final score for a finished game. Never negative.
    pub fn score(&self, result: GameResult, difficulty: Difficulty, human_moves: u32) -> u32 {
        match self.policy {
            ScoringPolicy::Table => match result {
                GameResult::HumanWin => self.table.points(difficulty),
                GameResult::ComputerWin | GameResult::Draw => 0,
            },
            ScoringPolicy::Formula => {
                let f = &self.formula;
                let gross = f
                    .base
                    .saturating_add(f.difficulty_bonus(difficulty))
                    .saturating_add(f.outcome_bonus(result));
                gross.saturating_sub(f.move_penalty.saturating_mul(human_moves))
            }
        }
    }
}
