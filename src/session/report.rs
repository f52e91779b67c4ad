use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::Difficulty;
use crate::game::{Outcome, Player};

/// Game identifier used in score reports.
pub const GAME_ID: &str = "connect4";

/// How a finished game ended, from the human's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    HumanWin,
    ComputerWin,
    Draw,
}

impl GameResult {
    /// `None` while the game is still in progress.
    pub fn from_outcome(outcome: &Outcome) -> Option<GameResult> {
        match outcome {
            Outcome::InProgress => None,
            Outcome::Draw => Some(GameResult::Draw),
            Outcome::Win {
                winner: Player::Human,
                ..
            } => Some(GameResult::HumanWin),
            Outcome::Win {
                winner: Player::Computer,
                ..
            } => Some(GameResult::ComputerWin),
        }
    }
}

/// Score handed to the scoring collaborator: one finished game, or a whole
/// run of games when the session submits accumulated totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub game: String,
    pub score: u32,
    pub difficulty: Difficulty,
    /// Result of the last finished game covered by the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
    /// Finished games covered by the report.
    pub games: u32,
    pub human_moves: u32,
    pub total_moves: u32,
}

/// Receiver of final scores. Delivery is fire-and-forget: implementations
/// must not fail the game if they cannot deliver.
pub trait ScoreReporter {
    fn report_final_score(&mut self, report: &ScoreReport);
}

impl<T: ScoreReporter + ?Sized> ScoreReporter for &mut T {
    fn report_final_score(&mut self, report: &ScoreReport) {
        (**self).report_final_score(report);
    }
}

/// Collects reports in memory.
impl ScoreReporter for Vec<ScoreReport> {
    fn report_final_score(&mut self, report: &ScoreReport) {
        self.push(report.clone());
    }
}

/// Logs each report at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ScoreReporter for TracingReporter {
    fn report_final_score(&mut self, report: &ScoreReport) {
        info!(
            game = %report.game,
            score = report.score,
            difficulty = %report.difficulty,
            result = ?report.result,
            games = report.games,
            human_moves = report.human_moves,
            "final score"
        );
    }
}

/// Writes each report as one JSON object per line.
pub struct JsonReporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(writer: W) -> Self {
        JsonReporter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, report: &ScoreReport) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

impl<W: Write> ScoreReporter for JsonReporter<W> {
    fn report_final_score(&mut self, report: &ScoreReport) {
        if let Err(e) = self.write_line(report) {
            warn!(error = %e, score = report.score, "failed to write score report");
        }
    }
}
