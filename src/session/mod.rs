//! Game session: alternates turns between the human and the engine, checks
//! the outcome after every move, and hands scores to a [`ScoreReporter`],
//! either once per finished game or once per run of games.

mod report;
mod scoring;

pub use report::{GameResult, JsonReporter, ScoreReport, ScoreReporter, TracingReporter, GAME_ID};
pub use scoring::{PointTable, ScoreFormula, ScoringConfig, ScoringPolicy};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::{Difficulty, Engine};
use crate::error::{AiError, SessionError};
use crate::game::{Board, GameState, Outcome, Player};

/// When finished games reach the [`ScoreReporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSubmission {
    /// Every finished game is reported on its own.
    #[default]
    PerGame,
    /// Scores accumulate across restarts. The total is reported once, when
    /// the Computer wins a game or the session is ended.
    Run,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Who drops the first disc of every game.
    pub first_player: Player,
    pub default_difficulty: Difficulty,
    /// Pause the front end inserts before the Computer replies.
    pub computer_delay_ms: u64,
    /// Whether the difficulty may change while a game is under way.
    pub allow_difficulty_change: bool,
    pub submit: ScoreSubmission,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            first_player: Player::Human,
            default_difficulty: Difficulty::Medium,
            computer_delay_ms: 600,
            allow_difficulty_change: false,
            submit: ScoreSubmission::PerGame,
        }
    }
}

/// Totals over every game finished since the session (re)started.
#[derive(Debug, Clone, Copy, Default)]
struct RunTotals {
    score: u32,
    games: u32,
    human_moves: u32,
    total_moves: u32,
    last_result: Option<GameResult>,
}

/// A run of games against the Computer.
pub struct Session<P = TracingReporter> {
    state: GameState,
    difficulty: Difficulty,
    config: SessionConfig,
    scoring: ScoringConfig,
    reporter: P,
    human_moves: u32,
    final_score: Option<u32>,
    run: RunTotals,
    ended: bool,
}

impl<P: ScoreReporter> Session<P> {
    /// Start a game on an empty board.
    pub fn start(
        difficulty: Difficulty,
        config: SessionConfig,
        scoring: ScoringConfig,
        reporter: P,
    ) -> Self {
        info!(%difficulty, first = config.first_player.name(), "session started");
        Session {
            state: GameState::initial(config.first_player),
            difficulty,
            config,
            scoring,
            reporter,
            human_moves: 0,
            final_score: None,
            run: RunTotals::default(),
            ended: false,
        }
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Whose turn it is. After the game ends this is the player who moved last.
    pub fn turn(&self) -> Player {
        self.state.current_player()
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn human_moves(&self) -> u32 {
        self.human_moves
    }

    /// Score of the finished game, `None` while it is running.
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Sum of the scores of every game finished in this run.
    pub fn total_score(&self) -> u32 {
        self.run.score
    }

    pub fn games_played(&self) -> u32 {
        self.run.games
    }

    /// Whether the run has been submitted and closed.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    pub fn into_reporter(self) -> P {
        self.reporter
    }

    /// Drop a human disc into `column`.
    pub fn play_human_move(&mut self, column: usize) -> Result<Outcome, SessionError> {
        self.ensure_turn(Player::Human)?;
        self.state = self.state.apply_move(column).inspect_err(|e| {
            warn!(column, error = %e, "human move rejected");
        })?;
        self.human_moves += 1;
        Ok(self.after_move())
    }

    /// Let `engine` choose and play the Computer's move.
    pub fn request_computer_move<R: Rng>(
        &mut self,
        engine: &mut Engine<R>,
    ) -> Result<(usize, Outcome), SessionError> {
        self.computer_move_with(|board, difficulty| engine.choose_move(board, difficulty))
    }

    /// Play the Computer's move chosen by `choose`, which receives the board
    /// and the session difficulty.
    pub fn computer_move_with<F>(&mut self, choose: F) -> Result<(usize, Outcome), SessionError>
    where
        F: FnOnce(&Board, Difficulty) -> Result<usize, AiError>,
    {
        self.ensure_turn(Player::Computer)?;
        let column = choose(self.state.board(), self.difficulty)?;
        self.state = self.state.apply_move(column)?;
        Ok((column, self.after_move()))
    }

    /// Change the AI tier. Mid-game changes are refused unless the config
    /// allows them; they then apply from the Computer's next move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), SessionError> {
        let in_progress = self.board().disc_count() > 0 && !self.is_over();
        if in_progress && !self.config.allow_difficulty_change {
            return Err(SessionError::DifficultyLocked);
        }
        if difficulty != self.difficulty {
            info!(from = %self.difficulty, to = %difficulty, in_progress, "difficulty changed");
        }
        self.difficulty = difficulty;
        Ok(())
    }

    /// Throw away the current game and start a new one at the same
    /// difficulty. An unfinished game is not reported. The run total carries
    /// over unless the run has ended, in which case a fresh run begins.
    pub fn restart(&mut self) {
        if !self.is_over() && self.board().disc_count() > 0 {
            info!(human_moves = self.human_moves, "unfinished game abandoned");
        }
        if self.ended {
            self.run = RunTotals::default();
            self.ended = false;
        }
        self.state = GameState::initial(self.config.first_player);
        self.human_moves = 0;
        self.final_score = None;
    }

    /// Close the run and return its total. With [`ScoreSubmission::Run`] the
    /// total is reported now unless a Computer win already did so; per-game
    /// reports were sent as each game finished.
    pub fn end_session(&mut self) -> Result<u32, SessionError> {
        if self.ended {
            return Err(SessionError::SessionEnded);
        }
        match self.config.submit {
            ScoreSubmission::Run => self.submit_run(),
            ScoreSubmission::PerGame => self.ended = true,
        }
        info!(total = self.run.score, games = self.run.games, "session ended");
        Ok(self.run.score)
    }

    fn ensure_turn(&self, player: Player) -> Result<(), SessionError> {
        if self.ended {
            return Err(SessionError::SessionEnded);
        }
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        let expected = self.turn();
        if expected != player {
            return Err(SessionError::NotYourTurn { expected });
        }
        Ok(())
    }

    fn after_move(&mut self) -> Outcome {
        let outcome = self.state.outcome();
        if self.final_score.is_none() {
            if let Some(result) = GameResult::from_outcome(&outcome) {
                self.finish(result);
            }
        }
        outcome
    }

    fn finish(&mut self, result: GameResult) {
        let score = self.scoring.score(result, self.difficulty, self.human_moves);
        let total_moves = self.board().disc_count() as u32;
        self.final_score = Some(score);
        self.run.score = self.run.score.saturating_add(score);
        self.run.games += 1;
        self.run.human_moves += self.human_moves;
        self.run.total_moves += total_moves;
        self.run.last_result = Some(result);
        info!(?result, score, total = self.run.score, "game finished");

        match self.config.submit {
            ScoreSubmission::PerGame => {
                let report = ScoreReport {
                    game: GAME_ID.to_string(),
                    score,
                    difficulty: self.difficulty,
                    result: Some(result),
                    games: 1,
                    human_moves: self.human_moves,
                    total_moves,
                };
                self.reporter.report_final_score(&report);
            }
            ScoreSubmission::Run if result == GameResult::ComputerWin => self.submit_run(),
            ScoreSubmission::Run => {}
        }
    }

    fn submit_run(&mut self) {
        self.ended = true;
        let report = ScoreReport {
            game: GAME_ID.to_string(),
            score: self.run.score,
            difficulty: self.difficulty,
            result: self.run.last_result,
            games: self.run.games,
            human_moves: self.run.human_moves,
            total_moves: self.run.total_moves,
        };
        self.reporter.report_final_score(&report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, MoveError};

    fn session(first: Player) -> Session<Vec<ScoreReport>> {
        let config = SessionConfig {
            first_player: first,
            ..SessionConfig::default()
        };
        Session::start(Difficulty::Medium, config, ScoringConfig::default(), Vec::new())
    }

    fn scripted(column: usize) -> impl FnOnce(&Board, Difficulty) -> Result<usize, AiError> {
        move |_, _| Ok(column)
    }

    #[test]
    fn human_moves_first_by_default() {
        let s = session(Player::Human);
        assert_eq!(s.turn(), Player::Human);
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.final_score(), None);
    }

    #[test]
    fn turns_alternate() {
        let mut s = session(Player::Human);
        s.play_human_move(3).unwrap();
        assert_eq!(s.turn(), Player::Computer);
        assert_eq!(
            s.play_human_move(2),
            Err(SessionError::NotYourTurn {
                expected: Player::Computer
            })
        );
        let (col, outcome) = s.computer_move_with(scripted(4)).unwrap();
        assert_eq!((col, outcome), (4, Outcome::InProgress));
        assert_eq!(s.turn(), Player::Human);
        assert_eq!(s.board().get(5, 4), Cell::Computer);
    }

    #[test]
    fn computer_cannot_move_on_human_turn() {
        let mut s = session(Player::Human);
        let err = s.computer_move_with(scripted(0)).unwrap_err();
        assert_eq!(
            err,
            SessionError::NotYourTurn {
                expected: Player::Human
            }
        );
    }

    #[test]
    fn full_column_is_rejected_without_change() {
        let mut s = session(Player::Human);
        for _ in 0..3 {
            s.play_human_move(0).unwrap();
            s.computer_move_with(scripted(0)).unwrap();
        }
        let before = *s.board();
        assert_eq!(
            s.play_human_move(0),
            Err(SessionError::IllegalMove(MoveError::ColumnFull(0)))
        );
        assert_eq!(*s.board(), before);
        assert_eq!(s.turn(), Player::Human);
        assert_eq!(s.human_moves(), 3);
    }

    #[test]
    fn illegal_engine_choice_is_surfaced() {
        let mut s = session(Player::Computer);
        let err = s.computer_move_with(scripted(9)).unwrap_err();
        assert_eq!(err, SessionError::IllegalMove(MoveError::InvalidColumn(9)));
        assert_eq!(s.turn(), Player::Computer);
    }

    #[test]
    fn human_win_is_scored_and_reported_once() {
        let mut s = session(Player::Human);
        for (human, computer) in [(0, 6), (1, 6), (2, 5)] {
            s.play_human_move(human).unwrap();
            s.computer_move_with(scripted(computer)).unwrap();
        }
        let outcome = s.play_human_move(3).unwrap();
        assert_eq!(outcome.winner(), Some(Player::Human));
        assert!(s.is_over());
        assert_eq!(s.final_score(), Some(250));

        assert_eq!(s.play_human_move(4), Err(SessionError::GameOver));
        assert_eq!(s.computer_move_with(scripted(4)), Err(SessionError::GameOver));

        let reports = s.into_reporter();
        assert_eq!(reports.len(), 1, "score must be reported exactly once");
        assert_eq!(reports[0].result, Some(GameResult::HumanWin));
        assert_eq!(reports[0].score, 250);
        assert_eq!(reports[0].human_moves, 4);
        assert_eq!(reports[0].total_moves, 7);
    }

    #[test]
    fn computer_win_scores_zero_on_table() {
        let mut s = session(Player::Computer);
        for (computer, human) in [(3, 0), (3, 0), (3, 1)] {
            s.computer_move_with(scripted(computer)).unwrap();
            s.play_human_move(human).unwrap();
        }
        let (_, outcome) = s.computer_move_with(scripted(3)).unwrap();
        assert_eq!(outcome.winner(), Some(Player::Computer));
        assert_eq!(s.final_score(), Some(0));
        assert_eq!(s.reporter()[0].result, Some(GameResult::ComputerWin));
    }

    #[test]
    fn difficulty_locked_mid_game() {
        let mut s = session(Player::Human);
        s.set_difficulty(Difficulty::Hard).unwrap();
        assert_eq!(s.difficulty(), Difficulty::Hard);

        s.play_human_move(3).unwrap();
        assert_eq!(
            s.set_difficulty(Difficulty::Easy),
            Err(SessionError::DifficultyLocked)
        );
        assert_eq!(s.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn difficulty_change_applies_to_next_move_when_allowed() {
        let config = SessionConfig {
            allow_difficulty_change: true,
            ..SessionConfig::default()
        };
        let mut s = Session::start(Difficulty::Easy, config, ScoringConfig::default(), Vec::new());
        s.play_human_move(3).unwrap();
        s.set_difficulty(Difficulty::Hard).unwrap();

        let mut seen = None;
        s.computer_move_with(|_, difficulty| {
            seen = Some(difficulty);
            Ok(3)
        })
        .unwrap();
        assert_eq!(seen, Some(Difficulty::Hard));
    }

    #[test]
    fn restart_discards_unfinished_game() {
        let mut s = session(Player::Human);
        s.play_human_move(2).unwrap();
        s.restart();
        assert_eq!(s.board().disc_count(), 0);
        assert_eq!(s.turn(), Player::Human);
        assert_eq!(s.human_moves(), 0);
        assert!(s.reporter().is_empty());
    }

    fn run_session() -> Session<Vec<ScoreReport>> {
        let config = SessionConfig {
            submit: ScoreSubmission::Run,
            ..SessionConfig::default()
        };
        Session::start(Difficulty::Hard, config, ScoringConfig::default(), Vec::new())
    }

    /// Human stacks column 0 while the Computer stacks column 1.
    fn human_wins(s: &mut Session<Vec<ScoreReport>>) {
        for _ in 0..3 {
            s.play_human_move(0).unwrap();
            s.computer_move_with(scripted(1)).unwrap();
        }
        s.play_human_move(0).unwrap();
    }

    #[test]
    fn per_game_totals_accumulate_across_restart() {
        let mut s = session(Player::Human);
        human_wins(&mut s);
        s.restart();
        human_wins(&mut s);
        assert_eq!(s.total_score(), 500);
        assert_eq!(s.games_played(), 2);
        assert_eq!(s.reporter().len(), 2);

        assert_eq!(s.end_session(), Ok(500));
        assert_eq!(s.reporter().len(), 2, "per-game mode reports nothing extra");
        assert_eq!(s.end_session(), Err(SessionError::SessionEnded));
    }

    #[test]
    fn run_total_submitted_once_on_end() {
        let mut s = run_session();
        human_wins(&mut s);
        s.restart();
        human_wins(&mut s);
        s.restart();
        s.play_human_move(3).unwrap();
        assert!(s.reporter().is_empty(), "wins alone do not submit the run");

        assert_eq!(s.end_session(), Ok(1000));
        assert!(s.is_ended());
        assert_eq!(s.play_human_move(4), Err(SessionError::SessionEnded));
        assert_eq!(s.end_session(), Err(SessionError::SessionEnded));

        let reports = s.reporter();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].score, 1000);
        assert_eq!(reports[0].games, 2);
        assert_eq!(reports[0].human_moves, 8);
        assert_eq!(reports[0].total_moves, 14);
        assert_eq!(reports[0].result, Some(GameResult::HumanWin));
    }

    #[test]
    fn computer_win_submits_run() {
        let mut s = run_session();
        human_wins(&mut s);
        s.restart();
        for human in [6, 6, 5] {
            s.play_human_move(human).unwrap();
            s.computer_move_with(scripted(0)).unwrap();
        }
        s.play_human_move(5).unwrap();
        let (_, outcome) = s.computer_move_with(scripted(0)).unwrap();
        assert_eq!(outcome.winner(), Some(Player::Computer));
        assert!(s.is_ended());
        assert_eq!(s.end_session(), Err(SessionError::SessionEnded));

        let reports = s.reporter();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].score, 500);
        assert_eq!(reports[0].games, 2);
        assert_eq!(reports[0].result, Some(GameResult::ComputerWin));
    }

    #[test]
    fn restart_after_end_starts_fresh_run() {
        let mut s = run_session();
        human_wins(&mut s);
        assert_eq!(s.end_session(), Ok(500));
        s.restart();
        assert!(!s.is_ended());
        assert_eq!(s.total_score(), 0);
        assert_eq!(s.games_played(), 0);
        s.play_human_move(2).unwrap();
    }

    #[test]
    fn end_without_games_reports_zero() {
        let mut s = run_session();
        assert_eq!(s.end_session(), Ok(0));
        let reports = s.into_reporter();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].games, 0);
        assert_eq!(reports[0].result, None);
    }

    #[test]
    fn engine_plays_computer_turn() {
        let mut engine = Engine::seeded(crate::ai::AiConfig::default(), 3);
        let mut s = session(Player::Human);
        for col in 0..2 {
            s.play_human_move(col).unwrap();
            s.computer_move_with(scripted(6)).unwrap();
        }
        s.play_human_move(2).unwrap();

        // Medium must block the open end of the bottom row.
        let (col, outcome) = s.request_computer_move(&mut engine).unwrap();
        assert_eq!(col, 3);
        assert_eq!(outcome, Outcome::InProgress);
        assert_eq!(s.turn(), Player::Human);
    }
}
