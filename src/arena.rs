//! Pit two agents against each other and keep score.
//!
//! Both agents think they play the Computer discs; the one seated as Human is
//! shown the board with sides swapped.

use std::collections::VecDeque;

use crate::ai::Agent;
use crate::error::SessionError;
use crate::game::{GameState, Player};

/// Result of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub winner: Option<Player>,
    pub game_length: usize,
}

/// Play one game to the end. `computer` plays the Computer discs, `human` the
/// Human discs, and `first` moves first.
pub fn play_match(
    computer: &mut dyn Agent,
    human: &mut dyn Agent,
    first: Player,
) -> Result<MatchResult, SessionError> {
    let mut state = GameState::initial(first);
    let mut game_length = 0;

    while !state.is_terminal() {
        let action = match state.current_player() {
            Player::Computer => computer.select_action(state.board())?,
            Player::Human => human.select_action(&state.board().swapped())?,
        };
        state = state.apply_move(action)?;
        game_length += 1;
    }

    Ok(MatchResult {
        winner: state.outcome().winner(),
        game_length,
    })
}

/// Match statistics with rolling window computations.
pub struct MatchStats {
    results: VecDeque<MatchResult>,
    capacity: usize,
    total_games: usize, // lifetime count, never capped
}

impl MatchStats {
    pub fn with_capacity(capacity: usize) -> Self {
        MatchStats {
            results: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            total_games: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record(&mut self, result: MatchResult) {
        self.total_games += 1;
        self.results.push_back(result);
        if self.results.len() > self.capacity {
            self.results.pop_front();
        }
    }

    fn rate(&self, last_n: usize, keep: impl Fn(&MatchResult) -> bool) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self.results.iter().rev().take(n).filter(|r| keep(r)).count();
        hits as f32 / n as f32
    }

    /// Win rate for `player` in the last N games.
    pub fn win_rate(&self, player: Player, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner == Some(player))
    }

    /// Draw rate in the last N games.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner.is_none())
    }

    /// Average game length over the last N games.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self.results.iter().rev().take(n).map(|r| r.game_length).sum();
        total as f32 / n as f32
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }
}

impl Default for MatchStats {
    fn default() -> Self {
        Self::new()
    }
}
