use tracing::debug;

use serde::{Deserialize, Serialize};

use super::agent::{ensure_playable, Agent};
use super::tactical::immediate_win;
use crate::error::AiError;
use crate::game::{detector, Board, Cell, Player, CENTER_COL, ROWS};

/// Value of a position the Computer has won. A Human win scores the negation.
pub const WIN_SCORE: i32 = 100_000;

/// Trait for evaluating a board position from the Computer's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board) -> i32;
}

/// Scores assigned by [`WindowHeuristic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowWeights {
    /// Per Computer disc in the center column.
    pub center: i32,
    /// Four Computer discs.
    pub four: i32,
    /// Three Computer discs and one empty cell.
    pub three: i32,
    /// Two Computer discs and two empty cells.
    pub two: i32,
    /// Three Human discs and one empty cell.
    pub opponent_three: i32,
}

impl Default for WindowWeights {
    fn default() -> Self {
        WindowWeights {
            center: 4,
            four: 100,
            three: 10,
            two: 5,
            opponent_three: -8,
        }
    }
}

/// Default heuristic: center control plus every 4-cell window on the board.
#[derive(Debug, Clone, Default)]
pub struct WindowHeuristic {
    weights: WindowWeights,
}

impl WindowHeuristic {
    pub fn new(weights: WindowWeights) -> Self {
        WindowHeuristic { weights }
    }

    fn score_window(&self, own: usize, opp: usize, empty: usize) -> i32 {
        let w = &self.weights;
        match (own, opp, empty) {
            (4, _, _) => w.four,
            (3, _, 1) => w.three,
            (2, _, 2) => w.two,
            (_, 3, 1) => w.opponent_three,
            _ => 0,
        }
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board) -> i32 {
        let center = (0..ROWS)
            .filter(|&row| board.get(row, CENTER_COL) == Cell::Computer)
            .count() as i32;
        let mut score = center * self.weights.center;

        for line in detector::all_lines() {
            let (mut own, mut opp, mut empty) = (0, 0, 0);
            for (row, col) in line {
                match board.get(row, col) {
                    Cell::Computer => own += 1,
                    Cell::Human => opp += 1,
                    Cell::Empty => empty += 1,
                }
            }
            score += self.score_window(own, opp, empty);
        }

        score
    }
}

/// Minimax agent with alpha-beta pruning. Maximizes for the Computer.
pub struct MinimaxAgent {
    depth: u32,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(depth: u32) -> Self {
        MinimaxAgent {
            depth,
            heuristic: Box::new(WindowHeuristic::default()),
        }
    }

    pub fn with_heuristic(depth: u32, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent { depth, heuristic }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Best column for the Computer and its minimax value.
    ///
    /// An immediate win is always played, and an immediate Human win is
    /// always blocked, before any search. Otherwise columns are tried in
    /// ascending order and the first one reaching the best value wins ties.
    pub fn best_move(&self, board: &Board) -> Result<(usize, i32), AiError> {
        ensure_playable(board)?;

        if let Some(column) = immediate_win(board, Player::Computer) {
            debug!(column, "minimax taking immediate win");
            return Ok((column, WIN_SCORE));
        }

        let mut nodes = 0u64;
        let depth = self.depth.max(1);
        let (score, column) = match immediate_win(board, Player::Human) {
            Some(column) => match board.apply_move(column, Player::Computer) {
                Ok(child) => {
                    let (score, _) =
                        self.minimax(&child, depth - 1, i32::MIN, i32::MAX, false, &mut nodes);
                    (score, Some(column))
                }
                Err(_) => (0, None),
            },
            None => self.minimax(board, depth, i32::MIN, i32::MAX, true, &mut nodes),
        };
        let column = column.ok_or(AiError::TerminalPosition)?;
        debug!(depth = self.depth, nodes, column, score, "minimax search finished");
        Ok((column, score))
    }

    /// Value of `board` searched `depth` plies deep, with the column that
    /// achieves it at non-leaf nodes.
    pub fn minimax(
        &self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        nodes: &mut u64,
    ) -> (i32, Option<usize>) {
        *nodes += 1;

        if let Some((winner, _)) = detector::winning_line(board) {
            let score = match winner {
                Player::Computer => WIN_SCORE,
                Player::Human => -WIN_SCORE,
            };
            return (score, None);
        }
        let legal = board.legal_columns();
        if legal.is_empty() {
            return (0, None);
        }
        if depth == 0 {
            return (self.heuristic.evaluate(board), None);
        }

        let (mover, mut best) = if maximizing {
            (Player::Computer, i32::MIN)
        } else {
            (Player::Human, i32::MAX)
        };
        let mut best_col = legal[0];

        for col in legal {
            let Ok(child) = board.apply_move(col, mover) else {
                continue;
            };
            let (value, _) = self.minimax(&child, depth - 1, alpha, beta, !maximizing, nodes);
            if maximizing {
                if value > best {
                    best = value;
                    best_col = col;
                }
                alpha = alpha.max(value);
            } else {
                if value < best {
                    best = value;
                    best_col = col;
                }
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        (best, Some(best_col))
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &Board) -> Result<usize, AiError> {
        self.best_move(board).map(|(column, _)| column)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
