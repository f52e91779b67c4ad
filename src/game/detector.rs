//! Win and terminal-state detection.
//!
//! Every cell is tried as the start of a run in four directions; the first
//! complete run found (row-major, then direction order) is reported.

use super::board::{Board, Cell, COLS, ROWS};
use super::Player;

/// Length of a winning run.
pub const CONNECT: usize = 4;

/// Run directions as (row step, column step): horizontal, vertical,
/// diagonal down-right, diagonal down-left.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// The four (row, column) cells that make up a winning run.
pub type WinningLine = [(usize, usize); CONNECT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win {
        winner: Player,
        line: WinningLine,
    },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}

/// Cells of the run starting at (row, col) in direction (dr, dc), or `None`
/// if it leaves the board.
fn run_cells(row: usize, col: usize, (dr, dc): (isize, isize)) -> Option<WinningLine> {
    let mut line = [(0, 0); CONNECT];
    for (k, slot) in line.iter_mut().enumerate() {
        let r = row as isize + dr * k as isize;
        let c = col as isize + dc * k as isize;
        if r < 0 || r >= ROWS as isize || c < 0 || c >= COLS as isize {
            return None;
        }
        *slot = (r as usize, c as usize);
    }
    Some(line)
}

/// Every in-bounds run of four cells on the board, in scan order.
pub fn all_lines() -> impl Iterator<Item = WinningLine> {
    (0..ROWS).flat_map(|row| {
        (0..COLS).flat_map(move |col| {
            DIRECTIONS
                .iter()
                .filter_map(move |&dir| run_cells(row, col, dir))
        })
    })
}

/// First run of four same-owner discs, with its owner.
pub fn winning_line(board: &Board) -> Option<(Player, WinningLine)> {
    for row in 0..ROWS {
        for col in 0..COLS {
            let Some(owner) = board.get(row, col).owner() else {
                continue;
            };
            for &dir in &DIRECTIONS {
                if let Some(line) = run_cells(row, col, dir) {
                    if line.iter().all(|&(r, c)| board.get(r, c).owner() == Some(owner)) {
                        return Some((owner, line));
                    }
                }
            }
        }
    }
    None
}

/// Whether `player` has four in a row anywhere on the board.
pub fn has_won(board: &Board, player: Player) -> bool {
    let cell: Cell = player.to_cell();
    all_lines().any(|line| line.iter().all(|&(r, c)| board.get(r, c) == cell))
}

/// Classify the board as won, drawn, or still in progress.
pub fn detect(board: &Board) -> Outcome {
    if let Some((winner, line)) = winning_line(board) {
        return Outcome::Win { winner, line };
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
