use std::fmt;
use std::str::FromStr;

use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Middle column, the most valuable one to hold.
pub const CENTER_COL: usize = COLS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Human,
    Computer,
}

impl Cell {
    /// Owner of the disc in this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Player::Human),
            Cell::Computer => Some(Player::Computer),
        }
    }

    fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'X',
            Cell::Computer => 'O',
        }
    }
}

/// A move that cannot be applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range (expected 0..7)")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors produced when parsing a board from its text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 6 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 7")]
    RowLength {
        row: usize,
        len: usize,
    },

    #[error("unknown cell glyph {glyph:?} at row {row}, column {col}")]
    Glyph {
        row: usize,
        col: usize,
        glyph: char,
    },

    #[error("floating disc at row {row}, column {col}")]
    Floating {
        row: usize,
        col: usize,
    },
}

/// 6x7 grid. Row 0 is the top, row 5 the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// True iff `col` is on the board and its top cell is empty.
    pub fn is_legal(&self, col: usize) -> bool {
        col < COLS && self.cells[0][col] == Cell::Empty
    }

    /// Row a disc dropped into `col` would land on, scanning bottom-up.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Columns that still accept a disc, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_legal(col)).collect()
    }

    /// Drop a disc for `player` into `col`, returning the resulting board.
    /// `self` is left untouched.
    pub fn apply_move(&self, col: usize, player: Player) -> Result<Board, MoveError> {
        let mut next = *self;
        next.drop_piece(col, player.to_cell())?;
        Ok(next)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.lowest_empty_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_legal(col))
    }

    /// Number of discs on the board.
    pub fn disc_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Same position with Human and Computer discs exchanged.
    pub fn swapped(&self) -> Board {
        let mut next = *self;
        for cell in next.cells.iter_mut().flatten() {
            *cell = match *cell {
                Cell::Empty => Cell::Empty,
                Cell::Human => Cell::Computer,
                Cell::Computer => Cell::Human,
            };
        }
        next
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses the `Display` form. Blank lines and surrounding whitespace are
    /// ignored, so boards can be written as indented raw strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != ROWS {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != COLS {
                return Err(ParseBoardError::RowLength { row, len });
            }
            for (col, glyph) in line.chars().enumerate() {
                board.cells[row][col] = match glyph {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::Human,
                    'O' | 'o' => Cell::Computer,
                    _ => return Err(ParseBoardError::Glyph { row, col, glyph }),
                };
            }
        }

        // Gravity: nothing may sit above an empty cell.
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.cells[row][col] != Cell::Empty && board.cells[row + 1][col] == Cell::Empty
                {
                    return Err(ParseBoardError::Floating { row, col });
                }
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.disc_count(), 0);
        assert_eq!(board.legal_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        let row = board.drop_piece(3, Cell::Human).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::Human);

        let row = board.drop_piece(3, Cell::Computer).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Computer);
    }

    #[test]
    fn test_apply_move_leaves_original_untouched() {
        let board = Board::new();
        let before = board;
        let next = board.apply_move(2, Player::Computer).unwrap();

        assert_eq!(board, before);
        assert_eq!(next.get(5, 2), Cell::Computer);
        assert_eq!(next.disc_count(), 1);
    }

    #[test]
    fn test_lowest_empty_row() {
        let mut board = Board::new();
        assert_eq!(board.lowest_empty_row(0), Some(5));
        board.drop_piece(0, Cell::Human).unwrap();
        board.drop_piece(0, Cell::Computer).unwrap();
        assert_eq!(board.lowest_empty_row(0), Some(3));
        assert_eq!(board.lowest_empty_row(COLS), None);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(0, Cell::Human).unwrap();
        }

        assert!(!board.is_legal(0));
        assert_eq!(board.lowest_empty_row(0), None);
        let before = board;
        assert_eq!(
            board.apply_move(0, Player::Computer),
            Err(MoveError::ColumnFull(0))
        );
        assert_eq!(board.drop_piece(0, Cell::Computer), Err(MoveError::ColumnFull(0)));
        assert_eq!(board, before, "failed move must not change the board");
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert!(!board.is_legal(7));
        assert_eq!(board.drop_piece(7, Cell::Human), Err(MoveError::InvalidColumn(7)));
        assert_eq!(
            board.apply_move(usize::MAX, Player::Human),
            Err(MoveError::InvalidColumn(usize::MAX))
        );
    }

    #[test]
    fn test_legality_matches_apply_move() {
        let board: Board = "
            X......
            O......
            X.....O
            O.....X
            X..O..O
            O..X..X
        "
        .parse()
        .unwrap();
        for col in 0..COLS + 2 {
            assert_eq!(
                board.is_legal(col),
                board.apply_move(col, Player::Human).is_ok(),
                "legality disagrees with apply_move for column {col}"
            );
        }
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Cell::Human).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
    }

    #[test]
    fn test_gravity_holds_after_moves() {
        let mut board = Board::new();
        for (i, &col) in [3, 3, 2, 4, 3, 6, 0, 3, 3, 3, 1].iter().enumerate() {
            let player = if i % 2 == 0 {
                Player::Human
            } else {
                Player::Computer
            };
            board = board.apply_move(col, player).unwrap();
        }
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.get(row, col) != Cell::Empty {
                    assert_ne!(board.get(row + 1, col), Cell::Empty, "gap under ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let mut board = Board::new();
        board.drop_piece(3, Cell::Human).unwrap();
        board.drop_piece(3, Cell::Computer).unwrap();
        board.drop_piece(0, Cell::Computer).unwrap();

        let text = board.to_string();
        assert_eq!(text.lines().last(), Some("O..X..."));
        assert_eq!(text.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_parse_rejects_floating_disc() {
        let err = "
            .......
            .......
            .......
            .......
            ...X...
            .......
        "
        .parse::<Board>()
        .unwrap_err();
        assert_eq!(err, ParseBoardError::Floating { row: 4, col: 3 });
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert_eq!("...".parse::<Board>(), Err(ParseBoardError::RowCount(1)));
        let err = ".......\n.......\n.......\n.......\n.......\n......"
            .parse::<Board>()
            .unwrap_err();
        assert_eq!(err, ParseBoardError::RowLength { row: 5, len: 6 });
        let err = ".......\n.......\n.......\n.......\n.......\n...Z..."
            .parse::<Board>()
            .unwrap_err();
        assert_eq!(
            err,
            ParseBoardError::Glyph {
                row: 5,
                col: 3,
                glyph: 'Z'
            }
        );
    }

    #[test]
    fn test_swapped_exchanges_owners() {
        let mut board = Board::new();
        board.drop_piece(1, Cell::Human).unwrap();
        board.drop_piece(5, Cell::Computer).unwrap();
        let swapped = board.swapped();
        assert_eq!(swapped.get(5, 1), Cell::Computer);
        assert_eq!(swapped.get(5, 5), Cell::Human);
        assert_eq!(swapped.swapped(), board);
    }
}
