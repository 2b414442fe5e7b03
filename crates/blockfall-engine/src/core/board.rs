use super::{color::Color, piece::Piece};

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;

/// A single board cell.
///
/// A cell is either empty or filled with the color of the piece that was
/// merged into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// One row of [`BOARD_WIDTH`] cells.
pub type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

/// Fixed-size grid of cells.
///
/// Row 0 is the top of the board, column 0 the left edge. The dimensions are
/// part of the type, so every row always has exactly [`BOARD_WIDTH`] cells and
/// there are always [`BOARD_HEIGHT`] rows.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, BOARD_HEIGHT};
///
/// let board = Board::EMPTY;
/// assert_eq!(board.column_top(0), BOARD_HEIGHT);
/// assert!(board.full_rows().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    #[must_use]
    pub fn rows(&self) -> &[Row; BOARD_HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, y: usize) -> &Row {
        &self.rows[y]
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// Returns whether the cell at signed coordinates is filled.
    ///
    /// Coordinates outside the board read as empty.
    #[must_use]
    pub fn is_filled_at(&self, x: i32, y: i32) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        x < BOARD_WIDTH && y < BOARD_HEIGHT && self.rows[y][x].is_filled()
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Returns true iff every cell in row `y` is filled.
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(|cell| cell.is_filled())
    }

    /// Returns the indices of all full rows, top to bottom.
    #[must_use]
    pub fn full_rows(&self) -> Vec<usize> {
        (0..BOARD_HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Removes row `y` and prepends an empty row at the top.
    ///
    /// Rows above `y` shift down by one; rows below `y` are untouched.
    pub fn remove_row(&mut self, y: usize) {
        self.rows.copy_within(0..y, 1);
        self.prepend_empty_row();
    }

    fn prepend_empty_row(&mut self) {
        self.rows[0] = EMPTY_ROW;
    }

    /// Returns the row index of the topmost filled cell in column `x`, or
    /// [`BOARD_HEIGHT`] if the column is empty.
    #[must_use]
    pub fn column_top(&self, x: usize) -> usize {
        (0..BOARD_HEIGHT)
            .find(|&y| self.rows[y][x].is_filled())
            .unwrap_or(BOARD_HEIGHT)
    }

    /// Returns the stack height of column `x` (`BOARD_HEIGHT - column_top(x)`).
    #[must_use]
    pub fn column_height(&self, x: usize) -> usize {
        BOARD_HEIGHT - self.column_top(x)
    }

    /// Writes the piece's color into every cell it covers.
    ///
    /// Cells that fall outside the board (above the top or below the bottom)
    /// are dropped.
    pub fn merge_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < BOARD_WIDTH && y < BOARD_HEIGHT {
                self.rows[y][x] = Cell::Filled(piece.color());
            }
        }
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const C: Cell = Cell::Filled(Color::RED);

    /// Builds a board from rows of `#`/`.` drawn bottom-aligned.
    pub(crate) fn board_from_art(art: &[&str]) -> Board {
        let mut board = Board::EMPTY;
        let offset = BOARD_HEIGHT - art.len();
        for (dy, line) in art.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch == '#' {
                    board.set_cell(x, offset + dy, C);
                }
            }
        }
        board
    }

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set_cell(x, y, C);
        }
    }

    #[test]
    fn test_empty_board_has_no_full_rows() {
        let board = Board::EMPTY;
        assert!(board.full_rows().is_empty());
        for y in 0..BOARD_HEIGHT {
            assert!(!board.is_row_full(y));
        }
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_row_full_requires_every_cell() {
        let mut board = Board::EMPTY;
        for x in 0..BOARD_WIDTH - 1 {
            board.set_cell(x, 19, C);
        }
        assert!(!board.is_row_full(19));
        board.set_cell(BOARD_WIDTH - 1, 19, C);
        assert!(board.is_row_full(19));
        assert_eq!(board.full_rows(), vec![19]);
    }

    #[test]
    fn test_remove_row_shifts_rows_above() {
        let mut board = Board::EMPTY;
        board.set_cell(3, 10, C);
        fill_row(&mut board, 15);
        board.set_cell(7, 18, C);

        board.remove_row(15);

        assert_eq!(board.cell(3, 11), C);
        assert!(board.cell(3, 10).is_empty());
        assert_eq!(board.cell(7, 18), C);
        assert!(!board.is_row_full(15));
        assert!(board.row(0).iter().all(|c| c.is_empty()));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_remove_top_row() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 0);
        board.remove_row(0);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_column_top_and_height() {
        let board = board_from_art(&[
            "#.........", //
            "#..#......",
            "##.#......",
        ]);
        assert_eq!(board.column_top(0), 17);
        assert_eq!(board.column_height(0), 3);
        assert_eq!(board.column_top(1), 19);
        assert_eq!(board.column_top(2), BOARD_HEIGHT);
        assert_eq!(board.column_height(2), 0);
        assert_eq!(board.column_top(3), 18);
    }

    #[test]
    fn test_is_filled_at_out_of_bounds_reads_empty() {
        let board = board_from_art(&["##########"]);
        assert!(board.is_filled_at(0, 19));
        assert!(!board.is_filled_at(-1, 19));
        assert!(!board.is_filled_at(10, 19));
        assert!(!board.is_filled_at(0, 20));
        assert!(!board.is_filled_at(0, -1));
    }
}
