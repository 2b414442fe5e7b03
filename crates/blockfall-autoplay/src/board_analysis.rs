use std::cell::OnceCell;

use blockfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board};

/// Hole statistics of a board.
///
/// A hole is an empty cell below the first filled cell of its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoleProfile {
    /// Holes per column.
    pub column_holes: [usize; BOARD_WIDTH],
    /// Sum over neighboring column pairs that both have holes of the smaller
    /// hole count.
    pub adjacent_holes: usize,
    /// For every hole, the number of filled cells above it in its column.
    pub blocks_above_holes: usize,
}

impl HoleProfile {
    #[must_use]
    pub fn holes(&self) -> usize {
        self.column_holes.iter().sum()
    }

    /// Accumulated hole depth. Every hole below the surface adds one.
    #[must_use]
    pub fn hole_depth(&self) -> usize {
        self.holes()
    }
}

#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    column_tops: OnceCell<[usize; BOARD_WIDTH]>,
    full_rows: OnceCell<FullRows>,
    hole_profile: OnceCell<HoleProfile>,
    total_height: OnceCell<usize>,
    max_height: OnceCell<usize>,
    bumpiness: OnceCell<usize>,
    surface_contacts: OnceCell<usize>,
    is_basin: OnceCell<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FullRows {
    count: usize,
    last_run: usize,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: board.clone(),
            column_tops: OnceCell::new(),
            full_rows: OnceCell::new(),
            hole_profile: OnceCell::new(),
            total_height: OnceCell::new(),
            max_height: OnceCell::new(),
            bumpiness: OnceCell::new(),
            surface_contacts: OnceCell::new(),
            is_basin: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Row index of the topmost filled cell per column, [`BOARD_HEIGHT`] when
    /// the column is empty.
    #[must_use]
    pub fn column_tops(&self) -> &[usize; BOARD_WIDTH] {
        self.column_tops.get_or_init(|| {
            let mut tops = [BOARD_HEIGHT; BOARD_WIDTH];
            for (x, top) in tops.iter_mut().enumerate() {
                *top = self.board.column_top(x);
            }
            tops
        })
    }

    fn full_rows(&self) -> FullRows {
        *self.full_rows.get_or_init(|| {
            let mut count = 0;
            let mut last_run = 0;
            let mut previous_full = false;
            for y in 0..BOARD_HEIGHT {
                let full = self.board.is_row_full(y);
                if full {
                    count += 1;
                    last_run = if previous_full { last_run + 1 } else { 1 };
                }
                previous_full = full;
            }
            FullRows { count, last_run }
        })
    }

    /// Number of full rows on the board.
    #[must_use]
    pub fn completed_lines(&self) -> usize {
        self.full_rows().count
    }

    /// Length of the lowest run of vertically adjacent full rows.
    ///
    /// Rows are scanned top to bottom, so an earlier run is forgotten when a
    /// later one starts. Zero when there are no full rows.
    #[must_use]
    pub fn consecutive_lines(&self) -> usize {
        self.full_rows().last_run
    }

    #[must_use]
    pub fn hole_profile(&self) -> &HoleProfile {
        self.hole_profile.get_or_init(|| {
            let mut profile = HoleProfile::default();
            for x in 0..BOARD_WIDTH {
                let mut filled_above = 0;
                for y in 0..BOARD_HEIGHT {
                    if self.board.cell(x, y).is_filled() {
                        filled_above += 1;
                    } else if filled_above > 0 {
                        profile.column_holes[x] += 1;
                        profile.blocks_above_holes += filled_above;
                    }
                }
            }
            profile.adjacent_holes = profile
                .column_holes
                .windows(2)
                .filter(|pair| pair[0] > 0 && pair[1] > 0)
                .map(|pair| usize::min(pair[0], pair[1]))
                .sum();
            profile
        })
    }

    /// Sum of column heights.
    #[must_use]
    pub fn total_height(&self) -> usize {
        *self.total_height.get_or_init(|| {
            self.column_tops()
                .iter()
                .map(|top| BOARD_HEIGHT - top)
                .sum()
        })
    }

    #[must_use]
    pub fn max_height(&self) -> usize {
        *self.max_height.get_or_init(|| {
            self.column_tops()
                .iter()
                .map(|top| BOARD_HEIGHT - top)
                .max()
                .unwrap_or(0)
        })
    }

    /// Sum of absolute differences between neighboring column tops.
    #[must_use]
    pub fn bumpiness(&self) -> usize {
        *self.bumpiness.get_or_init(|| {
            self.column_tops()
                .windows(2)
                .map(|pair| pair[0].abs_diff(pair[1]))
                .sum()
        })
    }

    /// Filled 8-neighbors of each column's top cell, summed over all columns.
    ///
    /// For an empty column the probed cell is the one just below the floor, so
    /// only its upper neighbors on the bottom row can count.
    #[must_use]
    pub fn surface_contacts(&self) -> usize {
        *self.surface_contacts.get_or_init(|| {
            let mut contacts = 0;
            for (x, top) in self.column_tops().iter().enumerate() {
                let (x, top) = (to_i32(x), to_i32(*top));
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        if (dx, dy) != (0, 0) && self.board.is_filled_at(x + dx, top + dy) {
                            contacts += 1;
                        }
                    }
                }
            }
            contacts
        })
    }

    /// Returns whether both edge columns stand above their inner neighbor and
    /// the middle columns are, on average, lower than both edges.
    ///
    /// The comparison is done on column-top row indices, where a larger value
    /// means a lower stack.
    #[must_use]
    pub fn is_basin(&self) -> bool {
        *self.is_basin.get_or_init(|| {
            let tops = self.column_tops();
            let (first, last) = (tops[0], tops[BOARD_WIDTH - 1]);
            if !(first < tops[1] && last < tops[BOARD_WIDTH - 2]) {
                return false;
            }
            let center = &tops[2..BOARD_WIDTH - 2];
            let center_sum: usize = center.iter().sum();
            // avg > edge  <=>  sum > edge * len
            center_sum > first * center.len() && center_sum > last * center.len()
        })
    }
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
