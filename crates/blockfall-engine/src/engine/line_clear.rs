//! Line-clear detection, flash animation and board compaction.
//!
//! The controller cycles through `Idle → Detecting → Animating(1..=steps) →
//! Compacting → Idle`. Detecting and Compacting happen inside a single call
//! ([`LineClearController::detect`] and the final [`LineClearController::tick`]),
//! so only `Idle` and `Animating` are observable between ticks.

use crate::core::{Board, Color};

/// Palette cycled through while full rows flash.
pub const FLASH_COLORS: [Color; 6] = [
    Color::WHITE,
    Color::RED,
    Color::YELLOW,
    Color::GREEN,
    Color::BLUE,
    Color::MAGENTA,
];

/// Returns the flash color for animation step `step` (1-based).
#[must_use]
pub fn flash_color(step: usize) -> Color {
    FLASH_COLORS[(step.max(1) - 1) % FLASH_COLORS.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ClearPhase {
    Idle,
    Animating { step: usize },
}

/// Result of one animation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearTick {
    /// Rows are still flashing.
    Flash { step: usize, color: Color },
    /// Animation is over; the listed rows must now be scored and compacted.
    Finished { rows: Vec<usize> },
}

#[derive(Debug, Clone)]
pub struct LineClearController {
    rows: Vec<usize>,
    phase: ClearPhase,
    steps: usize,
}

impl LineClearController {
    #[must_use]
    pub fn new(steps: usize) -> Self {
        Self {
            rows: Vec::new(),
            phase: ClearPhase::Idle,
            steps,
        }
    }

    /// Returns whether a clear is in progress (the clearing set is non-empty).
    #[must_use]
    pub fn is_clearing(&self) -> bool {
        !self.rows.is_empty()
    }

    #[must_use]
    pub fn clearing_rows(&self) -> &[usize] {
        &self.rows
    }

    #[must_use]
    pub fn phase(&self) -> ClearPhase {
        self.phase
    }

    /// Returns the step and color currently flashing, if any.
    #[must_use]
    pub fn flash(&self) -> Option<(usize, Color)> {
        match self.phase {
            ClearPhase::Animating { step } if step >= 1 => Some((step, flash_color(step))),
            _ => None,
        }
    }

    /// Collects full rows after a merge.
    ///
    /// Returns the number of rows that will be cleared. When it is zero the
    /// controller stays idle and no animation must be started. A clear already
    /// in progress is left alone.
    pub fn detect(&mut self, board: &Board) -> usize {
        if self.is_clearing() {
            return 0;
        }
        self.rows = board.full_rows();
        if !self.rows.is_empty() {
            self.phase = ClearPhase::Animating { step: 0 };
        }
        self.rows.len()
    }

    /// Advances the animation by one step.
    ///
    /// Steps `1..=steps` flash; the following tick finishes the animation and
    /// hands the rows back for compaction, leaving the controller idle.
    pub fn tick(&mut self) -> ClearTick {
        let step = match self.phase {
            ClearPhase::Idle => 0,
            ClearPhase::Animating { step } => step,
        } + 1;

        if step <= self.steps {
            self.phase = ClearPhase::Animating { step };
            return ClearTick::Flash {
                step,
                color: flash_color(step),
            };
        }

        self.phase = ClearPhase::Idle;
        ClearTick::Finished {
            rows: std::mem::take(&mut self.rows),
        }
    }

    pub fn reset(&mut self) {
        self.rows.clear();
        self.phase = ClearPhase::Idle;
    }
}

/// Removes `rows` from the board, prepending one empty row per removal.
///
/// Rows are removed bottom-up and the i-th removal targets `rows[i] + i`: each
/// earlier removal sat below the current row and shifted it down by one.
pub fn compact_rows(board: &mut Board, rows: &[usize]) {
    let mut rows = rows.to_vec();
    rows.sort_unstable_by(|a, b| b.cmp(a));
    for (i, y) in rows.into_iter().enumerate() {
        board.remove_row(y + i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BOARD_HEIGHT, BOARD_WIDTH, Cell};

    const A: Cell = Cell::Filled(Color::RED);
    const B: Cell = Cell::Filled(Color::BLUE);

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set_cell(x, y, A);
        }
    }

    #[test]
    fn test_no_full_rows_stays_idle() {
        let mut controller = LineClearController::new(10);
        let mut board = Board::EMPTY;
        board.set_cell(0, 19, A);
        assert_eq!(controller.detect(&board), 0);
        assert!(!controller.is_clearing());
        assert!(controller.phase().is_idle());
    }

    #[test]
    fn test_animation_runs_ten_flashes_then_finishes() {
        let mut controller = LineClearController::new(10);
        let mut board = Board::EMPTY;
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);
        assert_eq!(controller.detect(&board), 2);
        assert!(controller.is_clearing());

        for step in 1..=10 {
            let tick = controller.tick();
            assert_eq!(
                tick,
                ClearTick::Flash {
                    step,
                    color: FLASH_COLORS[(step - 1) % 6]
                }
            );
            assert!(controller.is_clearing());
        }
        assert_eq!(controller.flash(), Some((10, Color::GREEN)));

        let ClearTick::Finished { rows } = controller.tick() else {
            panic!("animation should be finished");
        };
        assert_eq!(rows, vec![17, 19]);
        assert!(!controller.is_clearing());
        assert!(controller.phase().is_idle());
    }

    #[test]
    fn test_detect_ignored_while_clearing() {
        let mut controller = LineClearController::new(10);
        let mut board = Board::EMPTY;
        fill_row(&mut board, 19);
        controller.detect(&board);
        fill_row(&mut board, 18);
        assert_eq!(controller.detect(&board), 0);
        assert_eq!(controller.clearing_rows(), &[19]);
    }

    #[test]
    fn test_flash_palette_cycles() {
        assert_eq!(flash_color(1), Color::WHITE);
        assert_eq!(flash_color(6), Color::MAGENTA);
        assert_eq!(flash_color(7), Color::WHITE);
        assert_eq!(flash_color(10), Color::GREEN);
    }

    #[test]
    fn test_compact_single_row() {
        let mut board = Board::EMPTY;
        board.set_cell(2, 18, B);
        fill_row(&mut board, 19);
        compact_rows(&mut board, &[19]);
        assert_eq!(board.cell(2, 19), B);
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_compact_preserves_untouched_rows() {
        // Full rows at 12, 15, 16 and 19 with marker cells in between.
        let mut board = Board::EMPTY;
        for y in [12, 15, 16, 19] {
            fill_row(&mut board, y);
        }
        board.set_cell(0, 11, B);
        board.set_cell(1, 13, B);
        board.set_cell(2, 14, B);
        board.set_cell(3, 17, B);
        board.set_cell(4, 18, B);

        let before = (0..BOARD_HEIGHT)
            .filter(|y| ![12, 15, 16, 19].contains(y))
            .map(|y| *board.row(y))
            .collect::<Vec<_>>();

        compact_rows(&mut board, &[12, 15, 16, 19]);

        for y in 0..4 {
            assert!(board.row(y).iter().all(|c| c.is_empty()));
        }
        let after = (4..BOARD_HEIGHT).map(|y| *board.row(y)).collect::<Vec<_>>();
        assert_eq!(&after[..], &before[..]);
        assert!(board.full_rows().is_empty());
        assert_eq!(board.rows().len(), BOARD_HEIGHT);
    }

    #[test]
    fn test_compact_order_independent_of_input() {
        let mut a = Board::EMPTY;
        for y in [17, 18, 19] {
            fill_row(&mut a, y);
        }
        a.set_cell(5, 16, B);
        let mut b = a.clone();
        compact_rows(&mut a, &[17, 18, 19]);
        compact_rows(&mut b, &[19, 17, 18]);
        assert_eq!(a, b);
        assert_eq!(a.cell(5, 19), B);
    }
}
