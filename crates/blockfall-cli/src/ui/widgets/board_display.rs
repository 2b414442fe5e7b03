use blockfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board, Color, Piece};
use ratatui::{
    prelude::{Buffer, Rect},
    widgets::{Block, Widget},
};

use super::{BlockDisplay, block_horizontal_margin, block_vertical_margin};

/// The playfield: settled cells, the falling piece, its ghost and the rows
/// being cleared.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    falling_piece: Option<&'a Piece>,
    ghost: Option<Piece>,
    clearing_rows: &'a [usize],
    flash: Option<Color>,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            falling_piece: None,
            ghost: None,
            clearing_rows: &[],
            flash: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: Option<&'a Piece>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    pub fn ghost(self, ghost: Option<Piece>) -> Self {
        Self { ghost, ..self }
    }

    /// Draws `rows` with the flash color instead of their contents.
    pub fn clearing(self, rows: &'a [usize], flash: Option<Color>) -> Self {
        Self {
            clearing_rows: rows,
            flash,
            ..self
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        BOARD_WIDTH as u16 * BlockDisplay::width() + block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_HEIGHT as u16 * BlockDisplay::height() + block_vertical_margin(self.block.as_ref())
    }

    fn block_at(&self, x: usize, y: usize) -> BlockDisplay {
        if self.clearing_rows.contains(&y)
            && let Some(color) = self.flash
        {
            return BlockDisplay::solid(color);
        }
        let cell = self.board.cell(x, y);
        if cell.is_empty()
            && let Some(ghost) = &self.ghost
            && covers(ghost, x, y)
        {
            return BlockDisplay::ghost(ghost.color());
        }
        BlockDisplay::from_cell(cell)
    }
}

fn covers(piece: &Piece, x: usize, y: usize) -> bool {
    piece.occupied_positions().any(|(px, py)| {
        usize::try_from(px).is_ok_and(|px| px == x) && usize::try_from(py).is_ok_and(|py| py == y)
    })
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let inner = match &self.block {
            Some(block) => {
                block.render(area, buf);
                block.inner(area)
            }
            None => area,
        };

        let cell_area = |x: usize, y: usize| {
            Rect::new(
                inner.x + x as u16 * BlockDisplay::width(),
                inner.y + y as u16 * BlockDisplay::height(),
                BlockDisplay::width(),
                BlockDisplay::height(),
            )
            .intersection(inner)
        };

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                self.block_at(x, y).render(cell_area(x, y), buf);
            }
        }

        if let Some(piece) = self.falling_piece {
            for (x, y) in piece.occupied_positions() {
                // Cells above the board are not drawn.
                if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                    && x < BOARD_WIDTH
                    && y < BOARD_HEIGHT
                {
                    BlockDisplay::solid(piece.color()).render(cell_area(x, y), buf);
                }
            }
        }
    }
}
