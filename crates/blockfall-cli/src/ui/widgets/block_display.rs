use blockfall_engine::{Cell, Color};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::{color, style};

/// A single board cell drawn as a two-column block.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub const fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::new(style::EMPTY_DOT, " ."),
            Cell::Filled(color) => Self::solid(color),
        }
    }

    pub const fn solid(color: Color) -> Self {
        Self::new(style::bg_only(color::from_engine(color)), "")
    }

    pub const fn ghost(color: Color) -> Self {
        Self::new(
            Style::new().fg(color::from_engine(color)).bg(color::BLACK),
            "[]",
        )
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol).style(self.style).render(area, buf);
    }
}
