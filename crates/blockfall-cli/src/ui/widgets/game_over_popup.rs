use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{color, style};

/// Blocking game-over message; the next game starts only after it has been
/// acknowledged.
#[derive(Debug)]
pub struct GameOverPopup {
    score: usize,
    reset_pending: bool,
}

impl GameOverPopup {
    pub fn new(score: usize, reset_pending: bool) -> Self {
        Self {
            score,
            reset_pending,
        }
    }
}

impl Widget for GameOverPopup {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameOverPopup {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let prompt = if self.reset_pending {
            "Restarting..."
        } else {
            "Press Enter to play again"
        };
        let text = Text::from(vec![
            Line::from(format!("Score: {}", self.score)).centered(),
            Line::default(),
            Line::from(prompt).style(style::HELP).centered(),
        ]);

        let block = Block::bordered()
            .title(Line::from("GAME OVER").centered())
            .border_style(color::RED)
            .padding(Padding::horizontal(1))
            .style(style::DEFAULT);

        let [area] = Layout::horizontal([Constraint::Length(31)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(area);

        Clear.render(area, buf);
        let inner = block.inner(area);
        block.render(area, buf);
        text.render(inner, buf);
    }
}
