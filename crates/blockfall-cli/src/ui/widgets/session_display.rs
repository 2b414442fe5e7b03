use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Padding, Widget},
};

use super::{BoardDisplay, GameOverPopup, HudDisplay, color, style};

const HUD_WIDTH: u16 = 26;

/// Board and HUD side by side, with the game-over popup on top when the game
/// has ended.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    status: Option<&'a str>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            status: None,
        }
    }

    pub fn status(self, status: Option<&'a str>) -> Self {
        Self { status, ..self }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let session = self.session;
        let border_style = match session.session_state() {
            SessionState::Playing if session.is_autoplay() => color::MAGENTA,
            SessionState::Playing => color::WHITE,
            SessionState::GameOver => color::RED,
        };

        let board = BoardDisplay::new(session.board())
            .falling_piece(session.falling_piece())
            .ghost(session.ghost_piece())
            .clearing(session.clearing_rows(), session.clear_flash())
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let hud = HudDisplay::new(session).status(self.status).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [board_area, hud_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(HUD_WIDTH),
        ])
        .areas(area);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(board_area);
        let [hud_area] = Layout::vertical([Constraint::Length(board.height())]).areas(hud_area);

        board.render(board_area, buf);
        hud.render(hud_area, buf);

        if session.session_state().is_game_over() {
            GameOverPopup::new(session.stats().score(), session.is_reset_pending())
                .render(board_area.union(hud_area), buf);
        }
    }
}
