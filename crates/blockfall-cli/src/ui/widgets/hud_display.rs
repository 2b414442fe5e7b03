use blockfall_engine::GameSession;
use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use super::style;

/// Score, level and session counters, plus the transient clearing notice and
/// the latest status message.
#[derive(Debug)]
pub struct HudDisplay<'a> {
    session: &'a GameSession,
    status: Option<&'a str>,
    block: Option<Block<'a>>,
}

impl<'a> HudDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            status: None,
            block: None,
        }
    }

    pub fn status(self, status: Option<&'a str>) -> Self {
        Self { status, ..self }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

/// Text of the notice shown while rows are being cleared.
#[must_use]
pub fn clearing_notice(lines: usize) -> Option<String> {
    (lines > 0).then(|| format!("{lines} lines clearing!"))
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<8}"), style::LABEL),
        Span::raw(value),
    ])
}

impl Widget for HudDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &HudDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let stats = self.session.stats();
        let autoplay = if self.session.is_autoplay() {
            "ON"
        } else {
            "OFF"
        };

        let mut lines = vec![
            stat_line("SCORE", stats.score().to_string()),
            stat_line("LEVEL", stats.level().to_string()),
            stat_line("LINES", stats.total_cleared_lines().to_string()),
            stat_line("PIECES", stats.completed_pieces().to_string()),
            stat_line("GAMES", self.session.games_played().to_string()),
            stat_line("AUTO", autoplay.to_string()),
            Line::default(),
        ];
        let counter = stats.line_cleared_counter();
        for (label, count) in ["SINGLE", "DOUBLE", "TRIPLE", "QUAD"]
            .into_iter()
            .zip(&counter[1..])
        {
            lines.push(stat_line(label, count.to_string()));
        }
        lines.push(Line::default());
        if let Some(notice) = clearing_notice(self.session.clearing_rows().len()) {
            lines.push(Line::styled(notice, style::NOTICE));
        }
        if let Some(status) = self.status {
            lines.push(Line::raw(status.to_owned()));
        }

        let mut paragraph = Paragraph::new(lines).style(style::DEFAULT);
        if let Some(block) = &self.block {
            paragraph = paragraph.block(block.clone());
        }
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearing_notice() {
        assert_eq!(clearing_notice(0), None);
        assert_eq!(clearing_notice(2).as_deref(), Some("2 lines clearing!"));
    }
}
