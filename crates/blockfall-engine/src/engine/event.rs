use crate::core::Color;

/// Notifications queued by the session for its front ends.
///
/// Drain them with [`GameSession::take_events`](crate::GameSession::take_events).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// Something visible changed.
    Redraw,
    /// Full rows were found and start flashing.
    LinesClearing { count: usize },
    ClearFlash { step: usize, color: Color },
    /// Rows were removed and scored.
    LinesCleared { count: usize, points: usize },
    LevelChanged { level: usize },
    AutoplayToggled { enabled: bool },
    /// A spawned piece did not fit. Carries the final score.
    GameOver { score: usize },
    GameReset,
}
