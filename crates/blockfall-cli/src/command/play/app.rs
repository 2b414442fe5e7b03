use std::time::{Duration, Instant};

use blockfall_engine::{GameEvent, GameSession, SessionState};
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Text,
};

use crate::{
    tui::{App, RenderMode, Runtime},
    ui::widgets::{SessionDisplay, style},
};

use super::keymap::{KeyAction, intent_for_key, key_action};

const FPS: f64 = 60.0;

/// Upper bound on the time between two session updates.
const MAX_TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Terminal front end of a [`GameSession`].
///
/// Wall-clock time is fed into the session before every key press and on
/// every tick; ticks are requested for the session's next timer deadline.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    last_sync: Instant,
    status: Option<String>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            last_sync: Instant::now(),
            status: None,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn sync(&mut self) {
        let now = Instant::now();
        self.session.advance(now.duration_since(self.last_sync));
        self.last_sync = now;
        self.drain_events();
    }

    fn drain_events(&mut self) {
        for event in self.session.take_events() {
            if let Some(status) = status_message(&event) {
                self.status = Some(status);
            }
        }
    }

    fn schedule_wake(&self, runtime: &mut Runtime) {
        let delay = self
            .session
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.session.now()));
        runtime.wake_after(delay);
    }

    fn handle_key(&mut self, key: &KeyEvent, key_releases: bool) {
        match key.kind {
            KeyEventKind::Press => {}
            // The session repeats held keys itself.
            KeyEventKind::Repeat => return,
            KeyEventKind::Release => {
                if let Some(intent) = intent_for_key(key.code) {
                    self.session.release(intent);
                }
                return;
            }
        }

        match key_action(key) {
            Some(KeyAction::Quit) => self.is_exiting = true,
            Some(KeyAction::AcknowledgeGameOver) => _ = self.session.acknowledge_game_over(),
            Some(KeyAction::Intent(intent)) => {
                self.session.press(intent);
                // Without release events a press moves exactly once.
                if !key_releases {
                    self.session.release(intent);
                }
            }
            None => {}
        }
    }
}

fn status_message(event: &GameEvent) -> Option<String> {
    let message = match event {
        GameEvent::LinesCleared { count, points } => format!("{count} lines +{points}"),
        GameEvent::LevelChanged { level } => format!("Level up! {level}"),
        GameEvent::AutoplayToggled { enabled: true } => "Autoplay on".to_owned(),
        GameEvent::AutoplayToggled { enabled: false } => "Autoplay off".to_owned(),
        GameEvent::GameOver { score } => format!("Game over ({score})"),
        GameEvent::GameReset => "New game".to_owned(),
        GameEvent::Redraw | GameEvent::LinesClearing { .. } | GameEvent::ClearFlash { .. } => {
            return None;
        }
    };
    Some(message)
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.request_key_releases();
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        runtime.set_tick_interval(Some(MAX_TICK_INTERVAL));
        self.last_sync = Instant::now();
        self.schedule_wake(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        self.sync();
        if let Some(key) = event.as_key_event() {
            self.handle_key(&key, runtime.reports_key_releases());
            self.drain_events();
        }
        self.schedule_wake(runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        let help_text = match self.session.session_state() {
            SessionState::Playing if self.session.is_autoplay() => "Controls: A (Manual) | Q (Quit)",
            SessionState::Playing => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Hard Drop) | Space (Rotate) | A (Auto) | Q (Quit)"
            }
            SessionState::GameOver => "Controls: Enter (Play Again) | Q (Quit)",
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        let [main_area] = Layout::horizontal([Constraint::Length(48)])
            .flex(Flex::Center)
            .areas(main_area);

        frame.render_widget(
            SessionDisplay::new(&self.session).status(self.status.as_deref()),
            main_area,
        );
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.sync();
        self.schedule_wake(runtime);
    }
}
