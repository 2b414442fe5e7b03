use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};

use super::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
    want_key_releases: bool,
    key_releases: bool,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum time between two ticks.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    /// Requests a tick after `delay`. `None` cancels the request.
    pub fn wake_after(&mut self, delay: Option<Duration>) {
        self.events.wake_at(delay.map(|delay| Instant::now() + delay));
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Asks the terminal to report key releases, if it supports it.
    pub fn request_key_releases(&mut self) {
        self.want_key_releases = true;
    }

    /// Returns whether the terminal reports key releases.
    ///
    /// Only meaningful once the application is running.
    #[must_use]
    pub fn reports_key_releases(&self) -> bool {
        self.key_releases
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `TuiEvent::Tick`: calls `app.update()`
    ///    - `TuiEvent::Render`: calls `app.draw()`
    ///    - `TuiEvent::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            self.key_releases =
                self.want_key_releases && terminal::supports_keyboard_enhancement()?;
            if self.key_releases {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }

            let result = self.event_loop(terminal, app);

            if self.key_releases {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }

    fn event_loop<A>(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        app: &mut A,
    ) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick => {
                    app.update(self);
                }
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                }
                TuiEvent::Crossterm(event) => {
                    app.handle_event(self, event);
                }
            }
        }
        Ok(())
    }
}
