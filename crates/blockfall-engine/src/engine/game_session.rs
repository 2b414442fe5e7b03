use std::time::Duration;

use crate::core::{Board, Color, Piece};

use super::{
    GameConfig, GameEvent, GameState, GameStats, HeldIntents, Intent, MovePlanner,
    PieceGenerator, Scheduler, TimerKind, fall_interval,
    line_clear::ClearTick,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// A planned autoplay move that is being carried out column by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AutoplayExecution {
    spawn_id: u64,
    target_x: i32,
}

/// Runs a game: owns the state, the scheduler and the optional planner, and
/// dispatches timer ticks and player intents to the rules.
///
/// Time is virtual. A front end calls [`Self::advance`] with the wall-clock
/// time that passed (or jumps straight to [`Self::next_deadline`] when running
/// headless) and drains [`Self::take_events`] to learn what changed.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{GameConfig, GameSession, Intent};
///
/// let mut session = GameSession::new(GameConfig::default().with_seed(1), None);
/// session.press(Intent::HardDrop);
/// assert_eq!(session.stats().completed_pieces(), 1);
///
/// session.advance(Duration::from_secs(1));
/// assert!(session.session_state().is_playing());
/// ```
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    state: GameState,
    session_state: SessionState,
    scheduler: Scheduler,
    generator: PieceGenerator,
    planner: Option<Box<dyn MovePlanner>>,
    held: HeldIntents,
    execution: Option<AutoplayExecution>,
    events: Vec<GameEvent>,
    games_played: usize,
}

impl GameSession {
    /// Starts a game with a freshly spawned piece and running gravity.
    #[must_use]
    pub fn new(config: GameConfig, planner: Option<Box<dyn MovePlanner>>) -> Self {
        let generator = PieceGenerator::from_seed(config.seed);
        let state = GameState::new(config.clear_animation_steps);
        let mut this = Self {
            config,
            state,
            session_state: SessionState::Playing,
            scheduler: Scheduler::new(),
            generator,
            planner,
            held: HeldIntents::default(),
            execution: None,
            events: Vec::new(),
            games_played: 0,
        };
        this.start_game();
        this
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.state.falling_piece()
    }

    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.state.ghost_piece()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        self.state.stats()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_autoplay(&self) -> bool {
        self.state.is_autoplay()
    }

    #[must_use]
    pub fn clearing_rows(&self) -> &[usize] {
        self.state.line_clear().clearing_rows()
    }

    /// Returns the flash color of the clearing rows, if they are flashing.
    #[must_use]
    pub fn clear_flash(&self) -> Option<Color> {
        self.state.line_clear().flash().map(|(_, color)| color)
    }

    /// Number of games that have ended in this session.
    #[must_use]
    pub fn games_played(&self) -> usize {
        self.games_played
    }

    /// Returns whether the game over has been acknowledged and a reset is due.
    #[must_use]
    pub fn is_reset_pending(&self) -> bool {
        self.scheduler.is_active(TimerKind::GameOverReset)
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Returns the virtual time of the next timer, if any is running.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    #[must_use]
    pub fn active_timers(&self) -> Vec<TimerKind> {
        self.scheduler.active_timers()
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances virtual time by `elapsed`, firing every timer that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some(kind) = self.scheduler.pop_due(until) {
            self.fire(kind);
        }
        self.scheduler.advance_clock(until);
    }

    /// Jumps to the next deadline and fires what is due there.
    ///
    /// Returns `false` if no timer is running.
    pub fn advance_to_next_deadline(&mut self) -> bool {
        let Some(deadline) = self.scheduler.next_deadline() else {
            return false;
        };
        self.advance(deadline.saturating_sub(self.scheduler.now()));
        true
    }

    /// Applies a player intent.
    ///
    /// Everything is ignored after game over and while rows are clearing; only
    /// [`Intent::ToggleAutoplay`] is accepted while autoplay is on. Directional
    /// intents apply once on the first press and then repeat until released.
    pub fn press(&mut self, intent: Intent) {
        if self.session_state.is_game_over()
            || (self.state.is_autoplay() && !intent.is_toggle_autoplay())
            || self.state.is_clearing()
        {
            return;
        }

        match intent {
            Intent::ToggleAutoplay => self.toggle_autoplay(),
            Intent::HardDrop => self.hard_drop(),
            Intent::Rotate => {
                _ = self.state.try_rotate();
            }
            Intent::MoveLeft | Intent::MoveRight | Intent::SoftDrop => {
                if self.held.press(intent) {
                    self.apply_directional(intent);
                }
            }
        }
        self.events.push(GameEvent::Redraw);
    }

    /// Releases a held directional intent. Never gated.
    pub fn release(&mut self, intent: Intent) {
        self.held.release(intent);
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        if self.state.is_autoplay() != enabled {
            self.toggle_autoplay();
        }
    }

    pub fn toggle_autoplay(&mut self) {
        let enabled = !self.state.is_autoplay();
        self.state.set_autoplay(enabled);
        if enabled {
            self.held.clear();
            if self.session_state.is_playing() {
                self.scheduler.schedule_repeating(
                    TimerKind::AutoplayDecision,
                    self.config.autoplay_decision_period(),
                );
            }
        } else {
            self.cancel_execution();
            self.scheduler.cancel(TimerKind::AutoplayDecision);
        }
        self.events.push(GameEvent::AutoplayToggled { enabled });
    }

    /// Confirms the game-over notification; the next game starts after the
    /// configured delay.
    ///
    /// Returns `false` if the game is not over or a reset is already pending.
    pub fn acknowledge_game_over(&mut self) -> bool {
        if !self.session_state.is_game_over() || self.is_reset_pending() {
            return false;
        }
        self.scheduler
            .schedule_once(TimerKind::GameOverReset, self.config.game_over_reset_delay());
        true
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Gravity => self.on_gravity(),
            TimerKind::ClearAnimation => self.on_clear_animation(),
            TimerKind::AutoplayDecision => self.on_autoplay_decision(),
            TimerKind::AutoplayMove => self.on_autoplay_move(),
            TimerKind::InputRepeat => self.on_input_repeat(),
            TimerKind::GameOverReset => self.reset(),
        }
    }

    fn start_game(&mut self) {
        self.session_state = SessionState::Playing;
        self.spawn_next();
        if self.session_state.is_game_over() {
            return;
        }
        self.scheduler
            .schedule_repeating(TimerKind::Gravity, fall_interval(self.stats().level()));
        self.scheduler
            .schedule_repeating(TimerKind::InputRepeat, self.config.input_repeat_period());
        if self.state.is_autoplay() {
            self.scheduler.schedule_repeating(
                TimerKind::AutoplayDecision,
                self.config.autoplay_decision_period(),
            );
        }
        self.events.push(GameEvent::Redraw);
    }

    fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.cancel_execution();
        self.held.clear();
        let autoplay = self.state.is_autoplay();
        self.state = GameState::new(self.config.clear_animation_steps);
        self.state.set_autoplay(autoplay);
        self.events.push(GameEvent::GameReset);
        self.start_game();
    }

    fn spawn_next(&mut self) {
        let piece = self.generator.spawn();
        if self.state.spawn(piece).is_err() {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.scheduler.cancel_all();
        self.cancel_execution();
        self.held.clear();
        self.session_state = SessionState::GameOver;
        self.games_played += 1;
        self.events.push(GameEvent::GameOver {
            score: self.stats().score(),
        });
    }

    fn on_gravity(&mut self) {
        if self.state.is_clearing() || self.state.falling_piece().is_none() {
            return;
        }
        if self.state.try_move(0, 1).is_err() {
            self.lock_and_continue();
        }
        self.events.push(GameEvent::Redraw);
    }

    fn hard_drop(&mut self) {
        if self.state.is_clearing() || self.state.falling_piece().is_none() {
            return;
        }
        self.state.drop_to_floor();
        self.lock_and_continue();
    }

    /// Merges the falling piece, then either starts the clear animation or
    /// spawns the next piece right away.
    fn lock_and_continue(&mut self) {
        let count = self.state.lock_piece();
        if count == 0 {
            self.spawn_next();
            return;
        }
        self.events.push(GameEvent::LinesClearing { count });
        self.scheduler.schedule_repeating(
            TimerKind::ClearAnimation,
            self.config.clear_animation_period(),
        );
    }

    fn on_clear_animation(&mut self) {
        match self.state.tick_line_clear() {
            ClearTick::Flash { step, color } => {
                self.events.push(GameEvent::ClearFlash { step, color });
            }
            ClearTick::Finished { rows } => {
                self.scheduler.cancel(TimerKind::ClearAnimation);
                let outcome = self.state.complete_line_clear(&rows);
                self.events.push(GameEvent::LinesCleared {
                    count: outcome.lines,
                    points: outcome.points,
                });
                if outcome.level_changed() {
                    self.events.push(GameEvent::LevelChanged {
                        level: outcome.level,
                    });
                    if self.config.gravity_follows_level {
                        self.scheduler
                            .schedule_repeating(TimerKind::Gravity, fall_interval(outcome.level));
                    }
                }
                self.spawn_next();
            }
        }
        self.events.push(GameEvent::Redraw);
    }

    fn on_input_repeat(&mut self) {
        if self.state.is_clearing() {
            return;
        }
        let held = self.held;
        let mut moved = false;
        for intent in held.iter() {
            self.apply_directional(intent);
            moved = true;
        }
        if moved {
            self.events.push(GameEvent::Redraw);
        }
    }

    fn apply_directional(&mut self, intent: Intent) {
        let (dx, dy) = match intent {
            Intent::MoveLeft => (-1, 0),
            Intent::MoveRight => (1, 0),
            Intent::SoftDrop => (0, 1),
            _ => return,
        };
        _ = self.state.try_move(dx, dy);
    }

    fn on_autoplay_decision(&mut self) {
        if !self.state.is_autoplay() || self.state.is_clearing() || self.execution.is_some() {
            return;
        }
        let Some(piece) = self.state.falling_piece().copied() else {
            return;
        };
        let Some(planner) = &self.planner else {
            return;
        };
        let Some(plan) = planner.plan_move(self.state.board(), &piece) else {
            return;
        };

        for _ in 0..plan.rotations {
            _ = self.state.try_rotate();
        }
        self.execution = Some(AutoplayExecution {
            spawn_id: self.state.spawn_count(),
            target_x: piece.x() + plan.translation,
        });
        self.scheduler
            .schedule_repeating(TimerKind::AutoplayMove, self.config.autoplay_move_period());
        self.events.push(GameEvent::Redraw);
    }

    fn on_autoplay_move(&mut self) {
        let Some(execution) = self.execution else {
            self.scheduler.cancel(TimerKind::AutoplayMove);
            return;
        };
        let current = self
            .state
            .falling_piece()
            .filter(|_| self.state.spawn_count() == execution.spawn_id)
            .copied();
        let Some(piece) = current.filter(|_| !self.state.is_clearing()) else {
            self.cancel_execution();
            return;
        };

        let stepped = if piece.x() < execution.target_x {
            self.state.try_move(1, 0).is_ok()
        } else if piece.x() > execution.target_x {
            self.state.try_move(-1, 0).is_ok()
        } else {
            false
        };
        if !stepped {
            self.cancel_execution();
            self.hard_drop();
        }
        self.events.push(GameEvent::Redraw);
    }

    fn cancel_execution(&mut self) {
        self.execution = None;
        self.scheduler.cancel(TimerKind::AutoplayMove);
    }
}
