use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing and behavior knobs of a [`GameSession`](crate::GameSession).
///
/// All periods are stored in milliseconds so the structure reads naturally as
/// JSON. Missing fields fall back to their defaults.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!(config.clear_animation_period(), Duration::from_millis(100));
/// assert_eq!(config.clear_animation_steps, 10);
/// assert!(config.gravity_follows_level);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub clear_animation_period_ms: u64,
    pub clear_animation_steps: usize,
    pub autoplay_decision_period_ms: u64,
    pub autoplay_move_period_ms: u64,
    pub input_repeat_period_ms: u64,
    pub game_over_reset_delay_ms: u64,
    /// Rebuild the gravity timer whenever the level changes.
    ///
    /// When disabled, gravity keeps the level-1 period for the whole game.
    pub gravity_follows_level: bool,
    /// Seed for the piece generator. A fresh OS seed is used when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            clear_animation_period_ms: 100,
            clear_animation_steps: 10,
            autoplay_decision_period_ms: 500,
            autoplay_move_period_ms: 50,
            input_repeat_period_ms: 100,
            game_over_reset_delay_ms: 100,
            gravity_follows_level: true,
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn clear_animation_period(&self) -> Duration {
        Duration::from_millis(self.clear_animation_period_ms)
    }

    #[must_use]
    pub fn autoplay_decision_period(&self) -> Duration {
        Duration::from_millis(self.autoplay_decision_period_ms)
    }

    #[must_use]
    pub fn autoplay_move_period(&self) -> Duration {
        Duration::from_millis(self.autoplay_move_period_ms)
    }

    #[must_use]
    pub fn input_repeat_period(&self) -> Duration {
        Duration::from_millis(self.input_repeat_period_ms)
    }

    #[must_use]
    pub fn game_over_reset_delay(&self) -> Duration {
        Duration::from_millis(self.game_over_reset_delay_ms)
    }
}
