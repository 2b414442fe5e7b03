//! Virtual-time scheduler for the session's periodic drivers.
//!
//! Each concern that the game drives on a timer has a [`TimerKind`]. There is
//! at most one scheduled task per kind: scheduling a kind again replaces the
//! previous task, which is how a stale driver gets cancelled before a new one
//! is installed.
//!
//! Time only moves when the owner asks for it. [`Scheduler::pop_due`] hands out
//! one due task at a time, earliest first, so a handler that cancels other
//! timers prevents them from firing in the same advance.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{Scheduler, TimerKind};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule_repeating(TimerKind::Gravity, Duration::from_millis(100));
//!
//! let until = Duration::from_millis(250);
//! let mut fired = 0;
//! while let Some(kind) = scheduler.pop_due(until) {
//!     assert_eq!(kind, TimerKind::Gravity);
//!     fired += 1;
//! }
//! scheduler.advance_clock(until);
//! assert_eq!(fired, 2);
//! assert_eq!(scheduler.next_deadline(), Some(Duration::from_millis(300)));
//! ```

use std::time::Duration;

/// The timed drivers of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TimerKind {
    /// Moves the active piece down one row.
    Gravity = 0,
    /// Advances the line-clear flash animation.
    ClearAnimation = 1,
    /// Asks the autoplay planner for the next move.
    AutoplayDecision = 2,
    /// Executes a planned move one column at a time.
    AutoplayMove = 3,
    /// Re-issues held directional inputs.
    InputRepeat = 4,
    /// Starts a new game after game over.
    GameOverReset = 5,
}

impl TimerKind {
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        TimerKind::Gravity,
        TimerKind::ClearAnimation,
        TimerKind::AutoplayDecision,
        TimerKind::AutoplayMove,
        TimerKind::InputRepeat,
        TimerKind::GameOverReset,
    ];
}

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTask {
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    tasks: [Option<ScheduledTask>; TimerKind::LEN],
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Installs a periodic task, replacing any existing task of that kind.
    ///
    /// The first firing happens one period from now.
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) {
        let period = period.max(MIN_PERIOD);
        self.tasks[kind as usize] = Some(ScheduledTask {
            due: self.now + period,
            period: Some(period),
        });
    }

    /// Installs a one-shot task, replacing any existing task of that kind.
    pub fn schedule_once(&mut self, kind: TimerKind, delay: Duration) {
        self.tasks[kind as usize] = Some(ScheduledTask {
            due: self.now + delay,
            period: None,
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.tasks[kind as usize] = None;
    }

    pub fn cancel_all(&mut self) {
        self.tasks = [None; TimerKind::LEN];
    }

    #[must_use]
    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.tasks[kind as usize].is_some()
    }

    #[must_use]
    pub fn active_timers(&self) -> Vec<TimerKind> {
        TimerKind::ALL
            .into_iter()
            .filter(|kind| self.is_active(*kind))
            .collect()
    }

    /// Returns the period of a repeating task.
    #[must_use]
    pub fn period(&self, kind: TimerKind) -> Option<Duration> {
        self.tasks[kind as usize].and_then(|task| task.period)
    }

    /// Returns the virtual time at which the next task is due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.iter().flatten().map(|task| task.due).min()
    }

    /// Pops the earliest task due at or before `until`.
    ///
    /// The clock moves to the task's due time. Repeating tasks are re-armed one
    /// period later; one-shot tasks are removed. Ties fire in [`TimerKind`]
    /// order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
        let (index, task) = self
            .tasks
            .iter()
            .enumerate()
            .filter_map(|(i, task)| task.map(|task| (i, task)))
            .filter(|(_, task)| task.due <= until)
            .min_by_key(|(i, task)| (task.due, *i))?;

        self.now = self.now.max(task.due);
        self.tasks[index] = task.period.map(|period| ScheduledTask {
            due: task.due + period,
            period: Some(period),
        });
        Some(TimerKind::ALL[index])
    }

    /// Moves the clock forward to `until` without firing anything.
    pub fn advance_clock(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(scheduler: &mut Scheduler, until: Duration) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        while let Some(kind) = scheduler.pop_due(until) {
            fired.push(kind);
        }
        scheduler.advance_clock(until);
        fired
    }

    #[test]
    fn test_tasks_fire_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(TimerKind::Gravity, ms(300));
        scheduler.schedule_repeating(TimerKind::ClearAnimation, ms(100));
        scheduler.schedule_once(TimerKind::GameOverReset, ms(250));

        let fired = drain(&mut scheduler, ms(600));
        use TimerKind::*;
        assert_eq!(
            fired,
            vec![
                ClearAnimation, // 100
                ClearAnimation, // 200
                GameOverReset,  // 250
                Gravity,        // 300
                ClearAnimation, // 300
                ClearAnimation, // 400
                ClearAnimation, // 500
                Gravity,        // 600
                ClearAnimation, // 600
            ]
        );
        assert!(!scheduler.is_active(GameOverReset));
        assert_eq!(scheduler.now(), ms(600));
    }

    #[test]
    fn test_rescheduling_replaces_previous_task() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(TimerKind::Gravity, ms(100));
        scheduler.schedule_repeating(TimerKind::Gravity, ms(400));
        assert_eq!(scheduler.period(TimerKind::Gravity), Some(ms(400)));
        assert_eq!(drain(&mut scheduler, ms(399)), vec![]);
        assert_eq!(drain(&mut scheduler, ms(400)), vec![TimerKind::Gravity]);
    }

    #[test]
    fn test_cancel_during_drain_stops_pending_tasks() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(TimerKind::Gravity, ms(100));
        scheduler.schedule_repeating(TimerKind::AutoplayDecision, ms(100));

        let first = scheduler.pop_due(ms(1000));
        assert_eq!(first, Some(TimerKind::Gravity));
        scheduler.cancel_all();
        assert_eq!(scheduler.pop_due(ms(1000)), None);
        assert!(scheduler.active_timers().is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn test_next_deadline_tracks_earliest_task() {
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.next_deadline(), None);
        scheduler.schedule_repeating(TimerKind::InputRepeat, ms(100));
        scheduler.schedule_once(TimerKind::GameOverReset, ms(30));
        assert_eq!(scheduler.next_deadline(), Some(ms(30)));
        scheduler.cancel(TimerKind::GameOverReset);
        assert_eq!(scheduler.next_deadline(), Some(ms(100)));
    }

    #[test]
    fn test_zero_period_does_not_spin() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(TimerKind::AutoplayMove, Duration::ZERO);
        assert_eq!(drain(&mut scheduler, ms(3)).len(), 3);
    }
}
