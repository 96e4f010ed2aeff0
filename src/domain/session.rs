//! Pomodoro session model.
//!
//! Owns the configured durations and the live countdown, and implements the
//! rules for counting down, switching between work and rest, and adjusting
//! durations.

use super::models::{Mode, SessionConfig, TimerState, MAX_MINUTES, MIN_MINUTES};

/// Result of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is paused; nothing changed.
    Idle,
    /// One second was counted off the current session.
    Counted,
    /// The countdown reached zero and the session switched to `mode`.
    BoundaryCrossed { mode: Mode },
}

/// Countdown state together with the durations it is measured against.
///
/// # Examples
///
/// ```
/// use tpomo::domain::{Mode, SessionConfig, SessionModel, TickOutcome};
///
/// let mut session = SessionModel::new(SessionConfig::new(1, 1).unwrap());
/// session.start();
/// for _ in 0..59 {
///     assert_eq!(session.tick(), TickOutcome::Counted);
/// }
/// assert_eq!(session.tick(), TickOutcome::BoundaryCrossed { mode: Mode::Rest });
/// assert_eq!(session.state().remaining_seconds, 60);
/// ```
#[derive(Debug, Clone)]
pub struct SessionModel {
    config: SessionConfig,
    state: TimerState,
}

impl Default for SessionModel {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SessionModel {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: TimerState::initial(&config),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Length of the current session in seconds.
    pub fn current_duration(&self) -> u32 {
        self.config.seconds(self.state.mode)
    }

    /// Fraction of the current session already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let total = self.current_duration();
        if total == 0 {
            return 0.0;
        }
        f64::from(total - self.state.remaining_seconds) / f64::from(total)
    }

    /// Starts counting. Returns `false` if the timer was already running.
    pub fn start(&mut self) -> bool {
        let changed = !self.state.running;
        self.state.running = true;
        changed
    }

    /// Stops counting. The remaining time is kept as is.
    pub fn pause(&mut self) -> bool {
        let changed = self.state.running;
        self.state.running = false;
        changed
    }

    /// Flips between running and paused, returning the new running flag.
    pub fn toggle(&mut self) -> bool {
        if self.state.running {
            self.pause();
        } else {
            self.start();
        }
        self.state.running
    }

    /// Counts off one second.
    ///
    /// When the countdown reaches zero the mode flips and the countdown is
    /// reloaded with the new mode's full duration.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Idle;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds > 0 {
            return TickOutcome::Counted;
        }

        let mode = self.state.mode.toggled();
        self.state.mode = mode;
        self.state.remaining_seconds = self.config.seconds(mode);
        TickOutcome::BoundaryCrossed { mode }
    }

    /// Changes the configured minutes of `mode` by `delta`.
    ///
    /// Ignored while running. The result is clamped to
    /// [`MIN_MINUTES`, `MAX_MINUTES`], so stepping past either end does
    /// nothing. Returns whether the configuration changed.
    pub fn adjust_duration(&mut self, mode: Mode, delta: i32) -> bool {
        let current = i64::from(self.config.minutes(mode));
        let target = (current + i64::from(delta)).clamp(i64::from(MIN_MINUTES), i64::from(MAX_MINUTES));
        // target lies in [MIN_MINUTES, MAX_MINUTES], so the cast is lossless
        self.set_duration(mode, target as u32)
    }

    /// Sets the configured minutes of `mode`.
    ///
    /// Ignored while running or when `minutes` is out of range. If `mode` is
    /// the current mode, the countdown restarts from the new duration.
    pub fn set_duration(&mut self, mode: Mode, minutes: u32) -> bool {
        if self.state.running || !self.config.set_minutes(mode, minutes) {
            return false;
        }
        if self.state.mode == mode {
            self.state.remaining_seconds = self.config.seconds(mode);
        }
        true
    }
}
