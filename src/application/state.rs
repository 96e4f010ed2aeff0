//! Application state management for the pomodoro timer.
//!
//! The [`App`] owns the session model, the tick clock and the presentation
//! driver, and is the single place commands from the UI are applied.

use std::time::Duration;

use crate::domain::{AlarmTone, Mode, SessionConfig, SessionModel, TickOutcome, Ticker};
use crate::infrastructure::AlarmPlayer;

use super::commands::{Command, Focus};
use super::driver::PresentationDriver;

/// Main application state.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tpomo::application::{App, Command};
/// use tpomo::domain::{AlarmTone, SessionConfig};
/// use tpomo::infrastructure::SilentPlayer;
///
/// let mut app = App::new(SessionConfig::default(), AlarmTone::Rooster, Box::new(SilentPlayer));
/// app.dispatch(Command::ToggleTimer);
/// app.advance(Duration::from_secs(3));
/// assert_eq!(app.driver.label(), "24:57");
/// ```
#[derive(Debug)]
pub struct App {
    pub session: SessionModel,
    pub ticker: Ticker,
    pub driver: PresentationDriver,
    /// Control the steppers currently act on
    pub focus: Focus,
    /// Temporary status message to display
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: SessionConfig, alarm: AlarmTone, player: Box<dyn AlarmPlayer>) -> Self {
        let session = SessionModel::new(config);
        let driver = PresentationDriver::new(session.state(), alarm, player);
        Self {
            session,
            ticker: Ticker::default(),
            driver,
            focus: Focus::default(),
            status_message: None,
        }
    }

    /// Applies a user command.
    pub fn dispatch(&mut self, command: Command) {
        tracing::debug!(?command, "dispatch");
        self.status_message = None;
        match command {
            Command::ToggleTimer => self.toggle_timer(),
            Command::AdjustDuration { mode, delta } => {
                let changed = self.session.adjust_duration(mode, delta);
                self.after_adjustment(mode, changed);
            }
            Command::SetDuration { mode, minutes } => {
                let changed = self.session.set_duration(mode, minutes);
                self.after_adjustment(mode, changed);
            }
            Command::SelectAlarm(tone) => self.driver.select_alarm(tone),
            Command::NextAlarm => self.driver.select_alarm(self.driver.alarm().next()),
            Command::PreviousAlarm => self.driver.select_alarm(self.driver.alarm().previous()),
            Command::PreviewAlarm => {
                self.driver.preview();
                self.collect_alarm_error();
            }
            Command::FocusNext => self.focus = self.focus.next(),
            Command::FocusPrevious => self.focus = self.focus.previous(),
        }
    }

    /// Feeds measured wall-clock time to the timer. Returns the number of
    /// ticks that fired.
    ///
    /// Ticks missed during a stall are replayed in one go; however many
    /// sessions they end, the alarm sounds once.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.ticker.advance(elapsed);
        let mut boundaries = 0;
        for _ in 0..ticks {
            if self.tick() {
                boundaries += 1;
            }
        }
        if boundaries > 0 {
            if boundaries > 1 {
                tracing::warn!(boundaries, ticks, "several sessions ended in one step");
            }
            self.driver.play_alarm();
            self.collect_alarm_error();
        }
        ticks
    }

    /// Time until the next tick is due, or `None` while stopped.
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.ticker.until_next()
    }

    /// Runs one model tick. Returns whether a session ended.
    fn tick(&mut self) -> bool {
        match self.session.tick() {
            TickOutcome::Idle => false,
            TickOutcome::Counted => {
                self.driver.on_tick(self.session.state());
                false
            }
            TickOutcome::BoundaryCrossed { .. } => {
                self.driver.on_boundary(self.session.state());
                true
            }
        }
    }

    fn toggle_timer(&mut self) {
        let running = self.session.toggle();
        if running {
            self.ticker.resume();
        } else {
            self.ticker.pause();
        }
        self.driver.set_playing(running);

        let state = self.session.state();
        tracing::info!(
            running,
            mode = %state.mode,
            remaining = state.remaining_seconds,
            carried_ms = self.ticker.carried().as_millis() as u64,
            "timer toggled"
        );
    }

    fn after_adjustment(&mut self, mode: Mode, changed: bool) {
        if !changed {
            return;
        }
        tracing::debug!(%mode, minutes = self.session.config().minutes(mode), "duration adjusted");
        self.driver.render(self.session.state());
    }

    fn collect_alarm_error(&mut self) {
        if let Some(error) = self.driver.take_alarm_error() {
            self.status_message = Some(format!("Alarm failed: {}", error));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Animation;
    use crate::domain::MAX_MINUTES;
    use crate::infrastructure::SilentPlayer;

    fn app(work: u32, rest: u32) -> App {
        App::new(
            SessionConfig::new(work, rest).unwrap(),
            AlarmTone::Rooster,
            Box::new(SilentPlayer),
        )
    }

    fn secs(value: u64) -> Duration {
        Duration::from_secs(value)
    }

    #[test]
    fn test_app_default_state() {
        let app = app(25, 5);
        assert_eq!(app.driver.label(), "25:00");
        assert_eq!(app.focus, Focus::Work);
        assert!(!app.session.is_running());
        assert!(app.status_message.is_none());
        assert_eq!(app.until_next_tick(), None);
    }

    #[test]
    fn test_stopped_app_ignores_time() {
        let mut app = app(25, 5);
        assert_eq!(app.advance(secs(10)), 0);
        assert_eq!(app.session.state().remaining_seconds, 1500);
    }

    #[test]
    fn test_toggle_starts_and_stops_spinner() {
        let mut app = app(25, 5);
        app.dispatch(Command::ToggleTimer);
        assert!(app.session.is_running());
        assert_eq!(app.driver.indicator().animation, Animation::Playing);
        assert_eq!(app.until_next_tick(), Some(secs(1)));

        app.dispatch(Command::ToggleTimer);
        assert!(!app.session.is_running());
        assert_eq!(app.driver.indicator().animation, Animation::Paused);
    }

    #[test]
    fn test_work_session_rolls_into_rest() {
        let mut app = app(25, 5);
        app.dispatch(Command::ToggleTimer);
        assert_eq!(app.advance(secs(1500)), 1500);
        assert_eq!(app.session.state().mode, Mode::Rest);
        assert_eq!(app.session.state().remaining_seconds, 300);
        assert_eq!(app.driver.indicator().mode, Mode::Rest);
        assert_eq!(app.driver.label(), "05:00");
        assert_eq!(app.driver.alarms_played(), 1);
    }

    #[test]
    fn test_last_second_plays_one_alarm() {
        let mut app = app(1, 1);
        app.dispatch(Command::ToggleTimer);
        app.advance(secs(59));
        assert_eq!(app.session.state().remaining_seconds, 1);
        assert_eq!(app.driver.alarms_played(), 0);
        app.advance(secs(1));
        assert_eq!(app.driver.alarms_played(), 1);
        app.advance(secs(59));
        assert_eq!(app.driver.alarms_played(), 1);
    }

    #[test]
    fn test_stall_replays_ticks_with_one_alarm() {
        let mut app = app(1, 1);
        app.dispatch(Command::ToggleTimer);
        assert_eq!(app.advance(secs(150)), 150);
        assert_eq!(app.session.state().mode, Mode::Work);
        assert_eq!(app.session.state().remaining_seconds, 30);
        assert_eq!(app.driver.indicator().sweeps, 3);
        assert_eq!(app.driver.alarms_played(), 1);

        app.advance(secs(30));
        assert_eq!(app.driver.alarms_played(), 2);
    }

    #[test]
    fn test_any_command_clears_status_message() {
        let mut app = app(25, 5);
        app.status_message = Some("Alarm failed: no terminal".to_string());
        app.dispatch(Command::FocusNext);
        assert!(app.status_message.is_none());

        app.status_message = Some("Alarm failed: no terminal".to_string());
        app.dispatch(Command::AdjustDuration { mode: Mode::Work, delta: 1 });
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_adjust_while_running_has_no_effect() {
        let mut app = app(25, 5);
        app.dispatch(Command::ToggleTimer);
        app.advance(secs(5));
        app.dispatch(Command::AdjustDuration { mode: Mode::Work, delta: 1 });
        app.dispatch(Command::AdjustDuration { mode: Mode::Rest, delta: -1 });
        assert_eq!(app.session.config().minutes(Mode::Work), 25);
        assert_eq!(app.session.config().minutes(Mode::Rest), 5);
        assert_eq!(app.driver.label(), "24:55");
    }

    #[test]
    fn test_adjust_while_paused_updates_label() {
        let mut app = app(25, 5);
        app.dispatch(Command::AdjustDuration { mode: Mode::Work, delta: -1 });
        assert_eq!(app.driver.label(), "24:00");
        app.dispatch(Command::SetDuration { mode: Mode::Work, minutes: MAX_MINUTES });
        assert_eq!(app.driver.label(), "100:00");
        app.dispatch(Command::AdjustDuration { mode: Mode::Rest, delta: 1 });
        assert_eq!(app.driver.label(), "100:00");
        assert_eq!(app.session.config().minutes(Mode::Rest), 6);
    }

    #[test]
    fn test_pause_resume_keeps_subsecond_remainder() {
        let mut app = app(25, 5);
        app.dispatch(Command::ToggleTimer);
        app.advance(Duration::from_millis(1600));
        app.dispatch(Command::ToggleTimer);
        let paused_at = app.session.state().remaining_seconds;
        app.advance(secs(30));
        app.dispatch(Command::ToggleTimer);
        assert_eq!(app.session.state().remaining_seconds, paused_at);
        assert_eq!(app.until_next_tick(), Some(Duration::from_millis(400)));
        assert_eq!(app.advance(Duration::from_millis(400)), 1);
        assert_eq!(app.session.state().remaining_seconds, 1498);
    }

    #[test]
    fn test_alarm_selection_and_preview() {
        let mut app = app(25, 5);
        app.dispatch(Command::NextAlarm);
        assert_eq!(app.driver.alarm(), AlarmTone::Foghorn);
        app.dispatch(Command::PreviousAlarm);
        app.dispatch(Command::PreviousAlarm);
        assert_eq!(app.driver.alarm(), AlarmTone::WoopWoop);
        app.dispatch(Command::SelectAlarm(AlarmTone::JapaneseBell));
        assert_eq!(app.driver.alarm(), AlarmTone::JapaneseBell);

        app.dispatch(Command::PreviewAlarm);
        assert_eq!(app.driver.alarms_played(), 1);
        assert!(!app.session.is_running());
        assert_eq!(app.session.state().remaining_seconds, 1500);
    }

    #[test]
    fn test_focus_commands() {
        let mut app = app(25, 5);
        app.dispatch(Command::FocusNext);
        assert_eq!(app.focus, Focus::Rest);
        app.dispatch(Command::FocusPrevious);
        app.dispatch(Command::FocusPrevious);
        assert_eq!(app.focus, Focus::Alarm);
    }
}
