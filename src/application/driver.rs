//! Presentation driver.
//!
//! Keeps the view-facing state (time label, progress indicator, spinner) in
//! step with the session model and sounds the alarm when a session ends.

use crate::domain::{format_clock, AlarmTone, Mode, TimerState};
use crate::infrastructure::AlarmPlayer;

/// Whether the spinner animation is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Playing,
    Paused,
}

/// State of the radial progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    /// Mode whose colour the indicator is drawn in.
    pub mode: Mode,
    pub animation: Animation,
    /// Spinner frame, advanced once per tick while playing.
    pub frame: u8,
    /// Number of sweeps started so far, one per session.
    pub sweeps: u32,
}

pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

impl Indicator {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            animation: Animation::Paused,
            frame: 0,
            sweeps: 1,
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[usize::from(self.frame) % SPINNER_FRAMES.len()]
    }
}

pub struct PresentationDriver {
    label: String,
    indicator: Indicator,
    alarm: AlarmTone,
    alarms_played: u32,
    last_alarm_error: Option<String>,
    player: Box<dyn AlarmPlayer>,
}

impl std::fmt::Debug for PresentationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationDriver")
            .field("label", &self.label)
            .field("indicator", &self.indicator)
            .field("alarm", &self.alarm)
            .field("alarms_played", &self.alarms_played)
            .finish_non_exhaustive()
    }
}

impl PresentationDriver {
    pub fn new(state: &TimerState, alarm: AlarmTone, player: Box<dyn AlarmPlayer>) -> Self {
        Self {
            label: format_clock(state.remaining_seconds),
            indicator: Indicator::new(state.mode),
            alarm,
            alarms_played: 0,
            last_alarm_error: None,
            player,
        }
    }

    /// The `mm:ss` text currently on display.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn alarm(&self) -> AlarmTone {
        self.alarm
    }

    pub fn alarms_played(&self) -> u32 {
        self.alarms_played
    }

    /// Takes the message of the most recent failed playback, if any.
    pub fn take_alarm_error(&mut self) -> Option<String> {
        self.last_alarm_error.take()
    }

    /// Re-renders the time label from `state`.
    pub fn render(&mut self, state: &TimerState) {
        self.label = format_clock(state.remaining_seconds);
    }

    /// Called after every counted tick.
    pub fn on_tick(&mut self, state: &TimerState) {
        if self.indicator.animation == Animation::Playing {
            self.indicator.frame = self.indicator.frame.wrapping_add(1);
        }
        self.render(state);
    }

    /// Called when a session ended and `state` holds the new one.
    ///
    /// Switches the indicator to the new mode. The alarm is left to the
    /// caller so a burst of boundaries can share one playback.
    pub fn on_boundary(&mut self, state: &TimerState) {
        self.indicator.mode = state.mode;
        self.indicator.frame = 0;
        self.indicator.sweeps += 1;
        self.render(state);
        tracing::info!(mode = %state.mode, remaining = state.remaining_seconds, "session boundary crossed");
    }

    /// Starts or freezes the spinner to match the running flag.
    pub fn set_playing(&mut self, running: bool) {
        self.indicator.animation = if running {
            Animation::Playing
        } else {
            Animation::Paused
        };
    }

    pub fn select_alarm(&mut self, tone: AlarmTone) {
        self.alarm = tone;
    }

    /// Plays the selected tone without touching the timer.
    pub fn preview(&mut self) {
        self.play_alarm();
    }

    pub fn play_alarm(&mut self) {
        self.alarms_played += 1;
        if let Err(err) = self.player.play(self.alarm) {
            tracing::warn!(tone = %self.alarm, error = %err, "alarm playback failed");
            self.last_alarm_error = Some(err.to_string());
        }
    }
}
