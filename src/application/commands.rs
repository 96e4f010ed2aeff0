use crate::domain::{AlarmTone, Mode};

/// User actions the host UI can ask the application to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the timer if stopped, stop it if running.
    ToggleTimer,
    /// Step a mode's duration by `delta` minutes.
    AdjustDuration { mode: Mode, delta: i32 },
    SetDuration { mode: Mode, minutes: u32 },
    SelectAlarm(AlarmTone),
    NextAlarm,
    PreviousAlarm,
    PreviewAlarm,
    FocusNext,
    FocusPrevious,
}

/// Control that the steppers currently act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Work,
    Rest,
    Alarm,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Work => Focus::Rest,
            Focus::Rest => Focus::Alarm,
            Focus::Alarm => Focus::Work,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Work => Focus::Alarm,
            Focus::Rest => Focus::Work,
            Focus::Alarm => Focus::Rest,
        }
    }

    /// The mode whose duration this control edits, if any.
    pub fn mode(self) -> Option<Mode> {
        match self {
            Focus::Work => Some(Mode::Work),
            Focus::Rest => Some(Mode::Rest),
            Focus::Alarm => None,
        }
    }
}
