use crate::application::{App, Command, Focus};
use crate::domain::AlarmTone;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    /// Translates a key press into a command for the current focus.
    ///
    /// Returns `None` for keys with no binding. Quitting is left to the
    /// main loop.
    pub fn command_for_key(app: &App, key: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        let command = match key {
            KeyCode::Char(' ') | KeyCode::Enter => Command::ToggleTimer,
            KeyCode::Tab => Command::FocusNext,
            KeyCode::BackTab => Command::FocusPrevious,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Self::step(app.focus, 1),
            KeyCode::Char('-') | KeyCode::Down => Self::step(app.focus, -1),
            KeyCode::Right => Command::NextAlarm,
            KeyCode::Left => Command::PreviousAlarm,
            KeyCode::Char('p') if !modifiers.contains(KeyModifiers::CONTROL) => Command::PreviewAlarm,
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                Command::SelectAlarm(AlarmTone::ALL[index])
            }
            _ => return None,
        };
        Some(command)
    }

    fn step(focus: Focus, delta: i32) -> Command {
        match focus.mode() {
            Some(mode) => Command::AdjustDuration { mode, delta },
            None if delta > 0 => Command::NextAlarm,
            None => Command::PreviousAlarm,
        }
    }

    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if let Some(command) = Self::command_for_key(app, key, modifiers) {
            app.dispatch(command);
        }
    }
}
