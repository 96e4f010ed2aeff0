//! Terminal setup and restoration.

use std::io::{self, Write};
use std::panic;

use crossterm::{
    cursor::Show,
    execute, queue,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Writes the escape sequences that leave the alternate screen and show the
/// cursor again.
pub fn write_restore_sequence<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, LeaveAlternateScreen, Show)?;
    out.flush()
}

/// Puts the terminal back into normal mode. Errors are ignored so this can
/// run from `Drop` and from a panic hook.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = write_restore_sequence(&mut io::stdout());
}

/// Raw mode and the alternate screen for as long as the guard lives.
///
/// The guard exists as soon as raw mode is on, so a failure entering the
/// alternate screen still restores the terminal.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        let guard = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Restores the terminal before the default panic message is printed.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}
