//! tpomo - Terminal Pomodoro
//!
//! A terminal pomodoro timer that alternates work and rest sessions, shows
//! the remaining time on a radial dial, and sounds an alarm whenever a
//! session ends.

use std::{
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tpomo::application::App;
use tpomo::domain::AlarmTone;
use tpomo::infrastructure::{AlarmPlayer, CommandPlayer, Overrides, Settings, SilentPlayer, TerminalBell};
use tpomo::presentation::{render_ui, InputHandler, TerminalGuard};

/// Longest the loop waits for input before redrawing while stopped.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(author, version, about = "A terminal pomodoro timer")]
struct Args {
    /// JSON settings file
    #[arg(short, long, env = "TPOMO_CONFIG")]
    config: Option<PathBuf>,

    /// Work session length in minutes (1-100)
    #[arg(short, long)]
    work: Option<u32>,

    /// Rest session length in minutes (1-100)
    #[arg(short, long)]
    rest: Option<u32>,

    /// Alarm tone: rooster, foghorn, japanese-bell or woop-woop
    #[arg(short, long)]
    alarm: Option<AlarmTone>,

    /// Never play alarms
    #[arg(long)]
    mute: bool,

    /// Log file (defaults to tpomo.log in the temp directory)
    #[arg(long, env = "TPOMO_LOG")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: &Path) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %log_file.display(), "logging initialized");
        }
        // Writing logs to stdout or stderr would corrupt the TUI.
        Err(_) => tracing_subscriber::registry().with(env_filter).init(),
    }
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            work_minutes: self.work,
            rest_minutes: self.rest,
            alarm: self.alarm,
            mute: self.mute,
        }
    }
}

fn build_player(settings: &Settings) -> Box<dyn AlarmPlayer> {
    if settings.mute {
        return Box::new(SilentPlayer);
    }
    Box::new(CommandPlayer::new(
        settings.player.program.clone(),
        settings.player.tones.clone(),
        TerminalBell::stdout(),
    ))
}

/// Entry point for the tpomo terminal pomodoro timer.
///
/// Reads settings, sets up the terminal, and runs the main event loop until
/// the user quits. The terminal is restored before any error is reported,
/// including when setup fails halfway or the loop panics.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("tpomo.log"));
    init_tracing(&log_file);

    let settings = Settings::resolve(args.config.as_deref(), &args.overrides())?;
    let config = settings.session_config().context("invalid session length")?;
    tracing::info!(?config, alarm = %settings.alarm, mute = settings.mute, "starting");

    let mut app = App::new(config, settings.alarm, build_player(&settings));

    let guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);
    drop(guard);

    if let Err(ref err) = res {
        tracing::error!(error = %err, "event loop failed");
    }
    res.context("terminal error")
}

/// Main application event loop.
///
/// Waits for input no longer than the time left until the next tick, then
/// feeds the measured elapsed time to the timer.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last = Instant::now();
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = app.until_next_tick().unwrap_or(IDLE_POLL);
        let input = if event::poll(timeout)? {
            Some(event::read()?)
        } else {
            None
        };

        // Count time up to this instant before a key can pause the timer.
        let now = Instant::now();
        app.advance(now.duration_since(last));
        last = now;

        if let Some(Event::Key(key)) = input {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
