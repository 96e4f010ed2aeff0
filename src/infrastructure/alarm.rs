//! Alarm playback back-ends.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use thiserror::Error;

use crate::domain::AlarmTone;

#[derive(Debug, Error)]
pub enum AlarmError {
    #[error("failed to ring terminal bell: {0}")]
    Bell(#[from] io::Error),
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Something that can sound an alarm tone.
pub trait AlarmPlayer {
    fn play(&mut self, tone: AlarmTone) -> Result<(), AlarmError>;
}

/// Number of bell characters rung for each tone.
pub fn bell_count(tone: AlarmTone) -> usize {
    match tone {
        AlarmTone::Rooster => 3,
        AlarmTone::Foghorn => 1,
        AlarmTone::JapaneseBell => 2,
        AlarmTone::WoopWoop => 4,
    }
}

/// Rings the terminal bell on the given writer.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AlarmPlayer for TerminalBell<W> {
    fn play(&mut self, tone: AlarmTone) -> Result<(), AlarmError> {
        let bells = vec![0x07u8; bell_count(tone)];
        self.out.write_all(&bells)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Plays per-tone sound files through an external program such as `paplay`.
///
/// Tones without a configured file, and failed launches, fall back to the
/// terminal bell. Finished players are reaped before each new launch.
pub struct CommandPlayer<W: Write> {
    program: String,
    tones: HashMap<AlarmTone, PathBuf>,
    fallback: TerminalBell<W>,
    children: Vec<Child>,
}

impl<W: Write> CommandPlayer<W> {
    pub fn new(program: impl Into<String>, tones: HashMap<AlarmTone, PathBuf>, fallback: TerminalBell<W>) -> Self {
        Self {
            program: program.into(),
            tones,
            fallback,
            children: Vec::new(),
        }
    }

    /// Collects players that have exited and returns how many are still
    /// running.
    pub fn reap_finished(&mut self) -> usize {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                tracing::trace!(pid = child.id(), %status, "alarm player exited");
                false
            }
            Ok(None) => true,
            Err(err) => {
                tracing::warn!(pid = child.id(), error = %err, "failed to poll alarm player");
                false
            }
        });
        self.children.len()
    }

    fn spawn(program: &str, file: &Path) -> Result<Child, AlarmError> {
        Command::new(program)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AlarmError::Spawn {
                program: program.to_string(),
                source,
            })
    }
}

impl<W: Write> AlarmPlayer for CommandPlayer<W> {
    fn play(&mut self, tone: AlarmTone) -> Result<(), AlarmError> {
        self.reap_finished();
        let Some(file) = self.tones.get(&tone) else {
            tracing::debug!(%tone, "no sound file configured, ringing bell");
            return self.fallback.play(tone);
        };

        match Self::spawn(&self.program, file) {
            Ok(child) => {
                tracing::debug!(%tone, file = %file.display(), program = %self.program, pid = child.id(), "alarm started");
                self.children.push(child);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%tone, error = %err, "alarm player failed, ringing bell");
                self.fallback.play(tone)?;
                Err(err)
            }
        }
    }
}

/// Plays nothing. Used when sound is muted.
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl AlarmPlayer for SilentPlayer {
    fn play(&mut self, tone: AlarmTone) -> Result<(), AlarmError> {
        tracing::debug!(%tone, "alarm muted");
        Ok(())
    }
}
