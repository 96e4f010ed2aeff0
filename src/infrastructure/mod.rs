//! Infrastructure layer providing external service integrations.
//!
//! This module contains alarm playback through the terminal or an external
//! sound player, and loading of the startup settings file.

pub mod alarm;
pub mod settings;

pub use alarm::*;
pub use settings::*;
