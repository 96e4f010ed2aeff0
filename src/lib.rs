//! tpomo - Terminal Pomodoro Library
//!
//! A pomodoro timer that alternates work and rest sessions, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
