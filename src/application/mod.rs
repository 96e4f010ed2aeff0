//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it applies user commands, drives the session model from the tick clock,
//! and keeps the presentation state and alarm in step.

pub mod commands;
pub mod driver;
pub mod state;

pub use commands::*;
pub use driver::*;
pub use state::*;
