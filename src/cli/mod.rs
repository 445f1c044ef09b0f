//! Command-line interface for the IntelliSense index.
//!
//! Provides argument parsing and command dispatch.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, QueryKind, TargetArgs};
