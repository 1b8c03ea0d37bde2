//! CLI module for the barline demo binary.
//!
//! Provides command-line interface parsing and command dispatch.

pub mod args;
pub mod commands;

pub use args::{BarArgs, Cli, Commands};
