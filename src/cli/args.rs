//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Args, Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Parser)]
#[command(name = "barline")]
#[command(version, about = "Drive animated terminal status bars", styles = clap_cargo_style())]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the completion line without the collapse animation
    #[arg(long, global = true)]
    pub no_animation: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fill a determinate progress bar step by step
    Progress {
        #[command(flatten)]
        bar: BarArgs,

        /// Number of increments before completion
        #[arg(long, default_value_t = 20)]
        steps: u32,

        /// Pause between increments in milliseconds
        #[arg(long, default_value_t = 50)]
        delay: u64,
    },

    /// Spin a loading bar while a worker thread runs
    Loading {
        #[command(flatten)]
        bar: BarArgs,

        /// How long the worker runs in milliseconds
        #[arg(long, default_value_t = 1500)]
        millis: u64,

        /// Pause between spin frames in milliseconds
        #[arg(long, default_value_t = 50)]
        delay: u64,
    },
}

/// Options shared by every bar command.
#[derive(Args, Debug, Clone)]
pub struct BarArgs {
    /// Title shown before the bar
    #[arg(short, long, default_value = "Working")]
    pub title: String,

    /// Bar width in cells (overrides config)
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Complete with a failure instead of success
    #[arg(long)]
    pub fail: bool,

    /// Completion message (defaults to "Done" / "Failed")
    #[arg(short, long)]
    pub message: Option<String>,
}
