use anyhow::{Context, Result};
use barline::cli::commands::{self, loading, progress};
use barline::cli::{Cli, Commands};
use barline::{ConsoleTerminal, Settings, log_event, logging};
use clap::Parser;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("failed to load configuration")?;

    logging::init_with_config(&settings.logging);

    // piped output disables animation inside Bar::new
    let terminal = ConsoleTerminal::stdout();
    let animated = !cli.no_animation;

    match cli.command {
        Commands::Progress { bar, steps, delay } => {
            log_event!("cli", "progress", "{} ({steps} steps)", bar.title);
            let options = commands::bar_options(&settings, &bar, animated);
            progress::run(terminal, options, &bar, steps, Duration::from_millis(delay))?;
        }
        Commands::Loading { bar, millis, delay } => {
            log_event!("cli", "loading", "{} ({millis} ms)", bar.title);
            let options = commands::bar_options(&settings, &bar, animated);
            loading::run(
                terminal,
                options,
                &bar,
                Duration::from_millis(millis),
                Duration::from_millis(delay),
            )?;
        }
    }

    Ok(())
}
