//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module.

pub mod loading;
pub mod progress;

use crate::bar::{Bar, BarContent, BarOptions};
use crate::cli::args::BarArgs;
use crate::config::Settings;
use crate::error::BarResult;
use crate::terminal::Terminal;

/// Resolve bar options from settings and command-line overrides. `animated`
/// false (`--no-animation`) wins over the configured value.
pub fn bar_options(settings: &Settings, args: &BarArgs, animated: bool) -> BarOptions {
    let mut options = BarOptions::from(&settings.bar);
    if let Some(width) = args.width {
        options = options.with_width(width);
    }
    options.animated(options.animated && animated)
}

/// Complete `bar` the way `args` asks for.
pub fn complete<K: BarContent, T: Terminal>(bar: &Bar<K, T>, args: &BarArgs) -> BarResult<()> {
    let message = args.message.as_deref();
    if args.fail {
        bar.fail(message)
    } else {
        bar.finish(message)
    }
}
