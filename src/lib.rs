//! Animated terminal status bars.
//!
//! A [`Bar`] repaints one terminal line from any number of threads and
//! completes exactly once, collapsing into a `title [message]` line.
//!
//! ```no_run
//! use barline::{BarOptions, ConsoleTerminal, Progress, ProgressBar};
//!
//! let bar = ProgressBar::new(
//!     ConsoleTerminal::stdout(),
//!     "Build",
//!     Progress::default(),
//!     BarOptions::new(20),
//! );
//! for step in 0..=10 {
//!     bar.set_progress(step as f64 / 10.0)?;
//! }
//! bar.finish(None)?;
//! # Ok::<(), barline::BarError>(())
//! ```

pub mod bar;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod style;
pub mod terminal;

pub use bar::{
    Bar, BarContent, BarOptions, BarState, Loading, LoadingBar, Plain, Progress, ProgressBar,
    ProgressGlyphs,
};
pub use config::{BarConfig, LoggingConfig, Settings};
pub use error::{BarError, BarResult};
pub use style::{Color, Style};
pub use terminal::{ClearScope, ConsoleTerminal, Event, MemoryTerminal, Size, Terminal};
