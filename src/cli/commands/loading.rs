//! `barline loading`: spin while another thread does the work.
//!
//! The main thread keeps spinning until the worker claims completion, which
//! exercises the cross-thread `finish`/`fail` path.

use std::thread;
use std::time::Duration;

use crate::bar::{BarOptions, Loading, LoadingBar};
use crate::cli::args::BarArgs;
use crate::debug_event;
use crate::error::BarResult;
use crate::terminal::Terminal;

use super::complete;

pub fn run<T: Terminal>(
    terminal: T,
    options: BarOptions,
    args: &BarArgs,
    work: Duration,
    delay: Duration,
) -> BarResult<()> {
    let bar = LoadingBar::new(terminal, args.title.clone(), Loading::new(), options);

    thread::scope(|scope| {
        let worker = scope.spawn(|| {
            thread::sleep(work);
            debug_event!("cli", "worker done", "{}", args.title);
            complete(&bar, args)
        });

        while !bar.is_finished() {
            bar.spin()?;
            thread::sleep(delay);
        }

        match worker.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
}
