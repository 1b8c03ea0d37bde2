//! `barline progress`: drive a determinate bar to completion.

use std::thread;
use std::time::Duration;

use crate::bar::{BarOptions, Progress, ProgressBar};
use crate::cli::args::BarArgs;
use crate::error::BarResult;
use crate::terminal::Terminal;

use super::complete;

/// Fill the bar over `steps` increments, pausing `delay` between them, then
/// complete it.
pub fn run<T: Terminal>(
    terminal: T,
    options: BarOptions,
    args: &BarArgs,
    steps: u32,
    delay: Duration,
) -> BarResult<()> {
    let bar = ProgressBar::new(terminal, args.title.clone(), Progress::default(), options);
    let steps = steps.max(1);

    for step in 0..=steps {
        bar.set_progress(f64::from(step) / f64::from(steps))?;
        if step < steps {
            thread::sleep(delay);
        }
    }

    complete(&bar, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::MemoryTerminal;

    #[test]
    fn test_progress_run_renders_every_step() {
        let terminal = MemoryTerminal::new(120);
        let args = BarArgs {
            title: "Fetch".to_string(),
            width: None,
            fail: false,
            message: None,
        };

        run(
            &terminal,
            BarOptions::new(4).animated(false),
            &args,
            2,
            Duration::ZERO,
        )
        .unwrap();

        assert_eq!(
            terminal.lines(),
            vec![
                "Fetch [    ] 0%".to_string(),
                "Fetch [==  ] 50%".to_string(),
                "Fetch [====] 100%".to_string(),
                "Fetch [Done]".to_string(),
            ]
        );
        assert_eq!(terminal.clear_count(), 2);
    }
}
