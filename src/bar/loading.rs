//! Indeterminate loading flavor: a marker bouncing between the brackets.

use super::{Bar, BarContent};
use crate::error::BarResult;
use crate::terminal::Terminal;
use std::sync::atomic::{AtomicU64, Ordering};

const MARKER: &str = "•";

/// Animation cycle counter for a bouncing loading bar.
#[derive(Debug, Default)]
pub struct Loading {
    cycle: AtomicU64,
}

impl Loading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the marker one cell.
    pub fn advance(&self) {
        self.cycle.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cycle(&self) -> u64 {
        self.cycle.load(Ordering::Relaxed)
    }

    /// Marker cell for the current cycle: `0, 1, .., width-1, width-2, .., 1, 0, ..`
    pub fn position(&self, width: usize) -> usize {
        if width <= 1 {
            return 0;
        }
        let period = 2 * (width as u64 - 1);
        let phase = self.cycle() % period;
        let last = width as u64 - 1;
        (if phase <= last { phase } else { period - phase }) as usize
    }
}

impl BarContent for Loading {
    fn bar_text(&self, width: usize) -> String {
        let position = self.position(width);
        format!(
            "[{}{MARKER}{}]",
            " ".repeat(position),
            " ".repeat(width.saturating_sub(position + 1))
        )
    }
}

impl<T: Terminal> Bar<Loading, T> {
    /// Advance the animation and repaint.
    pub fn spin(&self) -> BarResult<()> {
        self.content().advance();
        self.update()
    }
}
