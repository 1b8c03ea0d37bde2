//! Determinate progress flavor: `[=====     ] 50%`.

use super::{Bar, BarContent};
use crate::error::BarResult;
use crate::terminal::Terminal;
use std::sync::atomic::{AtomicU64, Ordering};

/// Glyph palettes for the filled and empty cells of a progress bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProgressGlyphs {
    /// `=` cells on a blank background.
    #[default]
    Ascii,
    /// Full block (`█`) cells with light empty fill (`░`).
    FullBlock,
    /// Dark shade (`▓`) cells with light empty fill (`░`).
    Shade,
    /// Dense braille wall, good for compact displays.
    Braille,
}

impl ProgressGlyphs {
    pub fn filled_cell(self) -> &'static str {
        match self {
            ProgressGlyphs::Ascii => "=",
            ProgressGlyphs::FullBlock => "█",
            ProgressGlyphs::Shade => "▓",
            ProgressGlyphs::Braille => "⣿",
        }
    }

    pub fn empty_cell(self) -> &'static str {
        match self {
            ProgressGlyphs::Ascii | ProgressGlyphs::Braille => " ",
            ProgressGlyphs::FullBlock | ProgressGlyphs::Shade => "░",
        }
    }
}

/// Completed fraction in `[0, 1]`, stored as `f64` bits so it can be updated
/// from any thread without taking the render lock.
#[derive(Debug, Default)]
pub struct Progress {
    fraction: AtomicU64,
    glyphs: ProgressGlyphs,
}

impl Progress {
    pub fn new(glyphs: ProgressGlyphs) -> Self {
        Self {
            fraction: AtomicU64::new(0f64.to_bits()),
            glyphs,
        }
    }

    /// Store a new fraction. Out-of-range values are clamped, NaN counts as 0.
    pub fn set(&self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.fraction.store(fraction.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.fraction.load(Ordering::Relaxed))
    }

    pub fn glyphs(&self) -> ProgressGlyphs {
        self.glyphs
    }
}

impl BarContent for Progress {
    fn bar_text(&self, width: usize) -> String {
        let filled = ((self.get() * width as f64).round() as usize).min(width);
        format!(
            "[{}{}]",
            self.glyphs.filled_cell().repeat(filled),
            self.glyphs.empty_cell().repeat(width - filled)
        )
    }

    fn status_text(&self) -> String {
        let pct = (self.get() * 100.0).round() as u8;
        format!(" {pct}%")
    }
}

impl<T: Terminal> Bar<Progress, T> {
    /// Store `fraction` and repaint.
    pub fn set_progress(&self, fraction: f64) -> BarResult<()> {
        self.content().set(fraction);
        self.update()
    }

    pub fn progress(&self) -> f64 {
        self.content().get()
    }
}
