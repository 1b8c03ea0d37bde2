//! Terminal status bar with a one-shot completion transition.
//!
//! A [`Bar`] paints a single line `title [bar] status` and repaints it in place
//! on every [`Bar::update`]. Exactly one call to [`Bar::finish`] or
//! [`Bar::fail`] wins; it collapses the bar into the completion message (when
//! animated) and leaves a final `title [message]` line behind.
//!
//! ## Flavors
//! What goes inside the line is decided by a [`BarContent`] implementation:
//! - [`Plain`] renders nothing besides the title.
//! - [`Progress`] renders a determinate `[=====     ] 50%` bar.
//! - [`Loading`] renders a bouncing marker for work of unknown length.
//!
//! ## Concurrency
//! All rendering goes through one per-bar mutex, so lines from concurrent
//! callers never interleave. The completion claim is a compare-and-swap on an
//! atomic outcome cell: losers return without output. The collapse keeps the
//! mutex across its frame pauses, so no `update` can paint mid-animation.

pub mod loading;
pub mod progress;

pub use loading::Loading;
pub use progress::{Progress, ProgressGlyphs};

use crate::config::BarConfig;
use crate::debug_event;
use crate::error::BarResult;
use crate::style::Style;
use crate::terminal::{ClearScope, ConsoleTerminal, Terminal};
use parking_lot::Mutex;
use std::borrow::Cow;
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

pub const DEFAULT_WIDTH: usize = 30;
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(10);
pub const DEFAULT_FINISH_MESSAGE: &str = "Done";
pub const DEFAULT_FAIL_MESSAGE: &str = "Failed";

const ELLIPSIS: &str = "...";
const COLLAPSE_FILL: char = '=';

const STATE_PENDING: u8 = 0;
const STATE_SUCCEEDED: u8 = 1;
const STATE_FAILED: u8 = 2;

/// Cells reserved around the title, bar and status: one separating space,
/// two brackets, three cells of padding.
const LINE_OVERHEAD: usize = 1 + 2 + 3;

/// Content hooks read by [`Bar::update`] on every render.
///
/// Both run while the bar's render lock is held: keep them fast and free of
/// side effects.
pub trait BarContent: Send + Sync {
    /// Graphical portion of the line, given the bar's configured width.
    fn bar_text(&self, _width: usize) -> String {
        String::new()
    }

    /// Text shown after the bar.
    fn status_text(&self) -> String {
        String::new()
    }
}

/// Base flavor with empty bar and status text.
#[derive(Clone, Copy, Debug, Default)]
pub struct Plain;

impl BarContent for Plain {}

/// Observable lifecycle of a [`Bar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarState {
    /// Nothing painted yet.
    Created,
    /// At least one render happened and no completion has been claimed.
    Running,
    Succeeded,
    Failed,
}

/// Display configuration fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct BarOptions {
    pub width: usize,
    pub bar_style: Style,
    pub title_style: Style,
    pub animated: bool,
    pub frame_interval: Duration,
}

impl BarOptions {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            bar_style: Style::Info,
            title_style: Style::Plain,
            animated: true,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_bar_style(mut self, style: Style) -> Self {
        self.bar_style = style;
        self
    }

    pub fn with_title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }
}

impl Default for BarOptions {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl From<&BarConfig> for BarOptions {
    fn from(config: &BarConfig) -> Self {
        Self::new(config.width)
            .with_bar_style(config.bar_style)
            .with_title_style(config.title_style)
            .animated(config.animated)
            .with_frame_interval(Duration::from_millis(config.frame_interval_ms))
    }
}

/// State guarded by the render lock.
#[derive(Debug, Default)]
struct RenderState {
    has_started: bool,
}

/// Animated single-line status bar.
///
/// Share it across threads with `Arc<Bar<..>>`; every method takes `&self`.
pub struct Bar<K = Plain, T = ConsoleTerminal> {
    terminal: T,
    title: String,
    options: BarOptions,
    content: K,
    render: Mutex<RenderState>,
    outcome: AtomicU8,
}

pub type ProgressBar<T = ConsoleTerminal> = Bar<Progress, T>;
pub type LoadingBar<T = ConsoleTerminal> = Bar<Loading, T>;

impl<K: BarContent, T: Terminal> Bar<K, T> {
    pub fn new(terminal: T, title: impl Into<String>, content: K, options: BarOptions) -> Self {
        let mut options = options;
        options.width = options.width.max(1);
        if cfg!(feature = "no-animation") || !terminal.supports_redraw() {
            options.animated = false;
        }

        Self {
            terminal,
            title: title.into(),
            options,
            content,
            render: Mutex::new(RenderState::default()),
            outcome: AtomicU8::new(STATE_PENDING),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> usize {
        self.options.width
    }

    pub fn is_animated(&self) -> bool {
        self.options.animated
    }

    pub fn content(&self) -> &K {
        &self.content
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// True once something has been painted. Blocks while a render is in flight.
    pub fn has_started(&self) -> bool {
        self.render.lock().has_started
    }

    /// True once `finish` or `fail` has claimed the completion.
    pub fn is_finished(&self) -> bool {
        self.outcome.load(Ordering::Acquire) != STATE_PENDING
    }

    pub fn state(&self) -> BarState {
        match self.outcome.load(Ordering::Acquire) {
            STATE_SUCCEEDED => BarState::Succeeded,
            STATE_FAILED => BarState::Failed,
            _ if self.has_started() => BarState::Running,
            _ => BarState::Created,
        }
    }

    /// Repaint the in-progress line. A no-op once the bar is finished.
    ///
    /// Completion is claimed under the same lock, so no in-progress line is
    /// painted after `is_finished` turns true.
    ///
    /// The title is shortened with an ellipsis when the whole line would not
    /// fit in the current viewport.
    pub fn update(&self) -> BarResult<()> {
        let mut render = self.render.lock();
        if self.is_finished() {
            return Ok(());
        }

        let viewport = self.terminal.size()?;
        let bar = self.content.bar_text(self.options.width);
        let status = self.content.status_text();
        let required = self.title.chars().count()
            + self.options.width
            + status.chars().count()
            + LINE_OVERHEAD;
        let title = fit_title(&self.title, required, viewport.width);

        self.prepare_line(&mut render)?;
        self.terminal
            .output(&format!("{title} "), self.options.title_style, false)?;
        self.terminal.output(&bar, self.options.bar_style, false)?;
        self.terminal.output(&status, self.options.title_style, true)?;
        Ok(())
    }

    /// Complete successfully with `message` (default `"Done"`).
    ///
    /// Only the first of any `finish`/`fail` calls renders anything. On an
    /// I/O error the bar still counts as finished; the last line may be
    /// incomplete, and calling again will not redraw it.
    pub fn finish(&self, message: Option<&str>) -> BarResult<()> {
        self.complete(
            STATE_SUCCEEDED,
            message.unwrap_or(DEFAULT_FINISH_MESSAGE),
            Style::Success,
        )
    }

    /// Complete with a failure `message` (default `"Failed"`).
    ///
    /// Same one-shot semantics as [`Bar::finish`].
    pub fn fail(&self, message: Option<&str>) -> BarResult<()> {
        self.complete(
            STATE_FAILED,
            message.unwrap_or(DEFAULT_FAIL_MESSAGE),
            Style::Error,
        )
    }

    fn complete(&self, outcome: u8, message: &str, style: Style) -> BarResult<()> {
        let mut render = self.render.lock();
        if self
            .outcome
            .compare_exchange(
                STATE_PENDING,
                outcome,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return Ok(());
        }
        debug_event!("bar", "completed", "{} [{}]", self.title, message);

        if self.options.animated {
            self.collapse(&mut render, message, style)
        } else {
            self.final_line(message, style)
        }
    }

    /// Shrink the bar frame by frame while revealing `message`, then paint the
    /// final line. Runs zero frames when the message does not fit the width.
    fn collapse(&self, render: &mut RenderState, message: &str, style: Style) -> BarResult<()> {
        let revealed: Vec<char> = message.chars().collect();
        let len = revealed.len();
        let width = self.options.width;

        if len > 0 && len < width {
            let frames = width - len;
            let rate = (frames / len).max(1);

            for frame in 0..frames {
                self.prepare_line(render)?;
                self.terminal
                    .output(&self.title, self.options.title_style, false)?;

                let showing = (frame / rate).min(len);
                let mut head = String::from(" [");
                head.extend(&revealed[..showing]);
                self.terminal.output(&head, style, false)?;

                let remaining = width.saturating_sub(frame + 1 + showing);
                let mut tail: String = std::iter::repeat_n(COLLAPSE_FILL, remaining).collect();
                tail.push(']');
                self.terminal.output(&tail, self.options.bar_style, true)?;

                tracing::trace!(target: "bar", frame, showing, remaining, "collapse frame");
                self.terminal.wait(self.options.frame_interval);
            }
        }

        self.prepare_line(render)?;
        self.final_line(message, style)
    }

    fn final_line(&self, message: &str, style: Style) -> BarResult<()> {
        self.terminal
            .output(&self.title, self.options.title_style, false)?;
        self.terminal.output(&format!(" [{message}]"), style, true)?;
        Ok(())
    }

    /// Erase the previous render, or mark the first paint.
    fn prepare_line(&self, render: &mut RenderState) -> io::Result<()> {
        if render.has_started {
            self.terminal.clear(ClearScope::Line)
        } else {
            render.has_started = true;
            Ok(())
        }
    }
}

impl<T: Terminal> Bar<Plain, T> {
    pub fn plain(terminal: T, title: impl Into<String>, options: BarOptions) -> Self {
        Self::new(terminal, title, Plain, options)
    }
}

/// Drop `min(overflow, title length)` trailing characters and append an
/// ellipsis when `required` exceeds `available`.
fn fit_title(title: &str, required: usize, available: usize) -> Cow<'_, str> {
    if required <= available {
        return Cow::Borrowed(title);
    }
    let len = title.chars().count();
    let overflow = (required - available).min(len);
    let kept: String = title.chars().take(len - overflow).collect();
    Cow::Owned(kept + ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{Event, MemoryTerminal};

    fn bar(width: usize, title: &str, animated: bool) -> Bar<Plain, MemoryTerminal> {
        Bar::plain(
            MemoryTerminal::new(120),
            title,
            BarOptions::new(width).animated(animated),
        )
    }

    #[test]
    fn test_fit_title_untouched_when_it_fits() {
        assert_eq!(fit_title("Build", 20, 80), "Build");
        assert_eq!(fit_title("Build", 80, 80), "Build");
    }

    #[test]
    fn test_fit_title_drops_overflow() {
        let title = "abcdefghijklmnopqrstuvwxy";
        assert_eq!(title.chars().count(), 25);
        // 25 + 1 + 10 + 0 + 2 + 3 = 41 against a 30 cell viewport
        assert_eq!(fit_title(title, 41, 30), "abcdefghijklmn...");
    }

    #[test]
    fn test_fit_title_clamps_to_title_length() {
        assert_eq!(fit_title("Build", 100, 10), "...");
    }

    #[test]
    fn test_fit_title_counts_characters_not_bytes() {
        assert_eq!(fit_title("héllo", 7, 5), "hél...");
    }

    #[test]
    fn test_first_update_does_not_clear() {
        let bar = bar(10, "Build", true);
        assert_eq!(bar.state(), BarState::Created);

        bar.update().unwrap();
        assert_eq!(bar.terminal().clear_count(), 0);
        assert!(bar.has_started());
        assert_eq!(bar.state(), BarState::Running);

        bar.update().unwrap();
        assert_eq!(bar.terminal().clear_count(), 1);
    }

    #[test]
    fn test_update_writes_one_line_with_styles() {
        let bar = Bar::plain(
            MemoryTerminal::new(120),
            "Build",
            BarOptions::new(10).with_bar_style(Style::Warning),
        );
        bar.update().unwrap();

        let events = bar.terminal().events();
        assert_eq!(
            events,
            vec![
                Event::Output {
                    text: "Build ".to_string(),
                    style: Style::Plain,
                    new_line: false,
                },
                Event::Output {
                    text: String::new(),
                    style: Style::Warning,
                    new_line: false,
                },
                Event::Output {
                    text: String::new(),
                    style: Style::Plain,
                    new_line: true,
                },
            ]
        );
    }

    #[cfg(not(feature = "no-animation"))]
    #[test]
    fn test_collapse_rate_never_zero() {
        // W - L = 2 < L = 3, integer rate would be zero
        let bar = bar(5, "X", true);
        bar.finish(Some("abc")).unwrap();
        let lines = bar.terminal().lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "X [====]");
        assert_eq!(lines[1], "X [a==]");
        assert_eq!(lines[2], "X [abc]");
    }

    #[test]
    fn test_empty_message_skips_frames() {
        let bar = bar(10, "X", true);
        bar.finish(Some("")).unwrap();
        assert_eq!(bar.terminal().lines(), vec!["X []".to_string()]);
        assert_eq!(bar.terminal().wait_count(), 0);
    }

    #[test]
    fn test_zero_width_is_clamped() {
        let bar = bar(0, "X", true);
        assert_eq!(bar.width(), 1);
        bar.finish(None).unwrap();
        assert_eq!(bar.terminal().lines(), vec!["X [Done]".to_string()]);
    }

    #[cfg(not(feature = "no-animation"))]
    #[test]
    fn test_frames_use_configured_interval() {
        let bar = Bar::plain(
            MemoryTerminal::new(120),
            "X",
            BarOptions::new(4).with_frame_interval(Duration::from_millis(25)),
        );
        bar.finish(Some("ab")).unwrap();
        let waits: Vec<_> = bar
            .terminal()
            .events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Wait(duration) => Some(duration),
                _ => None,
            })
            .collect();
        assert_eq!(waits, vec![Duration::from_millis(25); 2]);
    }

    #[cfg(feature = "no-animation")]
    #[test]
    fn test_no_animation_feature_overrides_options() {
        let bar = bar(10, "X", true);
        assert!(!bar.is_animated());

        bar.finish(Some("OK")).unwrap();
        assert_eq!(bar.terminal().lines(), vec!["X [OK]".to_string()]);
        assert_eq!(bar.terminal().wait_count(), 0);
    }

    #[test]
    fn test_terminal_without_redraw_skips_collapse() {
        let bar = Bar::plain(
            MemoryTerminal::new(120).without_redraw(),
            "X",
            BarOptions::new(10).animated(true),
        );
        assert!(!bar.is_animated());

        bar.update().unwrap();
        bar.finish(Some("OK")).unwrap();
        let terminal = bar.terminal();
        assert_eq!(terminal.lines(), vec!["X ".to_string(), "X [OK]".to_string()]);
        assert_eq!(terminal.wait_count(), 0);
        assert_eq!(terminal.clear_count(), 0);
    }

    #[test]
    fn test_completion_waits_for_render_in_flight() {
        let bar = bar(10, "X", false);
        let render = bar.render.lock();

        std::thread::scope(|scope| {
            let finisher = scope.spawn(|| bar.finish(None));
            std::thread::sleep(Duration::from_millis(50));
            // the claim happens only once the in-flight render releases the lock
            assert!(!bar.is_finished());
            drop(render);
            finisher.join().unwrap().unwrap();
        });

        assert!(bar.is_finished());
        assert_eq!(bar.terminal().lines(), vec!["X [Done]".to_string()]);
    }

    #[test]
    fn test_options_from_config() {
        let config = BarConfig {
            width: 12,
            animated: false,
            frame_interval_ms: 40,
            bar_style: Style::Warning,
            title_style: Style::Info,
        };
        let options = BarOptions::from(&config);
        assert_eq!(options.width, 12);
        assert!(!options.animated);
        assert_eq!(options.frame_interval, Duration::from_millis(40));
        assert_eq!(options.bar_style, Style::Warning);
        assert_eq!(options.title_style, Style::Info);
    }
}
