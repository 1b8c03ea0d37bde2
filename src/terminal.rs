//! Terminal output port.
//!
//! [`Bar`](crate::Bar) never touches stdout directly. Everything it paints goes
//! through the [`Terminal`] trait, which keeps the render algorithm testable:
//! - [`ConsoleTerminal`] writes to a real terminal through the `console` crate.
//! - [`MemoryTerminal`] records every call, never sleeps, and can be told to
//!   fail after a number of writes.

use crate::style::Style;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Viewport dimensions in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// Region erased by [`Terminal::clear`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearScope {
    /// The most recently written line. Renders always end their line, so this
    /// moves up one row and erases it.
    Line,
    Screen,
}

/// Minimal capability set a bar needs from its terminal.
pub trait Terminal: Send + Sync {
    /// Write `text` painted with `style`, optionally terminating the line.
    fn output(&self, text: &str, style: Style, new_line: bool) -> io::Result<()>;

    /// Current viewport size. Queried fresh on every render.
    fn size(&self) -> io::Result<Size>;

    fn clear(&self, scope: ClearScope) -> io::Result<()>;

    /// Cooperative pause used for animation pacing.
    fn wait(&self, duration: Duration);

    /// Whether [`Terminal::clear`] actually erases output. Bars built on a
    /// terminal that cannot redraw skip the collapse frames.
    fn supports_redraw(&self) -> bool {
        true
    }
}

impl<T: Terminal + ?Sized> Terminal for &T {
    fn output(&self, text: &str, style: Style, new_line: bool) -> io::Result<()> {
        (**self).output(text, style, new_line)
    }

    fn size(&self) -> io::Result<Size> {
        (**self).size()
    }

    fn clear(&self, scope: ClearScope) -> io::Result<()> {
        (**self).clear(scope)
    }

    fn wait(&self, duration: Duration) {
        (**self).wait(duration)
    }

    fn supports_redraw(&self) -> bool {
        (**self).supports_redraw()
    }
}

impl<T: Terminal + ?Sized> Terminal for Arc<T> {
    fn output(&self, text: &str, style: Style, new_line: bool) -> io::Result<()> {
        (**self).output(text, style, new_line)
    }

    fn size(&self) -> io::Result<Size> {
        (**self).size()
    }

    fn clear(&self, scope: ClearScope) -> io::Result<()> {
        (**self).clear(scope)
    }

    fn wait(&self, duration: Duration) {
        (**self).wait(duration)
    }

    fn supports_redraw(&self) -> bool {
        (**self).supports_redraw()
    }
}

/// Fallback viewport used when the output is not attached to a terminal.
const FALLBACK_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Real terminal backed by [`console::Term`].
#[derive(Clone, Debug)]
pub struct ConsoleTerminal {
    term: console::Term,
    interactive: bool,
}

impl ConsoleTerminal {
    pub fn stdout() -> Self {
        Self {
            term: console::Term::stdout(),
            interactive: is_terminal::is_terminal(std::io::stdout()),
        }
    }

    pub fn stderr() -> Self {
        Self {
            term: console::Term::stderr(),
            interactive: is_terminal::is_terminal(std::io::stderr()),
        }
    }

    /// True when the underlying stream is a TTY. Otherwise `clear` is a no-op
    /// and bars drawn here render their completion without animation.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Terminal for ConsoleTerminal {
    fn output(&self, text: &str, style: Style, new_line: bool) -> io::Result<()> {
        let painted = style.to_console().apply_to(text).to_string();
        if new_line {
            self.term.write_line(&painted)
        } else {
            self.term.write_str(&painted)
        }
    }

    fn size(&self) -> io::Result<Size> {
        // size_checked is None when not attached to a terminal
        Ok(match self.term.size_checked() {
            Some((rows, cols)) => Size {
                width: cols as usize,
                height: rows as usize,
            },
            None => FALLBACK_SIZE,
        })
    }

    fn clear(&self, scope: ClearScope) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }
        match scope {
            ClearScope::Line => self.term.clear_last_lines(1),
            ClearScope::Screen => self.term.clear_screen(),
        }
    }

    fn wait(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn supports_redraw(&self) -> bool {
        self.interactive
    }
}

/// A single call recorded by [`MemoryTerminal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Output {
        text: String,
        style: Style,
        new_line: bool,
    },
    Clear(ClearScope),
    Wait(Duration),
}

#[derive(Debug, Default)]
struct Recording {
    events: Vec<Event>,
    outputs: usize,
}

/// In-memory terminal that records every call instead of painting.
///
/// `wait` returns immediately, so animations run at full speed while their
/// frame count stays observable.
#[derive(Debug)]
pub struct MemoryTerminal {
    size: Mutex<Size>,
    recording: Mutex<Recording>,
    fail_after: Option<usize>,
    redraw: bool,
}

impl MemoryTerminal {
    pub fn new(width: usize) -> Self {
        Self {
            size: Mutex::new(Size { width, height: 24 }),
            recording: Mutex::new(Recording::default()),
            fail_after: None,
            redraw: true,
        }
    }

    /// Every `output` after the first `writes` successful ones fails.
    pub fn failing_after(mut self, writes: usize) -> Self {
        self.fail_after = Some(writes);
        self
    }

    /// Behave like a piped stream: [`Terminal::supports_redraw`] reports false.
    pub fn without_redraw(mut self) -> Self {
        self.redraw = false;
        self
    }

    /// Resize the viewport (e.g. to simulate a terminal resize between renders).
    pub fn set_width(&self, width: usize) {
        self.size.lock().width = width;
    }

    pub fn events(&self) -> Vec<Event> {
        self.recording.lock().events.clone()
    }

    /// Completed logical lines: consecutive outputs joined up to and
    /// including one that ended its line. Styles and clears are ignored.
    pub fn lines(&self) -> Vec<String> {
        let recording = self.recording.lock();
        let mut lines = Vec::new();
        let mut current = String::new();
        for event in &recording.events {
            if let Event::Output { text, new_line, .. } = event {
                current.push_str(text);
                if *new_line {
                    lines.push(std::mem::take(&mut current));
                }
            }
        }
        lines
    }

    pub fn clear_count(&self) -> usize {
        self.recording
            .lock()
            .events
            .iter()
            .filter(|event| matches!(event, Event::Clear(_)))
            .count()
    }

    pub fn wait_count(&self) -> usize {
        self.recording
            .lock()
            .events
            .iter()
            .filter(|event| matches!(event, Event::Wait(_)))
            .count()
    }

    /// Forget everything recorded so far.
    pub fn reset(&self) {
        *self.recording.lock() = Recording::default();
    }
}

impl Terminal for MemoryTerminal {
    fn output(&self, text: &str, style: Style, new_line: bool) -> io::Result<()> {
        let mut recording = self.recording.lock();
        if self.fail_after.is_some_and(|limit| recording.outputs >= limit) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"));
        }
        recording.outputs += 1;
        recording.events.push(Event::Output {
            text: text.to_string(),
            style,
            new_line,
        });
        Ok(())
    }

    fn size(&self) -> io::Result<Size> {
        Ok(*self.size.lock())
    }

    fn clear(&self, scope: ClearScope) -> io::Result<()> {
        self.recording.lock().events.push(Event::Clear(scope));
        Ok(())
    }

    fn wait(&self, duration: Duration) {
        self.recording.lock().events.push(Event::Wait(duration));
    }

    fn supports_redraw(&self) -> bool {
        self.redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_join_partial_outputs() {
        let terminal = MemoryTerminal::new(80);
        terminal.output("Build", Style::Plain, false).unwrap();
        terminal.output(" [Done]", Style::Success, true).unwrap();
        terminal.output("dangling", Style::Plain, false).unwrap();

        assert_eq!(terminal.lines(), vec!["Build [Done]".to_string()]);
    }

    #[test]
    fn test_failing_after_limit() {
        let terminal = MemoryTerminal::new(80).failing_after(1);
        assert!(terminal.output("a", Style::Plain, false).is_ok());
        let err = terminal.output("b", Style::Plain, true).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(terminal.events().len(), 1);
    }

    #[test]
    fn test_counts_and_reset() {
        let terminal = MemoryTerminal::new(80);
        terminal.clear(ClearScope::Line).unwrap();
        terminal.wait(Duration::from_millis(10));
        terminal.wait(Duration::from_millis(10));
        assert_eq!(terminal.clear_count(), 1);
        assert_eq!(terminal.wait_count(), 2);

        terminal.reset();
        assert!(terminal.events().is_empty());
    }

    #[test]
    fn test_shared_through_arc() {
        let terminal = Arc::new(MemoryTerminal::new(42));
        let shared: &dyn Terminal = &terminal;
        assert_eq!(shared.size().unwrap().width, 42);
        terminal.set_width(10);
        assert_eq!(shared.size().unwrap().width, 10);
    }

    #[test]
    fn test_redraw_support_forwards_through_wrappers() {
        fn redraws(terminal: impl Terminal) -> bool {
            terminal.supports_redraw()
        }

        let piped = Arc::new(MemoryTerminal::new(80).without_redraw());
        assert!(!redraws(Arc::clone(&piped)));
        assert!(!redraws(piped.as_ref()));
        assert!(redraws(MemoryTerminal::new(80)));
    }
}
