//! Error types for bar rendering.

use thiserror::Error;

/// Errors surfaced by [`Bar`](crate::Bar) operations.
///
/// "Already finished" is not an error: a second `finish`/`fail` is a silent no-op.
#[derive(Error, Debug)]
pub enum BarError {
    /// The terminal rejected a write, clear or size query. The render or
    /// collapse that hit it was abandoned mid-way.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BarResult<T> = Result<T, BarError>;
