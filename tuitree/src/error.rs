//! Error types for the control tree, layout and rendering.

use thiserror::Error;

use crate::control::ControlId;
use crate::types::{Point, Rect};

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by geometry, tree and drawing operations.
///
/// All of these are programming errors surfaced at the call site. None of
/// them is worth retrying.
#[derive(Debug, Error)]
pub enum Error {
    /// A negative width or height was used to build or mutate a size/rect.
    #[error("invalid geometry: width {width} and height {height} must be non-negative")]
    InvalidGeometry { width: i32, height: i32 },

    /// A cursor or cell position lies outside a drawing context.
    #[error("point ({}, {}) is outside {bounds:?}", point.x, point.y)]
    OutOfBounds { point: Point, bounds: Rect },

    /// A tree mutation would break the parent/child bookkeeping.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The control id does not refer to a live control.
    #[error("unknown control {0:?}")]
    UnknownControl(ControlId),

    /// Terminal I/O failed while flushing a frame.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}
