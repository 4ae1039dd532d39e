//! Runtime error types.

use std::any::Any;
use std::io;

use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that end the event loop.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Tree(#[from] tuitree::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// A paint callback panicked during a frame.
    #[error("paint callback panicked: {message}")]
    PaintPanicked { message: String },
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
