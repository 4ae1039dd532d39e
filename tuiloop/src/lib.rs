//! Event loop runtime on top of `tuitree`.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod queue;

pub use app::{AppContext, Application, Handler};
pub use config::{ConfigError, RuntimeConfig};
pub use error::{extract_panic_message, Result, RuntimeError};
pub use logging::init_logging;
pub use queue::{Action, ActionSender};
