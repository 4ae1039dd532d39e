//! Runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;
use thiserror::Error;
use tuitree::{Color, ColorPair};

/// Environment variable naming the log file.
pub const LOG_FILE_VAR: &str = "TUILOOP_LOG_FILE";
/// Environment variable holding the log level (`off`, `error` .. `trace`).
pub const LOG_LEVEL_VAR: &str = "TUILOOP_LOG_LEVEL";

/// Settings for one [`crate::Application`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// How long one loop iteration waits for input.
    pub poll_timeout: Duration,

    /// Screen colours used where no control sets one.
    pub colors: ColorPair,

    /// Show the terminal cursor while running.
    pub cursor_visible: bool,

    /// Write logs here. No logger is installed when unset, since the
    /// terminal itself belongs to the UI.
    pub log_file: Option<PathBuf>,

    pub log_level: LevelFilter,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(50),
            colors: ColorPair::new(Color::Black, Color::White),
            cursor_visible: false,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `TUILOOP_LOG_FILE` and `TUILOOP_LOG_LEVEL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`RuntimeConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = lookup(LOG_FILE_VAR).filter(|p| !p.is_empty()) {
            config.log_file = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            config.log_level = level
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidLogLevel(level.clone()))?;
        }
        Ok(config)
    }

    /// Set the input poll timeout.
    pub fn poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Set the screen default colours.
    pub fn colors(mut self, background: Color, foreground: Color) -> Self {
        self.colors = ColorPair::new(background, foreground);
        self
    }

    pub fn cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    /// Log to `path` at `level`.
    pub fn log_to(mut self, path: impl Into<PathBuf>, level: LevelFilter) -> Self {
        self.log_file = Some(path.into());
        self.log_level = level;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_timeout.is_zero() {
            return Err(ConfigError::ZeroPollTimeout);
        }
        Ok(())
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A zero timeout would turn the loop into a busy wait.
    #[error("poll timeout must be greater than zero")]
    ZeroPollTimeout,

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_overlays_log_settings() {
        let config = RuntimeConfig::from_lookup(|key| match key {
            LOG_FILE_VAR => Some("/tmp/tuiloop.log".to_string()),
            LOG_LEVEL_VAR => Some("Debug".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/tuiloop.log")));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn missing_variables_keep_defaults() {
        let config = RuntimeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.log_file, None);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = RuntimeConfig::from_lookup(|key| {
            (key == LOG_LEVEL_VAR).then(|| "loud".to_string())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("loud".to_string()));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = RuntimeConfig::new().poll_timeout(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollTimeout));
        assert!(RuntimeConfig::new().validate().is_ok());
    }
}
