use std::fs::File;

use simplelog::{Config, WriteLogger};

use crate::config::RuntimeConfig;
use crate::error::Result;

/// Install a file logger when the configuration names a log file.
///
/// Returns whether a logger was installed. Fails if another logger is
/// already set.
pub fn init_logging(config: &RuntimeConfig) -> Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };
    let log_file = File::create(path)?;
    WriteLogger::init(config.log_level, Config::default(), log_file)?;
    log::info!("logging to {}", path.display());
    Ok(true)
}
