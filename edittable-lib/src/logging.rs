//! Logger setup
//!
//! The library only emits through the `log` facade. Embedders that want a
//! file log can install one here.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::Config;
use simplelog::WriteLogger;

use crate::error::Error;

/// Installs a global logger writing to `path` at `level`.
///
/// Fails if the file cannot be created or a logger is already installed.
pub fn init_file_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), Error> {
    let log_file = File::create(path)?;
    WriteLogger::init(level, Config::default(), log_file)?;
    log::debug!("file logger installed at {level}");
    Ok(())
}
