//! File logging.
//!
//! The terminal belongs to the game screen, so log records go to a file.
//! Without a file nothing is logged.

use crate::config::LogConfig;
use crate::error::{DinoError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// `RUST_LOG` wins over the configured filter.
pub fn effective_filter(config: &LogConfig) -> String {
    match std::env::var("RUST_LOG") {
        Ok(filter) if !filter.trim().is_empty() => filter,
        _ => config.filter.clone(),
    }
}

/// Initialize the global logger once. Later calls are ignored.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DinoError::Config(format!("log file {}: {}", path.display(), e)))?;
    let target: Box<dyn Write + Send> = Box::new(file);
    let filter = effective_filter(config);

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(env_logger::WriteStyle::Never);
        builder.target(env_logger::Target::Pipe(target));
        if builder.try_init().is_ok() {
            log::debug!("logging initialized ({})", filter);
        }
    });
    Ok(())
}
