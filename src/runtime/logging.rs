use std::error::Error;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install a file-backed `tracing` subscriber when `logging.file` is set.
///
/// `RUST_LOG` wins over `logging.level`. Returns whether a subscriber was
/// installed.
pub fn init(settings: &LoggingSettings) -> Result<bool, Box<dyn Error + Send + Sync>> {
    let Some(path) = settings.file.as_deref() else {
        return Ok(false);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()?;
    Ok(true)
}
