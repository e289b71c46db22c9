//! Tracing setup.
//!
//! The terminal belongs to the UI, so events go to `flappy.log` in the data
//! directory. `FLAPPY_LOG` takes an `EnvFilter` directive (default `info`).

use crate::core::constants::LOG_FILENAME;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FLAPPY_LOG";

/// Install the global subscriber writing to `<dir>/flappy.log`.
///
/// Fails if the log file cannot be opened or a subscriber is already set;
/// the caller treats either as "run without logs".
pub fn init(dir: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILENAME))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}
