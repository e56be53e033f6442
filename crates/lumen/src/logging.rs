//! File logging, enabled by the `LUMEN_LOG` environment variable.
//!
//! The terminal is owned by the UI, so events go to `lumen.log` in the data
//! directory instead of stderr.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{OptionExt, WrapErr};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LUMEN_LOG";
const LOG_FILE: &str = "lumen.log";

/// Install the subscriber when `LUMEN_LOG` is set, returning the log path.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };
    let dir = lumen_config::data_dir().ok_or_eyre("no data directory for the log file")?;
    fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(Some(path))
}
