//! Tracing setup.
//!
//! The terminal belongs to the UI while a session runs, so logs only ever go
//! to a file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Map a `-v` count to a level name: 0=error, 1=warn, 2=info, 3=debug, 4+=trace
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber, appending to `log_file`.
///
/// `RUST_LOG` wins over `verbosity` when set. Fails if a subscriber is
/// already installed.
pub fn init_logging(verbosity: u8, log_file: &Path) -> Result<()> {
    let level = level_for(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("typeghost={level}")));

    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_file(verbosity >= 3)
                .with_line_number(verbosity >= 3),
        )
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })
}
