//! Tracing setup for the command-line tool
//!
//! Logs go to stderr; stdout carries only the final confirmation line.

use std::path::Path;
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. With `log_file`, output is also
/// appended to that file.
pub fn init(level: &str, log_file: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr.and(file))
                .with_env_filter(filter)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .compact()
                .init();
        }
    }

    Ok(())
}
