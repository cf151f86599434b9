//! Append-only file logging.
//!
//! Every run appends `timestamp [LEVEL] message` lines to the configured
//! log file and finishes with a dashed banner so consecutive runs are easy
//! to tell apart when tailing the file.

use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Builder::new()
        .target(Target::Pipe(Box::new(file)))
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    Ok(())
}

/// End-of-run divider.
pub fn banner() {
    log::info!("{}", "-".repeat(110));
}
