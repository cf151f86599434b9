//! Daily capacity board sync.
//!
//! Pushes one day's equipment-utilization metrics from the capacity store
//! into fixed cells of the shared status board spreadsheet. Intended to be
//! triggered once per day by an external scheduler; all outcomes are
//! observable through the log file only.

mod catalog;
mod config;
mod db;
mod logging;
mod report;
mod run;
mod sheets;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "huddle-sync", version, about)]
struct Args {
    /// Reporting date override (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = Config::from_env().context("Invalid configuration")?;
    logging::init(&config.log_file)?;

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    // An aborted run is logged, not surfaced through the exit code; the
    // scheduler treats every invocation as fire-and-forget.
    if let Err(error) = run::execute(&config, date).await {
        log::error!("Run aborted: {:#}", error);
    }

    logging::banner();
    Ok(())
}
