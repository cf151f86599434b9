//! Run orchestration: connect, fetch, resolve, update.
//!
//! Failure policy: connection, bulk fetch, and column resolution failures
//! abort the run before anything is written; everything after that is
//! isolated per line item and recorded in the run report.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::catalog;
use crate::config::Config;
use crate::db::{self, DailyRecord};
use crate::report::{ItemOutcome, RunReport};
use crate::sheets::{
    CellAddress, CellStore, OWNER_HEADER, RowLookup, SheetSnapshot, SheetsClient, format_percent,
};

/// One full daily run against the live sheet and store.
pub async fn execute(config: &Config, date: NaiveDate) -> Result<RunReport> {
    log::info!("Connecting to Google Sheets.");
    let client = SheetsClient::connect(&config.credentials_file, &config.spreadsheet_id)
        .await
        .context("Google Sheets connection failed")?;
    let worksheet = client.worksheet(&config.worksheet_title).await?;
    let snapshot = worksheet
        .snapshot()
        .await
        .with_context(|| format!("Failed to read worksheet '{}'", worksheet.title()))?;
    log::info!("Success.");

    log::info!("Connecting to database.");
    let pool = db::connect(config).await?;
    log::info!("Success.");

    log::info!("Fetching capacity records for {}.", date);
    let records = db::fetch_daily_records(&pool, date).await?;
    log::info!("Success ({} records).", records.len());

    let items = catalog::resolve(&config.catalog, &pool, date).await?;
    if items.is_empty() {
        log::warn!("Catalog is empty; nothing to update.");
    } else {
        log::info!("Catalog has {} line items.", items.len());
    }

    let (value_column, owner_column) = resolve_columns(&snapshot, date)?;

    let report = update_line_items(
        &worksheet,
        &snapshot,
        items.items(),
        &records,
        &value_column,
        &owner_column,
        &config.authorized_owner,
    )
    .await;

    for (item, outcome) in report.outcomes() {
        if let ItemOutcome::OwnerMismatch { owner } = outcome {
            log::debug!("Skipped '{}' (row owned by '{}').", item, owner);
        }
    }

    log::info!("Run complete: {}.", report.summary());
    Ok(report)
}

/// The sheet names each date column without zero padding, e.g. "6/4/25".
pub fn date_column_header(date: NaiveDate) -> String {
    format!("{}/{}/{:02}", date.month(), date.day(), date.year() % 100)
}

/// Resolve the two columns every write needs. A sheet without today's date
/// column has no write path at all, so both misses are fatal.
fn resolve_columns(snapshot: &SheetSnapshot, date: NaiveDate) -> Result<(String, String)> {
    let date_header = date_column_header(date);
    let value_column = snapshot
        .column(&date_header)
        .with_context(|| format!("Sheet has no column for reporting date '{}'", date_header))?;
    let owner_column = snapshot
        .column(OWNER_HEADER)
        .with_context(|| format!("Sheet has no '{}' column", OWNER_HEADER))?;
    Ok((value_column, owner_column))
}

/// Sequential per-item update loop. Each item gets exactly one attempt; any
/// failure is recorded and the loop moves on.
pub async fn update_line_items(
    cells: &impl CellStore,
    snapshot: &SheetSnapshot,
    items: &[String],
    records: &HashMap<String, DailyRecord>,
    value_column: &str,
    owner_column: &str,
    authorized_owner: &str,
) -> RunReport {
    let lookup = RowLookup::build(snapshot);
    let mut report = RunReport::default();

    for item in items {
        let outcome = update_one(
            cells,
            &lookup,
            records,
            value_column,
            owner_column,
            authorized_owner,
            item,
        )
        .await;

        match &outcome {
            ItemOutcome::Updated { address, value } => {
                log::info!("Updated '{}': {} at {}.", item, value, address);
            }
            ItemOutcome::RowNotFound => {
                log::warn!("Could not locate '{}' in the sheet.", item);
            }
            ItemOutcome::NoData => {
                log::warn!("No capacity record for '{}' on the reporting date.", item);
            }
            ItemOutcome::OwnerReadFailed { error } => {
                log::warn!("Failed to read owner for '{}': {}", item, error);
            }
            ItemOutcome::WriteFailed { error } => {
                log::warn!("Failed to update '{}': {}", item, error);
            }
            // An owner mismatch is a deliberate skip, not a warning.
            ItemOutcome::OwnerMismatch { .. } => {}
        }
        report.record(item, outcome);
    }

    report
}

async fn update_one(
    cells: &impl CellStore,
    lookup: &RowLookup,
    records: &HashMap<String, DailyRecord>,
    value_column: &str,
    owner_column: &str,
    authorized_owner: &str,
    item: &str,
) -> ItemOutcome {
    let Some(row) = lookup.find(item) else {
        return ItemOutcome::RowNotFound;
    };
    let Some(record) = records.get(item.trim()) else {
        return ItemOutcome::NoData;
    };

    // The gate reads the live cell rather than the snapshot, so an owner
    // change during the run is honored.
    let owner_address = CellAddress::new(owner_column, row);
    let owner = match cells.read_cell(&owner_address).await {
        Ok(owner) => owner,
        Err(error) => {
            return ItemOutcome::OwnerReadFailed {
                error: format!("{:#}", error),
            };
        }
    };
    if owner.trim() != authorized_owner {
        return ItemOutcome::OwnerMismatch {
            owner: owner.trim().to_string(),
        };
    }

    let address = CellAddress::new(value_column, row);
    let value = format_percent(record.utilized_capacity);
    match cells.write_cell(&address, &value).await {
        Ok(()) => ItemOutcome::Updated { address, value },
        Err(error) => ItemOutcome::WriteFailed {
            error: format!("{:#}", error),
        },
    }
}
