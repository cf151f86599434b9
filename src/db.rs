//! Postgres access for daily capacity records.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::collections::HashMap;

use crate::config::Config;

/// One stored (line item, upload date) measurement. Read-only to this tool.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyRecord {
    pub gsheet_line_item: String,
    /// Fraction of capacity utilized, conceptually in [0, 1].
    pub utilized_capacity: f64,
    pub upload_date: NaiveDate,
}

pub async fn connect(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url())
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database '{}' at {}:{}",
                config.database_name, config.database_host, config.database_port
            )
        })?;
    Ok(pool)
}

/// Fetch the day's records, keyed by trimmed line-item name.
///
/// Duplicate names for the same date keep the first row returned.
pub async fn fetch_daily_records(
    pool: &PgPool,
    date: NaiveDate,
) -> Result<HashMap<String, DailyRecord>> {
    let rows: Vec<DailyRecord> = sqlx::query_as(
        "SELECT gsheet_line_item, utilized_capacity, upload_date
         FROM capacity.silver_capacity_output
         WHERE upload_date = $1",
    )
    .bind(date)
    .fetch_all(pool)
    .await
    .context("Failed to fetch daily capacity records")?;

    let mut records = HashMap::new();
    for row in rows {
        records
            .entry(row.gsheet_line_item.trim().to_string())
            .or_insert(row);
    }
    Ok(records)
}

/// Distinct line items stored for a date, for the `LINE_ITEMS=auto` catalog.
pub async fn distinct_line_items(pool: &PgPool, date: NaiveDate) -> Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT DISTINCT gsheet_line_item
         FROM capacity.silver_capacity_output
         WHERE upload_date = $1
         ORDER BY gsheet_line_item",
    )
    .bind(date)
    .fetch_all(pool)
    .await
    .context("Failed to list line items for date")?;

    Ok(rows
        .into_iter()
        .map(|(name,)| name.trim().to_string())
        .collect())
}
