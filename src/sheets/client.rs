//! Sheets v4 REST client.
//!
//! Narrow surface, matching what a run actually needs: verify the
//! spreadsheet and worksheet exist, read the whole worksheet once, then
//! read and write single cells.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

use super::auth::{self, AccessToken};
use super::snapshot::{CellAddress, SheetSnapshot};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Single-cell access to a live worksheet.
///
/// The update loop only needs these two calls; keeping them behind a trait
/// lets the orchestrator run against an in-memory sheet in tests.
#[async_trait]
pub trait CellStore {
    async fn read_cell(&self, address: &CellAddress) -> Result<String>;
    async fn write_cell(&self, address: &CellAddress, value: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

pub struct SheetsClient {
    http: reqwest::Client,
    token: AccessToken,
    spreadsheet_id: String,
}

impl SheetsClient {
    /// Authorize and verify the spreadsheet is reachable.
    pub async fn connect(key_file: &Path, spreadsheet_id: &str) -> Result<Self> {
        let http = reqwest::Client::new();
        let token = auth::authorize(&http, key_file).await?;
        let client = Self {
            http,
            token,
            spreadsheet_id: spreadsheet_id.to_string(),
        };
        client
            .sheet_titles()
            .await
            .with_context(|| format!("Spreadsheet '{}' is not reachable", spreadsheet_id))?;
        Ok(client)
    }

    /// Bind to a worksheet by title; fails if the spreadsheet has no such tab.
    pub async fn worksheet(&self, title: &str) -> Result<Worksheet<'_>> {
        let titles = self.sheet_titles().await?;
        if !titles.iter().any(|t| t == title) {
            bail!(
                "Worksheet '{}' not found in spreadsheet (available: {})",
                title,
                titles.join(", ")
            );
        }
        Ok(Worksheet {
            client: self,
            title: title.to_string(),
        })
    }

    async fn sheet_titles(&self) -> Result<Vec<String>> {
        let url = format!(
            "{}/{}?fields=sheets.properties.title",
            API_BASE, self.spreadsheet_id
        );
        let meta: SpreadsheetMeta = self
            .http
            .get(&url)
            .bearer_auth(self.token.secret())
            .send()
            .await
            .context("Spreadsheet metadata request failed")?
            .error_for_status()
            .context("Spreadsheet metadata request was rejected")?
            .json()
            .await
            .context("Malformed spreadsheet metadata response")?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let url = format!(
            "{}/{}/values/{}",
            API_BASE,
            self.spreadsheet_id,
            urlencoding::encode(range)
        );
        let body: ValueRange = self
            .http
            .get(&url)
            .bearer_auth(self.token.secret())
            .send()
            .await
            .with_context(|| format!("Value read request failed for range '{}'", range))?
            .error_for_status()
            .with_context(|| format!("Value read was rejected for range '{}'", range))?
            .json()
            .await
            .context("Malformed value range response")?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(render_value).collect())
            .collect())
    }
}

/// The API returns cells as JSON values; anything non-string is rendered
/// the way it would display.
fn render_value(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub struct Worksheet<'a> {
    client: &'a SheetsClient,
    title: String,
}

impl Worksheet<'_> {
    pub fn title(&self) -> &str {
        &self.title
    }

    fn range(&self, a1: &str) -> String {
        format!("'{}'!{}", self.title, a1)
    }

    /// Read the entire worksheet once for this run.
    pub async fn snapshot(&self) -> Result<SheetSnapshot> {
        let values = self.client.get_values(&format!("'{}'", self.title)).await?;
        Ok(SheetSnapshot::from_values(values))
    }
}

#[async_trait]
impl<'a> CellStore for Worksheet<'a> {
    async fn read_cell(&self, address: &CellAddress) -> Result<String> {
        let values = self.client.get_values(&self.range(&address.to_string())).await?;
        Ok(values.into_iter().flatten().next().unwrap_or_default())
    }

    async fn write_cell(&self, address: &CellAddress, value: &str) -> Result<()> {
        let range = self.range(&address.to_string());
        let url = format!(
            "{}/{}/values/{}?valueInputOption=USER_ENTERED",
            API_BASE,
            self.client.spreadsheet_id,
            urlencoding::encode(&range)
        );
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [[value]],
        });
        self.client
            .http
            .put(&url)
            .bearer_auth(self.client.token.secret())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Cell update request failed for {}", address))?
            .error_for_status()
            .with_context(|| format!("Cell update was rejected for {}", address))?;
        Ok(())
    }
}
