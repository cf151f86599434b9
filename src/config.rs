//! Environment-backed configuration.
//!
//! All settings come from the process environment (optionally seeded from a
//! `.env` file by the entry point). Validation is presence-only; anything
//! beyond that is checked where the value is used.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::catalog::CatalogSource;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_host: String,
    pub database_port: u16,
    pub database_name: String,
    pub database_user: String,
    pub database_password: String,
    /// Path to the service-account key file for the spreadsheet API.
    pub credentials_file: PathBuf,
    pub spreadsheet_id: String,
    pub worksheet_title: String,
    /// Only rows whose Owner cell exactly matches this string are updated.
    pub authorized_owner: String,
    pub catalog: CatalogSource,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = required("DATABASE_PORT")?;
        let port: u16 = port
            .parse()
            .with_context(|| format!("DATABASE_PORT is not a valid port number: '{port}'"))?;

        Ok(Self {
            database_host: required("DATABASE_HOST")?,
            database_port: port,
            database_name: required("DATABASE_NAME")?,
            database_user: required("DATABASE_WRITE_USER")?,
            database_password: required("DATABASE_WRITE_PASSWORD")?,
            credentials_file: required("GSHEET_CREDENTIALS_FILE")?.into(),
            spreadsheet_id: required("GSHEET_SPREADSHEET_ID")?,
            worksheet_title: required("GSHEET_WORKSHEET_TITLE")?,
            authorized_owner: required("AUTHORIZED_OWNER")?,
            catalog: CatalogSource::parse(env::var("LINE_ITEMS").ok()),
            log_file: env::var("LOG_FILE")
                .unwrap_or_else(|_| "daily_board_sync.log".to_string())
                .into(),
        })
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.database_user,
            self.database_password,
            self.database_host,
            self.database_port,
            self.database_name
        )
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing required environment variable: {key}"))
}
