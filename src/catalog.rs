//! Metric catalog: the line items the run reports on.
//!
//! The catalog is either a configured list (`LINE_ITEMS`, comma-separated),
//! the built-in default list, or the distinct line items stored for the
//! reporting date (`LINE_ITEMS=auto`).

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::db;

/// Line items tracked on the board when `LINE_ITEMS` is not configured.
const DEFAULT_LINE_ITEMS: &[&str] = &[
    "NextSeq 550 Utilization",
    "NovaSeq 6000 Utilization",
    "NovaSeq X+ Utilization",
    "QiaSymphony Utilization",
    "BSM Onco Liquid - Avanti J-15R Centrifuge",
    "G360 CDX v2.11 STARlet Utilization",
    "G360 CDX v2.11 STAR Utilization",
    "G360 LDT STAR-PRE Utilization",
    "G360 LDT STAR-POST Utilization",
    "Reveal EP1 Pre-STAR Utilization",
    "Reveal EP1 Post STAR Utilization",
    "Tissue v2 AutoLys",
    "Tissue v2 RNA STAR-Pre",
    "Tissue v2 DNA STAR-Pre",
    "Tissue v2 STAR-Post",
    "Tissue v2 King Fisher - RNA",
    "Tissue v2 King Fisher - DNA",
    "Screening NovaSeq Utilization",
    "Screening QiaSymphony Utilization",
    "Screening EZ-Blood Utilization",
    "Screening STAR-PRE Utilization",
    "Screening STAR-POST Utilization",
    "Histology - Sakura embedding station",
    "Histology - Sakura Auto Stainer",
    "Histology - Dako Auto Stainer",
    "Histology - Leica Scanner",
    "Histology - Leica Microtome",
    "Histology - Olympus Microscope",
];

/// Where the catalog comes from, parsed from the `LINE_ITEMS` variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// No configuration: use the built-in list.
    Default,
    /// Explicit comma-separated list from the environment.
    Fixed(Vec<String>),
    /// Derive from the distinct line items stored for the reporting date.
    FromStore,
}

impl CatalogSource {
    pub fn parse(raw: Option<String>) -> Self {
        match raw {
            None => CatalogSource::Default,
            Some(value) if value.trim() == "auto" => CatalogSource::FromStore,
            Some(value) => {
                let items: Vec<String> = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if items.is_empty() {
                    CatalogSource::Default
                } else {
                    CatalogSource::Fixed(items)
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<String>,
}

impl Catalog {
    /// Build from explicit names; entries are trimmed and blanks dropped.
    pub fn fixed(items: Vec<String>) -> Self {
        let items = items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { items }
    }

    pub fn default_items() -> Self {
        Self::fixed(DEFAULT_LINE_ITEMS.iter().map(|s| s.to_string()).collect())
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Resolve the catalog for one run.
pub async fn resolve(source: &CatalogSource, pool: &PgPool, date: NaiveDate) -> Result<Catalog> {
    match source {
        CatalogSource::Default => Ok(Catalog::default_items()),
        CatalogSource::Fixed(items) => Ok(Catalog::fixed(items.clone())),
        CatalogSource::FromStore => {
            Ok(Catalog::fixed(db::distinct_line_items(pool, date).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_source_parse() {
        assert_eq!(CatalogSource::parse(None), CatalogSource::Default);
        assert_eq!(
            CatalogSource::parse(Some("auto".to_string())),
            CatalogSource::FromStore
        );
        assert_eq!(
            CatalogSource::parse(Some(" A , B ,".to_string())),
            CatalogSource::Fixed(vec!["A".to_string(), "B".to_string()])
        );
        // A list of only separators falls back to the default.
        assert_eq!(CatalogSource::parse(Some(" , ".to_string())), CatalogSource::Default);
    }

    #[test]
    fn test_catalog_fixed_trims_and_drops_blanks() {
        let catalog = Catalog::fixed(vec![
            " NextSeq 550 Utilization ".to_string(),
            "".to_string(),
            "QiaSymphony Utilization".to_string(),
        ]);
        assert_eq!(
            catalog.items(),
            &[
                "NextSeq 550 Utilization".to_string(),
                "QiaSymphony Utilization".to_string()
            ]
        );
    }

    #[test]
    fn test_default_catalog_is_not_empty() {
        assert!(!Catalog::default_items().is_empty());
    }
}
