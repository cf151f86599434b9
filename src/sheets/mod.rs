//! Spreadsheet side: service-account auth, Sheets v4 REST client, and the
//! pure coordinate-resolution logic over a one-shot sheet snapshot.

pub mod auth;
pub mod client;
pub mod resolve;
pub mod snapshot;

pub use client::{CellStore, SheetsClient, Worksheet};
pub use resolve::{RowLookup, column_letter, format_percent};
pub use snapshot::{CellAddress, HEADER_ROW_OFFSET, OWNER_HEADER, SheetSnapshot};
