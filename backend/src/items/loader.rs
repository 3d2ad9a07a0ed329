//! Item catalog loaders for CSV files and spreadsheet workbooks
//!
//! Header names are matched case- and whitespace-insensitively. Required
//! columns (normalized): `item`, `regprice`, `stdcost`. Every other column
//! is carried through as a display attribute.
//!
//! Numeric cells accept plain decimals or currency text (`$1,234.50`).
//! Empty or unparseable cells are kept as `Missing` / `Malformed` and only
//! fail when a formula needs them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{info, warn};

use super::catalog::ItemCatalog;
use crate::error::RmaError;
use crate::models::{ItemAttribute, ItemRecord};

/// Required column names, after normalization, in reporting order
pub const REQUIRED_COLUMNS: [&str; 3] = ["item", "regprice", "stdcost"];

/// Lower-case and drop all whitespace: `" Reg Price "` -> `"regprice"`
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl ItemCatalog {
    /// Load a catalog from CSV text with a header row
    ///
    /// # Errors
    /// - `RmaError::MissingColumns` listing every absent required column;
    ///   no partial catalog is produced
    /// - `RmaError::CatalogRead` for unreadable input
    ///
    /// # Example
    /// ```
    /// use rma_calculator_core_rs::{ItemCatalog, ItemLookup};
    ///
    /// let csv = "Item,RegPrice,StdCost,On Hand\nSKU-1,100.00,40.00,7\n";
    /// let catalog = ItemCatalog::from_csv_reader(csv.as_bytes()).unwrap();
    /// let item = catalog.get_item("SKU-1").unwrap();
    /// assert_eq!(item.attribute("onhand"), Some("7"));
    /// ```
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<ItemCatalog, RmaError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
        let rows = csv_reader.records().map(|record| {
            record
                .map(|r| r.iter().map(String::from).collect::<Vec<_>>())
                .map_err(RmaError::from)
        });
        build_catalog(headers, rows)
    }

    /// Load a catalog from a CSV file
    ///
    /// # Errors
    /// As [`ItemCatalog::from_csv_reader`]; an unopenable file is
    /// `RmaError::CatalogRead` naming the path.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<ItemCatalog, RmaError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            RmaError::CatalogRead(format!("failed to open '{}': {}", path.display(), e))
        })?;
        Self::from_csv_reader(file)
    }

    /// Load a catalog from the first sheet of a workbook
    ///
    /// The first row of the sheet is the header row. Numeric cells are read
    /// through their shortest decimal text, so `100` and `40.5` load the
    /// same as they would from CSV. `.xls` and `.ods` workbooks are also
    /// accepted.
    ///
    /// # Errors
    /// - `RmaError::MissingColumns` as for CSV; an empty sheet is missing
    ///   every required column
    /// - `RmaError::CatalogRead` if the workbook cannot be opened or has no
    ///   sheets
    pub fn from_xlsx_path(path: impl AsRef<Path>) -> Result<ItemCatalog, RmaError> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            RmaError::CatalogRead(format!("failed to open '{}': {}", path.display(), e))
        })?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                RmaError::CatalogRead(format!("workbook '{}' has no sheets", path.display()))
            })?
            .map_err(|e| RmaError::CatalogRead(e.to_string()))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
        let headers = rows.next().unwrap_or_default();
        build_catalog(headers, rows.map(Ok))
    }

    /// Load a catalog, choosing the reader by file extension
    ///
    /// `.xlsx`, `.xlsm`, `.xls` and `.ods` go through
    /// [`ItemCatalog::from_xlsx_path`]; anything else is read as CSV.
    pub fn from_path(path: impl AsRef<Path>) -> Result<ItemCatalog, RmaError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xls" | "ods") => Self::from_xlsx_path(path),
            _ => Self::from_csv_path(path),
        }
    }
}

fn cell_text(cell: &Data) -> String {
    cell.to_string().trim().to_string()
}

/// Shared row pipeline for every catalog source
///
/// `headers` are raw header cells; rows are raw cell text in header order.
/// Line numbers in log events count the header as line 1.
fn build_catalog<I>(headers: Vec<String>, rows: I) -> Result<ItemCatalog, RmaError>
where
    I: Iterator<Item = Result<Vec<String>, RmaError>>,
{
    let columns: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

    let position = |name: &str| columns.iter().position(|c| c == name);
    let missing: Vec<String> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|name| position(name).is_none())
        .map(String::from)
        .collect();

    let (item_idx, price_idx, cost_idx) =
        match (position("item"), position("regprice"), position("stdcost")) {
            (Some(i), Some(p), Some(c)) if missing.is_empty() => (i, p, c),
            _ => return Err(RmaError::MissingColumns { missing }),
        };

    let mut catalog = ItemCatalog::default();
    for (row_idx, record) in rows.enumerate() {
        let record = record?;
        let line = row_idx + 2;
        let cell = |idx: usize| record.get(idx).map(String::as_str).unwrap_or("");

        let item_id = cell(item_idx);
        if item_id.is_empty() {
            warn!(line, "skipping catalog row without item id");
            continue;
        }

        let price = ItemAttribute::parse(cell(price_idx));
        let cost = ItemAttribute::parse(cell(cost_idx));
        for (field, attr) in [("regprice", &price), ("stdcost", &cost)] {
            if let ItemAttribute::Malformed(raw) = attr {
                warn!(line, item_id, field, raw = raw.as_str(), "non-numeric catalog cell");
            }
        }

        let mut item = ItemRecord::from_attributes(item_id, price, cost);
        for (idx, header) in columns.iter().enumerate() {
            if idx == item_idx || idx == price_idx || idx == cost_idx {
                continue;
            }
            item.push_attribute(header.as_str(), cell(idx));
        }
        catalog.insert(item);
    }

    info!(
        items = catalog.len(),
        columns = columns.len(),
        "loaded item catalog"
    );
    Ok(catalog.with_columns(columns))
}
