//! Delimited report reading.
//!
//! Opens a CSV/TSV export, resolves header names to column indexes and checks
//! that the columns a report kind needs are present. Row-level problems are not
//! errors here; they surface per record so parsers can drop and count them.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use thiserror::Error;

/// Column names used by the supported reports.
pub mod columns {
    pub const SKU: &str = "sku";
    pub const QUANTITY: &str = "quantity";
    pub const PURCHASE_DATE: &str = "purchase-date";
    pub const AVAILABLE: &str = "available";
    pub const PRICE: &str = "price";
    pub const STATUS: &str = "status";
    pub const OPEN_DATE: &str = "open-date";
}

/// Which input a table came from; used to attribute failures.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Sales,
    Inventory,
    Listings,
}

impl SourceKind {
    pub fn name(self) -> &'static str {
        match self {
            SourceKind::Sales => "sales",
            SourceKind::Inventory => "inventory",
            SourceKind::Listings => "listings",
        }
    }

    /// Columns without which every row of the report would be discarded.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            SourceKind::Sales => &[columns::SKU, columns::QUANTITY, columns::PURCHASE_DATE],
            SourceKind::Inventory => &[columns::SKU, columns::AVAILABLE],
            SourceKind::Listings => &[],
        }
    }
}

impl core::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{kind} source unavailable at {}: {source}", .path.display())]
    Unavailable {
        kind: SourceKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{kind} source at {} could not be read: {source}", .path.display())]
    Malformed {
        kind: SourceKind,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{kind} source at {} is missing required column {column:?}", .path.display())]
    MissingColumn {
        kind: SourceKind,
        path: PathBuf,
        column: String,
    },

    #[error("{kind} source at {} contains no valid rows", .path.display())]
    Empty { kind: SourceKind, path: PathBuf },
}

impl SourceError {
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceError::Unavailable { kind, .. }
            | SourceError::Malformed { kind, .. }
            | SourceError::MissingColumn { kind, .. }
            | SourceError::Empty { kind, .. } => *kind,
        }
    }
}

/// Field delimiter by file extension: tab for `.tsv`/`.txt`, comma otherwise.
pub fn delimiter_for(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("tsv") | Some("txt") => b'\t',
        _ => b',',
    }
}

/// One decoded record with by-name field access.
#[derive(Debug)]
pub struct Record<'t> {
    columns: &'t HashMap<String, usize>,
    record: &'t StringRecord,
}

impl Record<'_> {
    /// Field value, or `None` if the column is unknown or the row is short.
    pub fn get(&self, column: &str) -> Option<String> {
        self.columns
            .get(column)
            .and_then(|idx| self.record.get(*idx))
            .map(str::to_string)
    }
}

/// An opened report with validated headers.
#[derive(Debug)]
pub struct DelimitedTable {
    reader: csv::Reader<File>,
    columns: HashMap<String, usize>,
}

impl DelimitedTable {
    pub fn open(kind: SourceKind, path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path).map_err(|source| SourceError::Unavailable {
            kind,
            path: path.clone(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter_for(&path))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|source| SourceError::Malformed {
                kind,
                path: path.clone(),
                source,
            })?
            .clone();
        let columns = build_column_map(&headers);

        if let Some(missing) = kind
            .required_columns()
            .iter()
            .find(|c| !columns.contains_key(**c))
        {
            return Err(SourceError::MissingColumn {
                kind,
                path,
                column: (*missing).to_string(),
            });
        }

        Ok(Self { reader, columns })
    }

    /// Decode every data record with `decode`.
    ///
    /// A record the reader cannot parse (e.g. invalid UTF-8) is yielded as `Err`
    /// and does not stop iteration.
    pub fn decode_rows<T, F>(self, mut decode: F) -> impl Iterator<Item = Result<T, csv::Error>>
    where
        F: FnMut(&Record<'_>) -> T,
    {
        let columns = self.columns;
        self.reader.into_records().map(move |result| {
            result.map(|record| {
                decode(&Record {
                    columns: &columns,
                    record: &record,
                })
            })
        })
    }
}

fn build_column_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        // Spreadsheet exports sometimes prefix the first header with a BOM.
        .map(|(idx, name)| (name.trim().trim_start_matches('\u{feff}').to_string(), idx))
        .collect()
}
