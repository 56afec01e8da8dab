use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use replen_core::{IngestStats, Sku};

/// One raw row of an inventory report, as read off disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInventoryRow {
    pub sku: Option<String>,
    pub available: Option<String>,
}

impl RawInventoryRow {
    pub fn new(sku: impl Into<String>, available: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into()),
            available: Some(available.into()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryRowError {
    #[error("missing sku")]
    MissingSku,

    #[error("invalid available quantity: {0:?}")]
    InvalidAvailable(String),

    #[error("available quantity cannot be negative (got {0})")]
    NegativeAvailable(i64),
}

/// Validated on-hand quantity for one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub sku: Sku,
    pub available_quantity: u64,
}

impl StockLevel {
    pub fn parse(row: &RawInventoryRow) -> Result<Self, InventoryRowError> {
        let sku = row
            .sku
            .as_deref()
            .and_then(|s| Sku::parse(s).ok())
            .ok_or(InventoryRowError::MissingSku)?;

        let raw = row.available.as_deref().unwrap_or_default().trim();
        let available: i64 = raw
            .parse()
            .map_err(|_| InventoryRowError::InvalidAvailable(raw.to_string()))?;
        if available < 0 {
            return Err(InventoryRowError::NegativeAvailable(available));
        }

        Ok(Self {
            sku,
            available_quantity: available.unsigned_abs(),
        })
    }
}

/// On-hand quantity per SKU.
///
/// A snapshot, not a ledger: when a SKU appears more than once the last row wins.
/// SKUs absent from the snapshot read as zero available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySnapshot {
    levels: BTreeMap<Sku, u64>,
    stats: IngestStats,
}

impl InventorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawInventoryRow>,
    {
        let mut snapshot = Self::new();
        for row in rows {
            let _ = snapshot.ingest(&row);
        }
        snapshot
    }

    pub fn ingest(&mut self, row: &RawInventoryRow) -> Result<(), InventoryRowError> {
        match StockLevel::parse(row) {
            Ok(level) => {
                self.stats.accept();
                self.set(level);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "discarding inventory row");
                self.stats.reject();
                Err(e)
            }
        }
    }

    pub fn reject_undecodable(&mut self) {
        self.stats.reject();
    }

    /// Overwrite the level for a SKU.
    pub fn set(&mut self, level: StockLevel) {
        self.levels.insert(level.sku, level.available_quantity);
    }

    /// Available quantity, zero for unknown SKUs.
    pub fn available(&self, sku: &Sku) -> u64 {
        self.levels.get(sku).copied().unwrap_or(0)
    }

    pub fn contains(&self, sku: &Sku) -> bool {
        self.levels.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }
}
