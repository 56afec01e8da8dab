use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use replen_core::{IngestStats, Sku};

/// Format of the leading date token in a purchase timestamp.
const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

/// One raw row of a sales report, as read off disk (all fields untrusted).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSaleRow {
    pub sku: Option<String>,
    pub quantity: Option<String>,
    /// Purchase timestamp, e.g. `2024-01-01` or `2024-01-01 10:15:00 PDT`.
    pub purchase_date: Option<String>,
}

impl RawSaleRow {
    pub fn new(
        sku: impl Into<String>,
        quantity: impl Into<String>,
        purchase_date: impl Into<String>,
    ) -> Self {
        Self {
            sku: Some(sku.into()),
            quantity: Some(quantity.into()),
            purchase_date: Some(purchase_date.into()),
        }
    }
}

/// Why a raw sale row was discarded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaleRowError {
    #[error("missing sku")]
    MissingSku,

    #[error("invalid quantity: {0:?}")]
    InvalidQuantity(String),

    #[error("quantity must be positive (got {0})")]
    NonPositiveQuantity(i64),

    #[error("missing purchase date")]
    MissingDate,

    #[error("invalid purchase date: {0:?}")]
    InvalidDate(String),
}

/// A validated sale: one SKU, a positive quantity, one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEvent {
    pub sku: Sku,
    pub quantity: u64,
    pub sale_date: NaiveDate,
}

impl SaleEvent {
    /// Validate a raw row.
    ///
    /// Checks run in order: SKU, quantity, then date.
    pub fn parse(row: &RawSaleRow) -> Result<Self, SaleRowError> {
        let sku = row
            .sku
            .as_deref()
            .and_then(|s| Sku::parse(s).ok())
            .ok_or(SaleRowError::MissingSku)?;

        let raw_quantity = row.quantity.as_deref().unwrap_or_default().trim();
        let quantity: i64 = raw_quantity
            .parse()
            .map_err(|_| SaleRowError::InvalidQuantity(raw_quantity.to_string()))?;
        if quantity <= 0 {
            return Err(SaleRowError::NonPositiveQuantity(quantity));
        }

        let sale_date = match row.purchase_date.as_deref() {
            Some(raw) => parse_sale_date(raw)?,
            None => return Err(SaleRowError::MissingDate),
        };

        Ok(Self {
            sku,
            quantity: quantity.unsigned_abs(),
            sale_date,
        })
    }
}

/// Parse the calendar date out of a purchase timestamp.
///
/// Only the leading whitespace-delimited token is used; any trailing time or
/// timezone token is discarded.
pub fn parse_sale_date(raw: &str) -> Result<NaiveDate, SaleRowError> {
    let token = raw.split_whitespace().next().ok_or(SaleRowError::MissingDate)?;
    NaiveDate::parse_from_str(token, SALE_DATE_FORMAT)
        .map_err(|_| SaleRowError::InvalidDate(token.to_string()))
}

/// Per-SKU sales velocity inputs.
///
/// Only created from a valid [`SaleEvent`], so `distinct_days_with_sales() >= 1`
/// for every instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesVelocity {
    sku: Sku,
    total_quantity_sold: u64,
    sale_dates: BTreeSet<NaiveDate>,
}

impl SalesVelocity {
    fn from_event(event: SaleEvent) -> Self {
        Self {
            sku: event.sku,
            total_quantity_sold: event.quantity,
            sale_dates: BTreeSet::from([event.sale_date]),
        }
    }

    fn record(&mut self, quantity: u64, sale_date: NaiveDate) {
        self.total_quantity_sold = self.total_quantity_sold.saturating_add(quantity);
        self.sale_dates.insert(sale_date);
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn total_quantity_sold(&self) -> u64 {
        self.total_quantity_sold
    }

    /// Number of unique calendar dates with at least one sale (not order count).
    pub fn distinct_days_with_sales(&self) -> usize {
        self.sale_dates.len()
    }
}

/// Sales velocity per SKU, built once per run from the whole sales report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesLedger {
    velocities: BTreeMap<Sku, SalesVelocity>,
    stats: IngestStats,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from raw rows; malformed rows are counted and dropped.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawSaleRow>,
    {
        let mut ledger = Self::new();
        for row in rows {
            // Rejections are already counted in `stats`.
            let _ = ledger.ingest(&row);
        }
        ledger
    }

    /// Validate one raw row and fold it into the ledger.
    pub fn ingest(&mut self, row: &RawSaleRow) -> Result<(), SaleRowError> {
        match SaleEvent::parse(row) {
            Ok(event) => {
                self.stats.accept();
                self.record(event);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "discarding sale row");
                self.stats.reject();
                Err(e)
            }
        }
    }

    /// Count a row that could not even be decoded into a [`RawSaleRow`].
    pub fn reject_undecodable(&mut self) {
        self.stats.reject();
    }

    /// Fold an already-validated sale into the ledger.
    pub fn record(&mut self, event: SaleEvent) {
        match self.velocities.get_mut(&event.sku) {
            Some(velocity) => velocity.record(event.quantity, event.sale_date),
            None => {
                self.velocities
                    .insert(event.sku.clone(), SalesVelocity::from_event(event));
            }
        }
    }

    pub fn get(&self, sku: &Sku) -> Option<&SalesVelocity> {
        self.velocities.get(sku)
    }

    /// Velocities in SKU order.
    pub fn iter(&self) -> impl Iterator<Item = &SalesVelocity> {
        self.velocities.values()
    }

    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }
}
