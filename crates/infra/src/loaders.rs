//! Report loaders: delimited files into the domain aggregates.

use std::path::Path;

use tracing::{info, warn};

use replen_core::IngestStats;
use replen_inventory::{InventorySnapshot, RawInventoryRow};
use replen_listings::ListingRow;
use replen_sales::{RawSaleRow, SalesLedger};

use crate::source::{DelimitedTable, SourceError, SourceKind, columns};

/// Read a sales report into per-SKU velocity.
///
/// Fails only if the file cannot be opened or lacks a required column;
/// malformed rows are dropped and counted in the ledger's stats.
pub fn load_sales_ledger(path: &Path) -> Result<SalesLedger, SourceError> {
    let table = DelimitedTable::open(SourceKind::Sales, path)?;
    let mut ledger = SalesLedger::new();

    let rows = table.decode_rows(|r| RawSaleRow {
        sku: r.get(columns::SKU),
        quantity: r.get(columns::QUANTITY),
        purchase_date: r.get(columns::PURCHASE_DATE),
    });
    for row in rows {
        match row {
            Ok(raw) => {
                let _ = ledger.ingest(&raw);
            }
            Err(e) => {
                warn!(source = "sales", error = %e, "undecodable record");
                ledger.reject_undecodable();
            }
        }
    }

    log_stats(SourceKind::Sales, path, ledger.stats(), ledger.len());
    Ok(ledger)
}

/// Read an inventory report into an on-hand snapshot (last row per SKU wins).
pub fn load_inventory_snapshot(path: &Path) -> Result<InventorySnapshot, SourceError> {
    let table = DelimitedTable::open(SourceKind::Inventory, path)?;
    let mut snapshot = InventorySnapshot::new();

    let rows = table.decode_rows(|r| RawInventoryRow {
        sku: r.get(columns::SKU),
        available: r.get(columns::AVAILABLE),
    });
    for row in rows {
        match row {
            Ok(raw) => {
                let _ = snapshot.ingest(&raw);
            }
            Err(e) => {
                warn!(source = "inventory", error = %e, "undecodable record");
                snapshot.reject_undecodable();
            }
        }
    }

    log_stats(SourceKind::Inventory, path, snapshot.stats(), snapshot.len());
    Ok(snapshot)
}

/// Read an all-listings report. Undecodable records are skipped.
pub fn load_listing_rows(path: &Path) -> Result<Vec<ListingRow>, SourceError> {
    let table = DelimitedTable::open(SourceKind::Listings, path)?;
    let mut skipped = 0usize;

    let rows: Vec<ListingRow> = table
        .decode_rows(|r| ListingRow {
            price: r.get(columns::PRICE),
            status: r.get(columns::STATUS),
            open_date: r.get(columns::OPEN_DATE),
        })
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(source = "listings", error = %e, "undecodable record");
                skipped += 1;
                None
            }
        })
        .collect();

    info!(path = %path.display(), rows = rows.len(), skipped, "listing report loaded");
    Ok(rows)
}

fn log_stats(kind: SourceKind, path: &Path, stats: IngestStats, skus: usize) {
    info!(
        source = kind.name(),
        path = %path.display(),
        rows_read = stats.rows_read,
        rows_accepted = stats.rows_accepted,
        rows_rejected = stats.rows_rejected,
        skus,
        "report loaded"
    );
}
