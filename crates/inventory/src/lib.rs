//! Inventory snapshot module.
//!
//! Point-in-time on-hand quantities per SKU, implemented purely as deterministic
//! domain logic (no IO, no storage).

pub mod snapshot;

pub use snapshot::{InventoryRowError, InventorySnapshot, RawInventoryRow, StockLevel};
