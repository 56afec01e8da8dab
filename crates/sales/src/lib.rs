//! Sales ledger module.
//!
//! Turns raw per-order sale rows into per-SKU sales velocity, implemented purely
//! as deterministic domain logic (no IO, no storage). Reading the rows off disk
//! is `replen-infra`'s job.

pub mod ledger;

pub use ledger::{RawSaleRow, SaleEvent, SaleRowError, SalesLedger, SalesVelocity, parse_sale_date};
