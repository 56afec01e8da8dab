//! Listing report summary.
//!
//! Aggregate statistics over an all-listings export: item count, price range,
//! status distribution and open-date range. Pure computation; rows are supplied
//! by `replen-infra`.

pub mod summary;

pub use summary::{ListingError, ListingRow, ListingSummary, OpenDateRange, PriceStats};
