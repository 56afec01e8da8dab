//! `replen-restock`
//!
//! **Responsibility:** the restock recommendation engine.
//!
//! Joins per-SKU sales velocity with on-hand inventory, estimates days of supply,
//! and emits a thresholded list ordered by urgency:
//! - It performs no IO; inputs are built by callers (infra/CLI).
//! - Output is deterministic: identical inputs produce identical plans.

pub mod config;
pub mod job;
pub mod plan;
pub mod recommendation;

pub use config::{DEFAULT_RESTOCK_THRESHOLD_DAYS, RestockConfig};
pub use job::RestockJob;
pub use plan::{RestockError, RestockPlan};
pub use recommendation::RestockRecommendation;
