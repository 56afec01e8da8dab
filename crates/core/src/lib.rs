//! `replen-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod ingest;
pub mod sku;

pub use error::{DomainError, DomainResult};
pub use ingest::IngestStats;
pub use sku::Sku;
