//! Infrastructure layer: report files, output sinks, run configuration, and the
//! batch pipeline that wires them to the domain crates.

pub mod config;
pub mod loaders;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use config::{ConfigError, RunConfig, brand_dir, listing_report_for_brand};
pub use loaders::{load_inventory_snapshot, load_listing_rows, load_sales_ledger};
pub use pipeline::{RunError, RunReport, run_restock, summarize_listings};
pub use sink::{
    CsvRecommendationSink, InMemoryRecommendationSink, RecommendationSink, SinkError, SinkOutcome,
};
pub use source::{DelimitedTable, SourceError, SourceKind};

#[cfg(test)]
mod integration_tests;
