//! The batch pipeline: reports in, ordered restock plan out.
//!
//! Each run owns its maps and is idempotent; re-running with the same inputs
//! rewrites the same artifact.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use replen_core::IngestStats;
use replen_listings::{ListingError, ListingSummary};
use replen_restock::{RestockError, RestockJob, RestockPlan};

use crate::config::RunConfig;
use crate::loaders::{load_inventory_snapshot, load_listing_rows, load_sales_ledger};
use crate::sink::{RecommendationSink, SinkError, SinkOutcome};
use crate::source::{SourceError, SourceKind};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Restock(#[from] RestockError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Listing(#[from] ListingError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub sales: IngestStats,
    pub inventory: IngestStats,
    pub plan: RestockPlan,
    pub outcome: SinkOutcome,
}

/// Load both reports, compute the plan, and hand it to `sink`.
///
/// Fails, without writing anything, when either report cannot be read or yields
/// no valid rows. Malformed rows never fail the run.
pub fn run_restock<S>(config: &RunConfig, sink: &S) -> Result<RunReport, RunError>
where
    S: RecommendationSink + ?Sized,
{
    config.restock.validate()?;

    info!(path = %config.sales_path.display(), "analyzing sales data");
    let sales = load_sales_ledger(&config.sales_path)?;
    if sales.is_empty() {
        return Err(SourceError::Empty {
            kind: SourceKind::Sales,
            path: config.sales_path.clone(),
        }
        .into());
    }

    info!(path = %config.inventory_path.display(), "analyzing inventory data");
    let inventory = load_inventory_snapshot(&config.inventory_path)?;
    if inventory.is_empty() {
        return Err(SourceError::Empty {
            kind: SourceKind::Inventory,
            path: config.inventory_path.clone(),
        }
        .into());
    }

    debug!(
        sales_skus = sales.len(),
        inventory_skus = inventory.len(),
        "joining sales velocity with inventory"
    );

    let plan = RestockJob::new(&sales, &inventory)
        .with_config(config.restock)
        .run()?;
    info!(flagged = plan.len(), "{}", plan.explanation());

    let outcome = sink.persist(&plan.recommendations)?;
    match &outcome {
        SinkOutcome::Written { rows, location } => {
            info!(rows, location = %location, "restock recommendations saved");
        }
        SinkOutcome::NothingToWrite => info!("no restock recommendations generated"),
    }

    Ok(RunReport {
        sales: sales.stats(),
        inventory: inventory.stats(),
        plan,
        outcome,
    })
}

/// Summarize an all-listings report.
pub fn summarize_listings(path: &Path) -> Result<ListingSummary, RunError> {
    let rows = load_listing_rows(path)?;
    Ok(ListingSummary::from_rows(&rows)?)
}
