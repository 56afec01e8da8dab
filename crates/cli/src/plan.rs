use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use replen_infra::{CsvRecommendationSink, RunConfig, SinkOutcome, run_restock};
use replen_restock::{DEFAULT_RESTOCK_THRESHOLD_DAYS, RestockConfig};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Read reports from <root>/BRANDS/<brand>/ instead of <root>/.
    #[arg(long, env = "REPLEN_BRAND")]
    brand: Option<String>,

    /// Base directory of the report layout.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Sales report (overrides the layout default).
    #[arg(long, env = "REPLEN_SALES")]
    sales: Option<PathBuf>,

    /// Inventory report (overrides the layout default).
    #[arg(long, env = "REPLEN_INVENTORY")]
    inventory: Option<PathBuf>,

    /// Output CSV (overrides the layout default).
    #[arg(long, env = "REPLEN_OUTPUT")]
    output: Option<PathBuf>,

    /// Target days of supply; SKUs below it are flagged.
    #[arg(
        long,
        env = "REPLEN_THRESHOLD_DAYS",
        default_value_t = DEFAULT_RESTOCK_THRESHOLD_DAYS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    threshold_days: u32,
}

impl PlanArgs {
    fn to_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.brand {
            Some(brand) => RunConfig::for_brand(&self.root, brand)?,
            None => RunConfig::rooted_at(&self.root),
        };
        if let Some(path) = &self.sales {
            config.sales_path = path.clone();
        }
        if let Some(path) = &self.inventory {
            config.inventory_path = path.clone();
        }
        if let Some(path) = &self.output {
            config.output_path = path.clone();
        }
        Ok(config.with_restock(RestockConfig::with_threshold_days(self.threshold_days)))
    }
}

pub fn run(args: &PlanArgs) -> anyhow::Result<()> {
    let config = args.to_config()?;
    tracing::debug!(?config, "resolved run configuration");

    let sink = CsvRecommendationSink::new(&config.output_path);
    let report = run_restock(&config, &sink).context("could not generate restock recommendations")?;

    match report.outcome {
        SinkOutcome::Written { rows, location } => {
            println!("{rows} restock recommendation(s) saved to {location}");
        }
        SinkOutcome::NothingToWrite => println!("No restock recommendations generated."),
    }
    Ok(())
}
