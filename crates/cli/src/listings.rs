use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use replen_infra::{listing_report_for_brand, summarize_listings};

#[derive(Args, Debug)]
pub struct ListingsArgs {
    /// All-listings report (tab-delimited for .tsv/.txt, comma otherwise).
    #[arg(required_unless_present = "brand", conflicts_with = "brand")]
    path: Option<PathBuf>,

    /// Read <root>/BRANDS/<brand>/all-listing-report.tsv instead of PATH.
    #[arg(long)]
    brand: Option<String>,

    /// Base directory of the brand layout.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

impl ListingsArgs {
    fn report_path(&self) -> anyhow::Result<PathBuf> {
        match (&self.path, &self.brand) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(brand)) => Ok(listing_report_for_brand(&self.root, brand)?),
            (None, None) => anyhow::bail!("either a report path or --brand is required"),
        }
    }
}

pub fn run(args: &ListingsArgs) -> anyhow::Result<()> {
    let path = args.report_path()?;
    let summary = summarize_listings(&path)
        .with_context(|| format!("could not summarize {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
