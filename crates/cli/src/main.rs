#![forbid(unsafe_code)]

mod listings;
mod plan;

use clap::{Parser, Subcommand};
use replen_observability::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "replen",
    author,
    version,
    about = "Restock planning from sales and inventory reports",
    long_about = None
)]
struct Cli {
    /// Log line format on stderr (json or text).
    #[arg(long, global = true, env = "REPLEN_LOG_FORMAT", default_value_t = LogFormat::default())]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Compute a restock plan",
        long_about = "Join sales velocity with on-hand inventory and write the SKUs that are \
                      below the days-of-supply threshold, most urgent first.",
        after_help = "EXAMPLES:\n    # Reports under ./reports, output under ./recommendations\n    replen plan\n\n    # Brand layout under ./BRANDS/SL with a 60 day target\n    replen plan --brand SL --threshold-days 60"
    )]
    Plan(plan::PlanArgs),

    #[command(
        about = "Summarize a listing report",
        long_about = "Print item count, price range, status distribution and open-date range of an \
                      all-listings report as JSON."
    )]
    Listings(listings::ListingsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    replen_observability::init(cli.log_format);

    match &cli.command {
        Commands::Plan(args) => plan::run(args),
        Commands::Listings(args) => listings::run(args),
    }
}
