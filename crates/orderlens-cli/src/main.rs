mod report;
mod status;
mod sync;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "orderlens")]
#[command(about = "Sync food-delivery order history and report on spending")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the full order history and replace the stored snapshot
    Sync,
    /// Print spending statistics for the stored snapshot
    Report {
        /// Preset window: 1y, 3m, 30d or all (unknown names mean all)
        #[arg(long, default_value = "all", conflicts_with_all = ["from", "to"])]
        range: String,
        /// First day of a custom window (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Last day of a custom window, inclusive (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
        /// Number of restaurants in the ranking
        #[arg(long, default_value_t = orderlens_analytics::DEFAULT_TOP_RESTAURANTS)]
        top: usize,
        /// Number of recent orders to list
        #[arg(long, default_value_t = orderlens_analytics::DEFAULT_RECENT_ORDERS)]
        recent: usize,
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show when the stored snapshot was last synced
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = orderlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Sync => sync::run_sync(&config).await?,
        Commands::Report {
            range,
            from,
            to,
            top,
            recent,
            json,
        } => {
            let args = report::ReportArgs {
                range,
                days: from.zip(to),
                top,
                recent,
                json,
            };
            report::run_report(&config, &args)?;
        }
        Commands::Status => status::run_status(&config)?,
    }

    Ok(())
}
