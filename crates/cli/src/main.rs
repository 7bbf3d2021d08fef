use anyhow::Result;
use clap::Parser;
use docket_protocol::SourceBudgets;
use docket_scanner::{ScanConfig, ScanRoots, TreeScanner};
use docket_search::DocketAggregator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::providers::{CatalogAssetProvider, SnapshotTaskIndex};

mod providers;

#[derive(Parser)]
#[command(name = "docket-finder")]
#[command(about = "Aggregate docket matches from the task index, remote assets and storage roots", long_about = None)]
#[command(version)]
struct Cli {
    /// Docket number (or prefix) to search for
    docket: String,

    /// Job name carried into the result for display
    #[arg(long)]
    job_name: Option<String>,

    /// Task snapshot file (JSON array of task rows)
    #[arg(long, value_name = "FILE")]
    tasks: Option<PathBuf>,

    /// Remote catalog fixture file (JSON array of {id, name, details?})
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Flat storage root, repeatable
    #[arg(long = "root", value_name = "DIR")]
    roots: Vec<PathBuf>,

    /// Base path holding the year-partitioned roots
    #[arg(long, value_name = "DIR")]
    year_base: Option<PathBuf>,

    /// Year root name prefix, e.g. "Jobs " for "Jobs 2025"
    #[arg(long, default_value = "Jobs ")]
    year_prefix: String,

    /// Task index budget in seconds
    #[arg(long, default_value_t = 10)]
    task_budget_secs: u64,

    /// Remote asset budget in seconds
    #[arg(long, default_value_t = 15)]
    asset_budget_secs: u64,

    /// Filesystem budget in seconds (largest: roots may be network mounts)
    #[arg(long, default_value_t = 30)]
    fs_budget_secs: u64,

    /// Reject queries shorter than this many characters
    #[arg(long, default_value_t = docket_ident::DEFAULT_MIN_QUERY_LEN)]
    min_query_len: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tasks = match &cli.tasks {
        Some(path) => {
            let index = SnapshotTaskIndex::load(path)?;
            if index.is_empty() {
                log::warn!("task snapshot {} has no rows", path.display());
            }
            log::debug!("loaded {} task rows from {}", index.len(), path.display());
            index
        }
        None => SnapshotTaskIndex::empty(),
    };
    let catalog = match &cli.catalog {
        Some(path) => CatalogAssetProvider::load(path)?,
        None => CatalogAssetProvider::empty(),
    };

    let scanner = TreeScanner::new(
        ScanRoots {
            flat_roots: cli.roots.clone(),
            year_base: cli.year_base.clone(),
            year_prefix: cli.year_prefix.clone(),
        },
        ScanConfig {
            min_query_len: cli.min_query_len,
            ..ScanConfig::default()
        },
    );

    let aggregator = DocketAggregator::new(Arc::new(tasks), Arc::new(catalog), scanner)
        .with_budgets(SourceBudgets {
            task_index: Duration::from_secs(cli.task_budget_secs),
            remote_asset: Duration::from_secs(cli.asset_budget_secs),
            filesystem: Duration::from_secs(cli.fs_budget_secs),
        })
        .with_min_query_len(cli.min_query_len);

    let result = aggregator
        .fetch_aggregation(&cli.docket, cli.job_name.as_deref())
        .await;

    log::debug!(
        "{} task, {} asset, {} folder matches",
        result.task_matches.len(),
        result.asset_matches.len(),
        result.folder_matches.len()
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
