//! Run a graph-of-docs classification experiment.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults, overridden by GRAPHOFDOCS_* environment variables
//! graph-of-docs
//!
//! # Run from a configuration file and sort the summary by classifier
//! graph-of-docs --config experiment.toml --sort-by classifier --ascending
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use graphofdocs::community::{filter_by_size, CommunityIndex};
use graphofdocs::config::ExperimentConfig;
use graphofdocs::datasets::{label_from_identifier, read_dataset};
use graphofdocs::evaluation::{run_experiment, EvaluationContext, Family};
use graphofdocs::frame::{DatasetFrame, FrameOptions};
use graphofdocs::graph::{with_store, GraphStore, JsonGraphStore};
use graphofdocs::output::{render, write_tables, SortColumn};
use graphofdocs::text::WordCleaner;


/// Compare text classifiers on bag-of-words and community-derived features.
#[derive(Parser)]
#[command(name = "graph-of-docs", version, about)]
struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Column used to sort the printed summary
    #[arg(long, value_enum)]
    sort_by: Option<SortColumn>,

    /// Sort the printed summary in ascending order
    #[arg(long)]
    ascending: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}


fn main() -> graphofdocs::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .init();

    let config = ExperimentConfig::load(cli.config.as_deref())?;
    info!(export = %config.database.export.display(), dataset = %config.dataset.path.display(), "loaded configuration");

    let delimiter = config.dataset.label_delimiter;
    let label_extractor = move |identifier: &str| label_from_identifier(identifier, delimiter).to_string();

    let store = JsonGraphStore::open(&config.database.export)?;

    let aggregator = with_store(store, |store| {
        let records = filter_by_size(store.document_communities()?, config.min_community_size);
        let index = CommunityIndex::build(&records)?;
        info!(communities = index.num_communities(), documents = index.num_documents(), "selected communities");

        let raw = read_dataset(&config.dataset.path)?;
        let options = FrameOptions {
            flags: config.cleaning,
            seed: config.seed,
            test_size: config.test_size,
        };
        let frame = DatasetFrame::build(&raw, &label_extractor, &WordCleaner::new(), &index, &options)?;

        let ctx = EvaluationContext {
            frame: &frame,
            index: &index,
            store,
            classifiers: &config.classifiers,
            label_extractor: &label_extractor,
        };

        let majority = if config.majority.enabled { Some(config.majority.policy) } else { None };

        run_experiment(&ctx, &config.evaluators, majority)
    })?;

    write_tables(&aggregator.tables(), &config.output.directory, &config.output.prefix)?;

    let sort_by = cli.sort_by.unwrap_or(config.output.sort_by);
    let descending = if cli.ascending { false } else { config.output.descending };

    println!("{}", render(&aggregator.table(Family::Overall), sort_by, descending));

    Ok(())
}
