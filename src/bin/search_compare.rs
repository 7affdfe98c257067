//! CLI for inspecting persisted search comparison runs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use search_comparator::{ComparatorConfig, ComparisonEngine, Query, SimilarityMatrix, report};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Compare how similarly search functions rank the same queries.
#[derive(Parser)]
#[command(name = "search-compare", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Print pairwise similarity matrices from a saved result store.
    Report {
        /// Saved result store (`.json` appended if missing).
        state: PathBuf,
        /// Only report this query.
        #[arg(short, long)]
        query: Option<String>,
        /// Emit matrices as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },

    /// Print each search's identifiers side by side for one query.
    Results {
        /// Saved result store (`.json` appended if missing).
        state: PathBuf,
        /// Query to show.
        #[arg(short, long)]
        query: String,
    },

    /// Write the default configuration file.
    InitConfig {
        /// Destination (defaults to `search-comparator.toml`).
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("search_comparator=info,rank_overlap=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => ComparatorConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ComparatorConfig::default(),
    };

    match cli.command {
        Command::Report { state, query, json } => run_report(config, &state, query, json),
        Command::Results { state, query } => run_results(config, &state, &query),
        Command::InitConfig { path } => {
            let path = path.unwrap_or_else(ComparatorConfig::default_config_path);
            config
                .save_to_file(&path)
                .with_context(|| format!("writing config to {}", path.display()))?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn load_engine(config: ComparatorConfig, state: &Path) -> anyhow::Result<ComparisonEngine> {
    let mut engine = ComparisonEngine::new(config)?;
    engine
        .load(state)
        .with_context(|| format!("loading result store from {}", state.display()))?;
    let queries: Vec<Query> = engine.store().queries().cloned().collect();
    engine.add_queries(queries);
    Ok(engine)
}

fn run_report(
    config: ComparatorConfig,
    state: &Path,
    query: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let precision = config.report.precision;
    let engine = load_engine(config, state)?;

    let matrices: BTreeMap<String, SimilarityMatrix> = match query {
        Some(q) => {
            anyhow::ensure!(
                !engine.query_results(&q).is_empty(),
                "query `{q}` has no saved results"
            );
            std::iter::once((q.clone(), engine.evaluate_query(&q))).collect()
        }
        None => engine.evaluate_all(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&matrices)?);
        return Ok(());
    }

    for (query, matrix) in &matrices {
        println!("Query: {query}");
        print!("{}", report::render_matrix(matrix, precision));
        println!();
    }
    Ok(())
}

fn run_results(config: ComparatorConfig, state: &Path, query: &str) -> anyhow::Result<()> {
    let engine = load_engine(config, state)?;
    let side_by_side = engine.compare_results(query);
    anyhow::ensure!(!side_by_side.is_empty(), "query `{query}` has no saved results");

    for (search, ids) in &side_by_side {
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        println!("{search}: {}", ids.join(", "));
    }
    Ok(())
}
