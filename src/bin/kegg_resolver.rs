//! KEGG EC-number resolution CLI
//!
//! Thin driver over the pipeline: it wires up the HTTP fetcher, consumes the
//! progress event channel, and prints lines as items resolve.
//!
//! Usage:
//!   kegg_resolver link "https://www.kegg.jp/kegg-bin/show_pathway?map01100/K00844/..."
//!   kegg_resolver catalog "https://www.kegg.jp/kegg-bin/get_htext?ko01100.keg" --top 10

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kegg_resolver::{events, HttpFetcher, Pipeline, PipelineConfig, ProgressEvent};

#[derive(Parser)]
#[command(
    name = "kegg_resolver",
    about = "Resolve KEGG orthology identifiers to EC numbers"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pipeline configuration file (JSON); flags below override it
    #[arg(long, env = "KEGG_RESOLVER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for per-identifier cache files
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Ceiling on simultaneous entry-page fetches
    #[arg(long)]
    concurrency: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve every identifier embedded in one pathway link
    Link {
        /// Pathway link carrying the identifier list
        url: String,
    },
    /// List the catalog, rank its pathways, and emit the full report
    Catalog {
        /// Catalog page URL
        url: String,

        /// How many top-ranked pathways to keep
        #[arg(long)]
        top: Option<usize>,

        /// Catalog id marking where real pathway categories stop
        #[arg(long)]
        sentinel: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str::<PipelineConfig>(&raw)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };
    if let Some(cache_dir) = cli.cache_dir {
        config.cache_dir = cache_dir;
    }
    if let Some(concurrency) = cli.concurrency {
        config.max_concurrent = concurrency;
    }

    let (events, mut rx) = events::channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            render(event);
        }
    });

    let fetcher = Arc::new(HttpFetcher::new()?);

    match cli.command {
        Command::Link { url } => {
            let pipeline = Pipeline::new(config, fetcher)?;
            pipeline.resolve_one(&url, &events).await?;
            drop(events);
            printer.await?;
            println!("===============================");
        }
        Command::Catalog { url, top, sentinel } => {
            if let Some(top) = top {
                config.top_sources = top;
            }
            if let Some(sentinel) = sentinel {
                config.sentinel_id = sentinel;
            }
            let pipeline = Pipeline::new(config, fetcher)?;
            let report = pipeline.resolve_catalog(&url, &events).await?;
            drop(events);
            printer.await?;
            print!("{report}");
        }
    }

    Ok(())
}

fn render(event: ProgressEvent) {
    match event {
        ProgressEvent::CatalogRanked { listed, ranked } => {
            println!("catalog listed {listed} pathways, {ranked} kept after ranking");
        }
        ProgressEvent::IdentifiersExtracted { total, unique } => {
            println!("extracted {total} identifiers, {unique} unique");
        }
        ProgressEvent::ResolutionStarted { unique } => {
            println!("resolving {unique} identifiers");
        }
        ProgressEvent::Resolved { code, value } => {
            println!("{code},{value}");
        }
        ProgressEvent::ResolutionFailed { code, error } => {
            println!("resolution for {code} did not succeed ({error}), see final report");
        }
        ProgressEvent::DuplicateResult { code } => {
            println!("duplicate result for {code}, kept the first value");
        }
    }
}
