//! scholardash - Scholar Author Metadata Analysis & HTML Dashboard
//!
//! A Rust CLI for fetching an author's publication metadata from Semantic
//! Scholar, caching it locally, and rendering an HTML dashboard with a
//! summary table, citations-per-year chart, tag cloud, and publication list.
//!
//! ## Usage
//!
//! ```bash
//! scholardash authors -a "Jane Doe" -o dashboard.html -t 5
//! scholardash pubs -c titles.csv -o citations.csv
//! ```

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use scholardash::cache::CacheManager;
use scholardash::semanticscholar::{AuthorClient, AuthorData};
use scholardash::stopwords::StopwordSet;
use scholardash::{dashboard, wordcloud};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Scholar Author Metadata Analysis & HTML Dashboard - Rust CLI
#[derive(Parser)]
#[command(name = "scholardash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse authors and render the HTML dashboard
    Authors {
        /// List of authors to analyse
        #[arg(short, long, required = true, num_args = 1..)]
        authors: Vec<String>,

        /// Output HTML path
        #[arg(short, long)]
        output: PathBuf,

        /// Percentage of the less frequent word in the tag cloud
        #[arg(short = 't', long = "word-cloud-threshold", default_value_t = 5.0)]
        threshold: f64,

        /// Strip leading/trailing punctuation from tag-cloud tokens
        #[arg(long)]
        strip_punctuation: bool,

        /// Cache file path (default: ~/.scholardash_cache.json)
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Ignore cached data and re-fetch every author
        #[arg(long)]
        refresh: bool,

        /// Semantic Scholar API key
        #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY")]
        api_key: Option<String>,
    },

    /// Look up citation counts for a CSV of publication titles
    Pubs {
        /// CSV file containing the list of publication titles
        #[arg(short, long)]
        csv: PathBuf,

        /// Output CSV file containing number of citations
        #[arg(short, long)]
        output: PathBuf,

        /// Semantic Scholar API key
        #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY")]
        api_key: Option<String>,
    },

    /// Manage the author-data cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Clear cached author data
    Clear,
    /// Show cache file path
    Path,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    match cli.command {
        Commands::Authors {
            authors,
            output,
            threshold,
            strip_punctuation,
            cache,
            refresh,
            api_key,
        } => {
            run_authors(
                authors,
                output,
                threshold,
                strip_punctuation,
                cache,
                refresh,
                api_key,
            )
            .await
        }
        Commands::Pubs {
            csv,
            output,
            api_key,
        } => run_pubs(csv, output, api_key).await,
        Commands::Cache { action } => handle_cache(action),
    }
}

// ============================================================================
// Authors Dashboard
// ============================================================================

async fn run_authors(
    authors: Vec<String>,
    output: PathBuf,
    threshold: f64,
    strip_punctuation: bool,
    cache_path: Option<PathBuf>,
    refresh: bool,
    api_key: Option<String>,
) -> Result<()> {
    let manager = cache_path.map(CacheManager::with_path).unwrap_or_default();

    // Cached entries are matched to the requested names; anything missing is
    // fetched and the union written back for the next run.
    let mut cached: HashMap<String, AuthorData> = if refresh {
        HashMap::new()
    } else {
        manager
            .load()
            .unwrap_or_default()
            .into_iter()
            .map(|a| (a.query.to_lowercase(), a))
            .collect()
    };

    let client = AuthorClient::new(api_key)?;
    let mut data: Vec<AuthorData> = Vec::with_capacity(authors.len());
    let mut fetched_any = false;

    for name in &authors {
        match cached.remove(&name.to_lowercase()) {
            Some(author) => {
                println!("Using cached data for {}", name);
                data.push(author);
            }
            None => {
                println!("reading data for {}", name);
                let author = client
                    .read_author_data(name)
                    .await
                    .with_context(|| format!("Failed to fetch author '{}'", name))?;
                fetched_any = true;
                data.push(author);
            }
        }
    }

    if fetched_any {
        manager.save(&data).context("Failed to write cache")?;
    }

    // Stop words are built once and shared across authors.
    let stopwords = StopwordSet::english();
    let options = wordcloud::LayoutOptions {
        threshold,
        n_columns: 3,
        strip_punctuation,
    };

    let mut entries = Vec::with_capacity(data.len());
    for author in data {
        let cells = wordcloud::compute_layout(&author.pubs, &stopwords, &options)
            .with_context(|| format!("Failed to compute tag cloud for '{}'", author.name))?;
        entries.push((author, cells));
    }

    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let html = dashboard::render_dashboard(&entries, &generated_at);
    std::fs::write(&output, html)
        .with_context(|| format!("Failed to write dashboard to {}", output.display()))?;

    println!(
        "✓ Dashboard for {} author(s) written to {}",
        entries.len(),
        output.display()
    );
    Ok(())
}

// ============================================================================
// Publication Citation Lookup
// ============================================================================

async fn run_pubs(csv_path: PathBuf, output: PathBuf, api_key: Option<String>) -> Result<()> {
    let titles = read_titles(&csv_path)?;
    if titles.is_empty() {
        println!("No titles found in {}", csv_path.display());
        return Ok(());
    }

    println!("Looking up {} titles (concurrent, 3 workers)...", titles.len());

    let client = AuthorClient::new(api_key)?;
    let counts = client.lookup_citations_batch(&titles).await;

    let mut wtr = csv::WriterBuilder::new()
        .from_path(&output)
        .context("Failed to create CSV writer")?;
    wtr.write_record(["title", "citations"])
        .context("Failed to write CSV header")?;
    for (title, count) in titles.iter().zip(&counts) {
        wtr.write_record([title.as_str(), &count.unwrap_or(0).to_string()])
            .context("Failed to write CSV record")?;
    }
    wtr.flush().context("Failed to flush CSV")?;

    let matched = counts.iter().filter(|c| c.is_some()).count();
    println!(
        "✓ {} / {} titles matched. Results in: {}",
        matched,
        titles.len(),
        output.display()
    );
    Ok(())
}

/// Read publication titles from the first column of a CSV file (no header)
fn read_titles(path: &PathBuf) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut titles = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        if let Some(field) = record.get(0) {
            let title = field.trim();
            if !title.is_empty() {
                titles.push(title.to_string());
            }
        }
    }
    Ok(titles)
}

// ============================================================================
// Cache Management
// ============================================================================

fn handle_cache(action: CacheAction) -> Result<()> {
    let manager = CacheManager::new();

    match action {
        CacheAction::Clear => {
            manager.clear()?;
            println!("Cache cleared.");
        }
        CacheAction::Path => {
            println!("Cache file: {:?}", manager.path());
        }
    }

    Ok(())
}
