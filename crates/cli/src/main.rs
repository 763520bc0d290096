use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tripnotes_core::{
    Collector, KeywordConfig, NoteRecord, Session, SessionConfig, TripnotesError, build_mindmap,
    build_report, categorize, load_buckets, load_notes, resolve_input, save_buckets, save_notes,
    save_text,
};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Collect travel notes from Xiaohongshu, categorize them, and render a
/// mindmap plus a trip-planning report
#[derive(Parser, Debug)]
#[command(name = "tripnotes")]
#[command(author = "Tripnotes Contributors")]
#[command(version = VERSION)]
#[command(about = "Collect, categorize, and render travel notes", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Artifact directory for intermediate and rendered files
    #[arg(long, global = true, default_value = "output", value_name = "DIR")]
    output_dir: PathBuf,

    /// Keyword/template config file (built-in defaults when absent)
    #[arg(long, global = true, value_name = "FILE")]
    keywords: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a browser window for manual login and save the session cookies
    Login,

    /// Search one query and save the collected notes
    Search {
        /// Search phrase
        query: String,

        /// Maximum notes to collect
        #[arg(long, default_value = "30", value_name = "N")]
        limit: usize,

        /// Run the browser without a visible window
        #[arg(long)]
        headless: bool,
    },

    /// Expand a destination through the query templates and collect every variant
    Destination {
        /// Destination name, e.g. "黄山"
        name: String,

        /// Total note budget, split across query variants
        #[arg(long, default_value = "30", value_name = "N")]
        limit: usize,

        /// Run the browser without a visible window
        #[arg(long)]
        headless: bool,
    },

    /// Categorize a collected notes artifact
    Categorize {
        /// Notes artifact; relative paths resolve against the output directory
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },

    /// Render the mindmap and report from a categorized artifact
    Render {
        /// Categorized artifact; relative paths resolve against the output directory
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Destination name used in titles and output file names
        #[arg(long, value_name = "NAME")]
        destination: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let keywords = KeywordConfig::load_or_default(cli.keywords.as_deref());

    match cli.command {
        Command::Login => run_login().await,
        Command::Search { query, limit, headless } => {
            run_search(&query, limit, headless, &cli.output_dir).await
        }
        Command::Destination { name, limit, headless } => {
            run_destination(&name, limit, headless, &cli.output_dir, &keywords).await
        }
        Command::Categorize { input } => run_categorize(&input, &cli.output_dir, &keywords),
        Command::Render { input, destination } => {
            run_render(&input, &destination, &cli.output_dir)
        }
    }
}

/// Establishes Session State through a manual login. Never headless: the
/// operator has to see the browser window.
async fn run_login() -> anyhow::Result<()> {
    echo::print_banner();

    let config = SessionConfig::new(false)?;
    let session = Session::open(config).await.context("Failed to launch browser")?;

    let outcome = session.interactive_login().await;
    let closed = session.close().await;

    outcome.context("Interactive login failed")?;
    closed.context("Failed to persist session state")?;

    echo::print_success("Session saved. You can now run searches.");
    Ok(())
}

async fn run_search(query: &str, limit: usize, headless: bool, output_dir: &Path) -> anyhow::Result<()> {
    echo::print_banner();
    echo::print_step(1, 2, &format!("Collecting notes for \"{query}\""));

    let config = SessionConfig::new(headless)?;
    let session = Session::open(config).await.context("Failed to launch browser")?;

    // Close runs before the collection outcome is surfaced, so the browser is
    // released even when the search failed.
    let outcome = Collector::with_defaults().search(&session, query, limit).await;
    let closed = session.close().await;
    let notes = outcome.context("Collection failed")?;
    closed.context("Failed to close session")?;

    echo::print_step(2, 2, "Saving results");
    finish_collection(&notes, output_dir)
}

async fn run_destination(
    name: &str, limit: usize, headless: bool, output_dir: &Path, keywords: &KeywordConfig,
) -> anyhow::Result<()> {
    echo::print_banner();

    let queries = keywords.expand_queries(name);
    let per_query = (limit / queries.len().max(1)).max(1);
    echo::print_step(1, 2, &format!("Collecting notes for {name} across {} queries", queries.len()));

    let config = SessionConfig::new(headless)?;
    let session = Session::open(config).await.context("Failed to launch browser")?;

    let outcome =
        Collector::with_defaults().search_destination(&session, name, per_query, &queries).await;
    let closed = session.close().await;
    let notes = outcome.context("Collection failed")?;
    closed.context("Failed to close session")?;

    echo::print_step(2, 2, "Saving results");
    finish_collection(&notes, output_dir)
}

fn finish_collection(notes: &[NoteRecord], output_dir: &Path) -> anyhow::Result<()> {
    if notes.is_empty() {
        echo::print_info("No notes collected (login wall or empty results)");
    }

    let path = save_notes(notes, output_dir).context("Failed to save notes artifact")?;
    echo::print_success(&format!("{} notes saved to {}", notes.len(), path.display()));
    Ok(())
}

fn run_categorize(input: &Path, output_dir: &Path, keywords: &KeywordConfig) -> anyhow::Result<()> {
    let path = resolve_input(input, output_dir);
    let notes = match load_notes(&path) {
        Ok(notes) => notes,
        Err(TripnotesError::InputNotFound(p)) => {
            echo::print_error(&format!("File not found: {}", p.display()));
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to read notes artifact"),
    };

    let buckets = categorize(&notes, keywords);

    println!("\n=== 分类统计 ===");
    for (label, bucket) in &buckets {
        if !bucket.is_empty() {
            println!("  {}: {} 篇", label, bucket.len());
        }
    }

    let out = save_buckets(&buckets, output_dir).context("Failed to save categorized artifact")?;
    echo::print_success(&format!("Categorized results saved to {}", out.display()));
    Ok(())
}

fn run_render(input: &Path, destination: &str, output_dir: &Path) -> anyhow::Result<()> {
    let path = resolve_input(input, output_dir);
    let buckets = match load_buckets(&path) {
        Ok(buckets) => buckets,
        Err(TripnotesError::InputNotFound(p)) => {
            echo::print_error(&format!("File not found: {}", p.display()));
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to read categorized artifact"),
    };

    let mindmap = build_mindmap(&buckets, &format!("{destination}攻略"));
    let report = build_report(&buckets, destination, &mindmap);

    let mindmap_path = save_text(tripnotes_core::MINDMAP_FILE, &mindmap, output_dir)
        .context("Failed to save mindmap")?;
    echo::print_success(&format!("Mindmap saved to {}", mindmap_path.display()));

    let report_path = save_text(&format!("{destination}_攻略.md"), &report, output_dir)
        .context("Failed to save report")?;
    echo::print_success(&format!("Report saved to {}", report_path.display()));

    println!("\n=== Generated Mindmap ===\n");
    println!("{mindmap}");
    Ok(())
}
