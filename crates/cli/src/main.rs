use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use lookup_client::{LetterboxdClient, DEFAULT_BASE_URL};
use orchestrator::{RunSummary, TallyConfig, TallyOrchestrator, DEFAULT_OUTPUT_FILE};
use std::path::PathBuf;
use std::time::Duration;

/// Director Tally - count watched films per director from a Letterboxd export
#[derive(Parser)]
#[command(name = "director-tally")]
#[command(about = "Count watched films per director from a Letterboxd data export", long_about = None)]
struct Cli {
    /// Path to the Letterboxd export (.zip)
    archive: PathBuf,

    /// Director cache file, reused between runs
    #[arg(long, default_value = history_loader::cache::DEFAULT_CACHE_FILE)]
    cache: PathBuf,

    /// Where to write the report
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Watch-history member inside the archive
    #[arg(long, default_value = history_loader::archive::WATCHED_MEMBER)]
    member: String,

    /// Pause after each film page request, in milliseconds
    #[arg(long, default_value = "500")]
    delay_ms: u64,

    /// Base URL of the film pages
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl Cli {
    fn tally_config(&self) -> TallyConfig {
        TallyConfig {
            cache_path: self.cache.clone(),
            output_path: self.output.clone(),
            watched_member: self.member.clone(),
            request_delay: Duration::from_millis(self.delay_ms),
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Wrong argument count exits here with clap's usage message
    let cli = Cli::parse();

    let client = LetterboxdClient::with_base_url(cli.base_url.as_str())
        .context("Failed to create Letterboxd client")?;
    let config = cli.tally_config();
    tracing::debug!(?config, base_url = %client.base_url(), "Starting director tally");
    let orchestrator = TallyOrchestrator::new(config, client);

    match orchestrator.process_archive(&cli.archive) {
        Ok(summary) => print_summary(&summary),
        // A bad export is reported, not raised: nothing was written
        Err(e) if e.is_input_error() => eprintln!("{}", e.to_string().red()),
        Err(e) => return Err(e).context("Director tally aborted; cache and report left untouched"),
    }

    Ok(())
}

/// Print a short recap of the run
fn print_summary(summary: &RunSummary) {
    println!(
        "{} Tallied {} films by {} directors ({} fetched)",
        "✓".green(),
        summary.films_processed,
        summary.directors,
        summary.films_fetched
    );
    println!(
        "{}Cache: {} ({} entries)",
        "• ".cyan(),
        summary.cache_path.display(),
        summary.cache_entries
    );
    println!(
        "{}Report: {}",
        "• ".cyan(),
        summary.output_path.display().to_string().bold()
    );
}
