//! lakegap CLI
//!
//! S3 partition gap analysis.

use clap::Parser;

mod args;
mod report;
mod run;

use args::Cli;
use report::format_number;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialize logging (to stderr, so stdout is clean for the report)
    run::init_logging(args.log_level)?;

    let result = run::execute(&args).await?;

    report::print_report(&result, args.output)?;

    // Scan summary to stderr
    let stats = &result.stats;
    eprintln!();
    eprintln!("Scan completed:");
    eprintln!("  Pages listed:  {}", format_number(stats.pages as u64));
    eprintln!("  Keys scanned:  {}", format_number(stats.keys_seen as u64));
    eprintln!("  Keys matched:  {}", format_number(stats.keys_matched as u64));
    eprintln!("  Keys skipped:  {}", format_number(stats.keys_skipped() as u64));

    if let Some(duration) = stats.duration() {
        eprintln!(
            "  Duration:      {:.2}s",
            duration.num_milliseconds() as f64 / 1000.0
        );
    }

    Ok(())
}
