//! Main execution logic for the lakegap CLI.

use anyhow::Result;
use lg_analyzer::{
    AnalysisResult, PartitionKind, PartitionScanner, S3Config, S3Store, SampleFinder,
    SamplePreview, ScanStats, analyze_partitions, create_s3_client, parse_s3_path,
};
use tracing::{Level, warn};
use tracing_subscriber::fmt;

use crate::args::{Cli, LogLevel};

/// Everything one run produces, ready for rendering.
pub struct RunReport {
    pub bucket: String,
    pub prefix: String,
    pub analysis: AnalysisResult,
    pub stats: ScanStats,
    pub sample: Option<SamplePreview>,
}

/// Initialize logging.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr); // Log to stderr so stdout is clean for the report

    subscriber.init();

    Ok(())
}

/// Execute an analysis run with the provided arguments.
pub async fn execute(args: &Cli) -> Result<RunReport> {
    let (bucket, prefix) = resolve_location(args)?;

    // Build S3 configuration
    let mut s3_config = S3Config::new(&bucket)
        .with_region(&args.region)
        .with_timeout(args.timeout);

    if !prefix.is_empty() {
        s3_config = s3_config.with_prefix(&prefix);
    }

    if let Some(endpoint) = &args.s3_endpoint {
        s3_config = s3_config.with_endpoint(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) {
        s3_config = s3_config.with_credentials(access_key, secret_key);
    }

    if let Some(profile) = &args.profile {
        s3_config = s3_config.with_profile(profile);
    }

    let store = S3Store::new(create_s3_client(&s3_config).await?);

    // Scan the listing and analyze the token set
    let scan = PartitionScanner::new(&store, &bucket, &prefix).scan().await?;

    let day_count = scan
        .tokens
        .iter()
        .filter(|t| t.kind == PartitionKind::Day)
        .count();
    if day_count > 0 && day_count < scan.tokens.len() {
        warn!(
            days = day_count,
            months = scan.tokens.len() - day_count,
            "Prefix mixes daily and monthly partitions; analyzing days only"
        );
    }

    let analysis = analyze_partitions(&scan.tokens);

    // Sample preview only makes sense once partitions were found
    let sample = if args.no_sample || analysis.partition_kind.is_none() {
        None
    } else {
        SampleFinder::new(&store, &store)
            .with_max_rows(args.max_sample_rows)
            .find(&bucket, &prefix)
            .await?
    };

    Ok(RunReport {
        bucket,
        prefix,
        analysis,
        stats: scan.stats,
        sample,
    })
}

/// Resolve the bucket/prefix pair from the path or the individual flags.
fn resolve_location(args: &Cli) -> Result<(String, String)> {
    if let Some(path) = &args.s3_path {
        let (bucket, prefix) = parse_s3_path(path)?;
        return Ok((bucket, prefix));
    }

    let bucket = args
        .bucket
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Provide an s3:// path or --bucket"))?;

    Ok((bucket, args.prefix.clone().unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_resolve_location_from_path() {
        let args = Cli::parse_from(["lakegap", "s3://my-bucket/events/"]);
        let (bucket, prefix) = resolve_location(&args).unwrap();
        assert_eq!(bucket, "my-bucket");
        assert_eq!(prefix, "events/");
    }

    #[test]
    fn test_resolve_location_from_flags() {
        let args = Cli::parse_from(["lakegap", "-b", "my-bucket", "-p", "events/"]);
        let (bucket, prefix) = resolve_location(&args).unwrap();
        assert_eq!(bucket, "my-bucket");
        assert_eq!(prefix, "events/");
    }

    #[test]
    fn test_resolve_location_bucket_only() {
        let args = Cli::parse_from(["lakegap", "-b", "my-bucket"]);
        let (bucket, prefix) = resolve_location(&args).unwrap();
        assert_eq!(bucket, "my-bucket");
        assert_eq!(prefix, "");
    }

    #[test]
    fn test_resolve_location_missing() {
        let args = Cli::parse_from(["lakegap"]);
        assert!(resolve_location(&args).is_err());
    }
}
