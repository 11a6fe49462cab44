//! CLI argument definitions for lakegap.

use clap::{Parser, ValueEnum};

/// S3 partition gap analyzer.
///
/// Scans a date-partitioned prefix (daily `date=YYYY-MM-DD` or monthly
/// `yearmonth=YYYY-MM` layouts), reports the observed range and any
/// missing partitions, and previews a sample of the underlying data.
///
/// ## Examples
///
/// Analyze a prefix by path:
///   lakegap s3://my-bucket/events/
///
/// Or by bucket and prefix:
///   lakegap -b my-bucket -p events/
///
/// Against LocalStack, without the sample preview:
///   lakegap s3://my-bucket/events/ --s3-endpoint http://localhost:4566 --no-sample
#[derive(Parser, Debug)]
#[command(name = "lakegap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// S3 path to analyze (s3://bucket-name/path/to/data)
    pub s3_path: Option<String>,

    // === S3 Configuration ===
    /// S3 bucket name (alternative to the positional path)
    #[arg(short, long, env = "LG_S3_BUCKET")]
    pub bucket: Option<String>,

    /// Key prefix to analyze
    #[arg(short, long, env = "LG_S3_PREFIX")]
    pub prefix: Option<String>,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "LG_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// AWS access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    pub access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY")]
    pub secret_key: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// S3 request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    // === Sample Options ===
    /// Skip the sample data preview
    #[arg(long)]
    pub no_sample: bool,

    /// Maximum number of sample rows to preview
    #[arg(long, default_value = "10", value_parser = parse_positive_usize)]
    pub max_sample_rows: usize,

    // === Output Options ===
    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Machine-readable JSON
    Json,
}

/// Log level argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}
