//! lg-analyzer - partition gap analysis for S3-hosted datasets.
//!
//! This crate inspects a bucket laid out with date-partitioned keys
//! (daily `date=YYYY-MM-DD` or monthly `yearmonth=YYYY-MM` segments),
//! reports which partitions exist and which are missing over the observed
//! range, and previews a sample of the tabular data found under the
//! prefix. It provides:
//!
//! - Paginated S3 listing behind a narrow [`ObjectLister`] capability
//! - Partition classification with set-semantics deduplication
//! - Calendar-exact gap analysis for daily and monthly granularities
//! - CSV/Parquet/JSON sample previews via arrow
//! - An explicit per-location result cache ([`AnalysisSession`])
//!
//! # Example
//!
//! ```ignore
//! use lg_analyzer::{PartitionScanner, analyze_partitions};
//! use lg_analyzer::s3::{S3Config, S3Store, create_s3_client};
//!
//! let config = S3Config::new("my-bucket").with_prefix("events/");
//! let store = S3Store::new(create_s3_client(&config).await?);
//!
//! let scan = PartitionScanner::new(&store, &config.bucket, config.prefix_str())
//!     .scan()
//!     .await?;
//! let result = analyze_partitions(&scan.tokens);
//!
//! for gap in &result.missing {
//!     eprintln!("missing partition: {gap}");
//! }
//! ```

pub mod partition;
pub mod s3;
pub mod sample;
pub mod session;
pub mod stats;
pub mod traits;

pub use partition::{
    AnalysisResult, PartitionKind, PartitionScanner, PartitionToken, ScanResult,
    analyze_partitions, classify_key,
};
pub use s3::{S3Config, S3Store, create_s3_client, parse_s3_path};
pub use sample::{FileFormat, SampleFinder, SamplePreview};
pub use session::AnalysisSession;
pub use stats::ScanStats;
pub use traits::{KeyPageStream, ObjectFetcher, ObjectLister, StaticLister};
