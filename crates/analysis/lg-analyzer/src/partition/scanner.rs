//! Partition scanner: classifies a paginated key listing into tokens.

use futures::{StreamExt, pin_mut};
use lg_error::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

use super::{PartitionKind, PartitionToken};
use crate::stats::ScanStats;
use crate::traits::ObjectLister;

static DAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"date=(\d{4}-\d{2}-\d{2})").expect("day pattern compiles"));

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"yearmonth=(\d{4}-\d{2})").expect("month pattern compiles"));

/// Classify a single object key into a partition token.
///
/// The day pattern is tried first; a key carrying both a `date=` and a
/// `yearmonth=` segment classifies as [`PartitionKind::Day`]. Keys matching
/// neither pattern produce `None`.
pub fn classify_key(key: &str) -> Option<PartitionToken> {
    if let Some(caps) = DAY_PATTERN.captures(key) {
        return Some(PartitionToken {
            kind: PartitionKind::Day,
            value: caps[1].to_string(),
        });
    }
    if let Some(caps) = MONTH_PATTERN.captures(key) {
        return Some(PartitionToken {
            kind: PartitionKind::Month,
            value: caps[1].to_string(),
        });
    }
    None
}

/// The outcome of one scan: the deduplicated, sorted token set plus run
/// statistics.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Deduplicated tokens, sorted by (kind, value)
    pub tokens: Vec<PartitionToken>,

    /// Counters for the scan run
    pub stats: ScanStats,
}

/// Scans a paginated object listing and collects partition tokens.
///
/// Generic over the listing capability so tests can drive it with an
/// in-memory lister.
pub struct PartitionScanner<'a, L: ObjectLister> {
    lister: &'a L,
    bucket: &'a str,
    prefix: &'a str,
}

impl<'a, L: ObjectLister> PartitionScanner<'a, L> {
    /// Create a scanner bound to one bucket/prefix.
    pub fn new(lister: &'a L, bucket: &'a str, prefix: &'a str) -> Self {
        Self {
            lister,
            bucket,
            prefix,
        }
    }

    /// Run the scan to completion.
    ///
    /// Consumes every listing page sequentially. Multiple files sharing a
    /// partition folder collapse to one token (set semantics). The first
    /// listing failure aborts the scan; no partial token set is returned,
    /// since a partial listing would understate missing partitions.
    pub async fn scan(&self) -> Result<ScanResult> {
        let mut stats = ScanStats::new();
        let mut tokens: BTreeSet<PartitionToken> = BTreeSet::new();

        debug!(bucket = %self.bucket, prefix = %self.prefix, "Starting partition scan");

        let stream = self.lister.list_pages(self.bucket, self.prefix).await?;
        pin_mut!(stream);

        while let Some(page) = stream.next().await {
            let keys = page?;
            stats.record_page();

            for key in &keys {
                match classify_key(key) {
                    Some(token) => {
                        stats.record_key(true);
                        tokens.insert(token);
                    }
                    None => stats.record_key(false),
                }
            }
        }

        stats.complete();

        debug!(
            pages = stats.pages,
            keys_seen = stats.keys_seen,
            keys_matched = stats.keys_matched,
            partitions = tokens.len(),
            "Partition scan completed"
        );

        Ok(ScanResult {
            tokens: tokens.into_iter().collect(),
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StaticLister;

    #[test]
    fn test_classify_day_key() {
        let token = classify_key("data/date=2024-01-15/part-000.parquet").unwrap();
        assert_eq!(token, PartitionToken::day("2024-01-15"));
    }

    #[test]
    fn test_classify_month_key() {
        let token = classify_key("data/yearmonth=2024-01/part-000.parquet").unwrap();
        assert_eq!(token, PartitionToken::month("2024-01"));
    }

    #[test]
    fn test_classify_day_wins_over_month() {
        let token = classify_key("data/yearmonth=2024-01/date=2024-01-15/f.csv").unwrap();
        assert_eq!(token.kind, PartitionKind::Day);
        assert_eq!(token.value, "2024-01-15");
    }

    #[test]
    fn test_classify_unpartitioned_key() {
        assert!(classify_key("data/raw/file.csv").is_none());
        assert!(classify_key("date=2024/file.csv").is_none()); // not a full date
        assert!(classify_key("").is_none());
    }

    #[tokio::test]
    async fn test_scan_dedupes_and_sorts() {
        let lister = StaticLister::new(vec![
            vec![
                "data/date=2024-01-02/part-0.parquet".to_string(),
                "data/date=2024-01-01/part-0.parquet".to_string(),
            ],
            vec![
                // Same partition, different file: collapses to one token
                "data/date=2024-01-01/part-1.parquet".to_string(),
                "data/_SUCCESS".to_string(),
            ],
        ]);

        let scanner = PartitionScanner::new(&lister, "bucket", "data/");
        let result = scanner.scan().await.unwrap();

        assert_eq!(
            result.tokens,
            vec![
                PartitionToken::day("2024-01-01"),
                PartitionToken::day("2024-01-02"),
            ]
        );
        assert_eq!(result.stats.pages, 2);
        assert_eq!(result.stats.keys_seen, 4);
        assert_eq!(result.stats.keys_matched, 3);
        assert_eq!(result.stats.keys_skipped(), 1);
    }

    #[tokio::test]
    async fn test_scan_mixed_kinds_sorted_day_first() {
        let lister = StaticLister::single_page(vec![
            "data/yearmonth=2023-12/f.csv".to_string(),
            "data/date=2024-01-01/f.csv".to_string(),
        ]);

        let scanner = PartitionScanner::new(&lister, "bucket", "data/");
        let result = scanner.scan().await.unwrap();

        assert_eq!(
            result.tokens,
            vec![
                PartitionToken::day("2024-01-01"),
                PartitionToken::month("2023-12"),
            ]
        );
    }

    #[tokio::test]
    async fn test_scan_empty_listing() {
        let lister = StaticLister::new(vec![]);
        let scanner = PartitionScanner::new(&lister, "bucket", "data/");
        let result = scanner.scan().await.unwrap();

        assert!(result.tokens.is_empty());
        assert_eq!(result.stats.pages, 0);
    }
}
