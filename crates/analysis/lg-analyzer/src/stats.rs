//! Statistics for scan runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Statistics collected while scanning a key listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// When the scan started
    pub started_at: Option<DateTime<Utc>>,

    /// When the scan completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Number of listing pages consumed
    pub pages: usize,

    /// Total number of keys seen across all pages
    pub keys_seen: usize,

    /// Keys that matched one of the partition patterns
    pub keys_matched: usize,
}

impl ScanStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark the scan as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Record a consumed listing page.
    pub fn record_page(&mut self) {
        self.pages += 1;
    }

    /// Record a scanned key and whether it matched a partition pattern.
    pub fn record_key(&mut self, matched: bool) {
        self.keys_seen += 1;
        if matched {
            self.keys_matched += 1;
        }
    }

    /// Keys that matched neither pattern.
    pub fn keys_skipped(&self) -> usize {
        self.keys_seen - self.keys_matched
    }

    /// Get the duration of the scan.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = ScanStats::new();
        assert!(stats.started_at.is_some());
        assert!(stats.completed_at.is_none());
        assert_eq!(stats.keys_seen, 0);
    }

    #[test]
    fn test_stats_record_keys() {
        let mut stats = ScanStats::new();
        stats.record_key(true);
        stats.record_key(true);
        stats.record_key(false);

        assert_eq!(stats.keys_seen, 3);
        assert_eq!(stats.keys_matched, 2);
        assert_eq!(stats.keys_skipped(), 1);
    }

    #[test]
    fn test_stats_pages() {
        let mut stats = ScanStats::new();
        stats.record_page();
        stats.record_page();
        assert_eq!(stats.pages, 2);
    }

    #[test]
    fn test_stats_duration() {
        let mut stats = ScanStats::new();
        assert!(stats.duration().is_none());
        stats.complete();
        assert!(stats.duration().is_some());
    }
}
