//! Partition classification and gap analysis.
//!
//! Keys under a prefix are classified into partition tokens by naming
//! convention (`date=YYYY-MM-DD` or `yearmonth=YYYY-MM`), and the resulting
//! token set is diffed against the full calendar range it spans to find
//! gaps.

mod gaps;
mod scanner;

pub use gaps::{AnalysisResult, analyze_partitions};
pub use scanner::{PartitionScanner, ScanResult, classify_key};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of a partition: daily or monthly.
///
/// `Day` orders before `Month`, which also makes it the winner when both
/// granularities coexist under one prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionKind {
    /// `date=YYYY-MM-DD` partitions
    Day,
    /// `yearmonth=YYYY-MM` partitions
    Month,
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Month => write!(f, "month"),
        }
    }
}

/// One partition occurrence extracted from an object key.
///
/// `value` is the captured date (`YYYY-MM-DD`) or month (`YYYY-MM`) string.
/// The derived ordering is (kind, value); ISO date strings order correctly
/// as text, so a sorted token sequence is also chronologically sorted
/// within each kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartitionToken {
    /// Which pattern matched the source key
    pub kind: PartitionKind,

    /// The captured date or month string
    pub value: String,
}

impl PartitionToken {
    /// Creates a daily partition token.
    pub fn day(value: impl Into<String>) -> Self {
        Self {
            kind: PartitionKind::Day,
            value: value.into(),
        }
    }

    /// Creates a monthly partition token.
    pub fn month(value: impl Into<String>) -> Self {
        Self {
            kind: PartitionKind::Month,
            value: value.into(),
        }
    }
}
