//! Gap analysis over a partition token set.
//!
//! Computes the full calendar range between the minimum and maximum
//! observed partitions and reports the values that have no partition.
//! Month stepping is exact calendar arithmetic: each step advances one
//! month and December rolls over into January of the next year. Fixed
//! day-count approximations would skip or duplicate months near
//! month-length irregularities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

use super::{PartitionKind, PartitionToken};

/// The structured result of one gap analysis.
///
/// When no recognizable partitions were found, `partition_kind` is `None`
/// and the range fields are unpopulated. That is a valid outcome, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Granularity the analysis operated in, if any partitions were found
    pub partition_kind: Option<PartitionKind>,

    /// Count of all tokens passed in, both kinds
    pub total_partitions: usize,

    /// Earliest observed partition value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,

    /// Latest observed partition value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,

    /// Values in [min, max] with no partition, ascending
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl AnalysisResult {
    fn empty(total_partitions: usize) -> Self {
        Self {
            partition_kind: None,
            total_partitions,
            min: None,
            max: None,
            missing: Vec::new(),
        }
    }
}

/// A calendar month: a (year, month) pair.
///
/// The derived ordering is chronological (year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Parse from a `YYYY-MM` string.
    fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// The following calendar month, rolling over year boundaries.
    fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Analyze a partition token set for calendar gaps.
///
/// Daily partitions take precedence: when both kinds are present, monthly
/// tokens are excluded from the range and missing computation but still
/// counted in `total_partitions`. The output is a pure function of the
/// input token set.
pub fn analyze_partitions(tokens: &[PartitionToken]) -> AnalysisResult {
    let total_partitions = tokens.len();

    if tokens.is_empty() {
        return AnalysisResult::empty(0);
    }

    let days: BTreeSet<NaiveDate> = tokens
        .iter()
        .filter(|t| t.kind == PartitionKind::Day)
        .filter_map(|t| parse_day(&t.value))
        .collect();

    if !days.is_empty() {
        return analyze_days(&days, total_partitions);
    }

    let months: BTreeSet<YearMonth> = tokens
        .iter()
        .filter(|t| t.kind == PartitionKind::Month)
        .filter_map(|t| parse_month(&t.value))
        .collect();

    if !months.is_empty() {
        return analyze_months(&months, total_partitions);
    }

    AnalysisResult::empty(total_partitions)
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            // Pattern-matched but not a real calendar date (e.g. 2024-13-40)
            warn!(value = %value, "Skipping unparseable day partition");
            None
        }
    }
}

fn parse_month(value: &str) -> Option<YearMonth> {
    match YearMonth::parse(value) {
        Some(ym) => Some(ym),
        None => {
            warn!(value = %value, "Skipping unparseable month partition");
            None
        }
    }
}

fn analyze_days(observed: &BTreeSet<NaiveDate>, total_partitions: usize) -> AnalysisResult {
    // Non-empty set, so the extrema exist
    let (min, max) = match (observed.first(), observed.last()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return AnalysisResult::empty(total_partitions),
    };

    let missing: Vec<String> = min
        .iter_days()
        .take_while(|d| *d <= max)
        .filter(|d| !observed.contains(d))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    AnalysisResult {
        partition_kind: Some(PartitionKind::Day),
        total_partitions,
        min: Some(min.format("%Y-%m-%d").to_string()),
        max: Some(max.format("%Y-%m-%d").to_string()),
        missing,
    }
}

fn analyze_months(observed: &BTreeSet<YearMonth>, total_partitions: usize) -> AnalysisResult {
    let (min, max) = match (observed.first(), observed.last()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return AnalysisResult::empty(total_partitions),
    };

    let mut missing = Vec::new();
    let mut current = min;
    while current <= max {
        if !observed.contains(&current) {
            missing.push(current.to_string());
        }
        current = current.succ();
    }

    AnalysisResult {
        partition_kind: Some(PartitionKind::Month),
        total_partitions,
        min: Some(min.to_string()),
        max: Some(max.to_string()),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(values: &[&str]) -> Vec<PartitionToken> {
        values.iter().map(|v| PartitionToken::day(*v)).collect()
    }

    fn months(values: &[&str]) -> Vec<PartitionToken> {
        values.iter().map(|v| PartitionToken::month(*v)).collect()
    }

    #[test]
    fn test_empty_token_set() {
        let result = analyze_partitions(&[]);

        assert_eq!(result.partition_kind, None);
        assert_eq!(result.total_partitions, 0);
        assert_eq!(result.min, None);
        assert_eq!(result.max, None);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_day_gap() {
        let result = analyze_partitions(&days(&["2024-01-01", "2024-01-05"]));

        assert_eq!(result.partition_kind, Some(PartitionKind::Day));
        assert_eq!(result.total_partitions, 2);
        assert_eq!(result.min.as_deref(), Some("2024-01-01"));
        assert_eq!(result.max.as_deref(), Some("2024-01-05"));
        assert_eq!(result.missing, vec!["2024-01-02", "2024-01-03", "2024-01-04"]);
    }

    #[test]
    fn test_day_contiguous_range() {
        let result = analyze_partitions(&days(&["2024-03-01", "2024-03-02", "2024-03-03"]));

        assert_eq!(result.total_partitions, 3);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_single_day() {
        let result = analyze_partitions(&days(&["2024-06-15"]));

        assert_eq!(result.total_partitions, 1);
        assert_eq!(result.min.as_deref(), Some("2024-06-15"));
        assert_eq!(result.max.as_deref(), Some("2024-06-15"));
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_day_gap_across_leap_february() {
        // 2024 is a leap year: Feb 29 exists and must be reported
        let result = analyze_partitions(&days(&["2024-02-28", "2024-03-01"]));

        assert_eq!(result.missing, vec!["2024-02-29"]);
    }

    #[test]
    fn test_month_gap_variable_lengths() {
        // Feb..Apr crosses 29- and 31-day months; exactly two gaps
        let result = analyze_partitions(&months(&["2024-01", "2024-04"]));

        assert_eq!(result.partition_kind, Some(PartitionKind::Month));
        assert_eq!(result.min.as_deref(), Some("2024-01"));
        assert_eq!(result.max.as_deref(), Some("2024-04"));
        assert_eq!(result.missing, vec!["2024-02", "2024-03"]);
    }

    #[test]
    fn test_month_gap_year_rollover() {
        let result = analyze_partitions(&months(&["2023-11", "2024-02"]));

        assert_eq!(result.missing, vec!["2023-12", "2024-01"]);
    }

    #[test]
    fn test_month_multi_year_span() {
        let result = analyze_partitions(&months(&["2022-12", "2023-06", "2024-01"]));

        assert_eq!(result.min.as_deref(), Some("2022-12"));
        assert_eq!(result.max.as_deref(), Some("2024-01"));
        assert_eq!(result.missing.len(), 11);
        assert_eq!(result.missing.first().map(String::as_str), Some("2023-01"));
        assert_eq!(result.missing.last().map(String::as_str), Some("2023-12"));
    }

    #[test]
    fn test_single_month() {
        let result = analyze_partitions(&months(&["2024-07"]));

        assert_eq!(result.total_partitions, 1);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_day_takes_precedence_over_month() {
        let mut tokens = days(&["2024-01-01", "2024-01-03"]);
        tokens.extend(months(&["2023-05", "2023-08"]));

        let result = analyze_partitions(&tokens);

        // Month tokens are excluded from the range but still counted
        assert_eq!(result.partition_kind, Some(PartitionKind::Day));
        assert_eq!(result.total_partitions, 4);
        assert_eq!(result.min.as_deref(), Some("2024-01-01"));
        assert_eq!(result.missing, vec!["2024-01-02"]);
    }

    #[test]
    fn test_unparseable_day_values_skipped() {
        let result = analyze_partitions(&days(&["2024-01-01", "2024-13-40", "2024-01-03"]));

        assert_eq!(result.total_partitions, 3);
        assert_eq!(result.missing, vec!["2024-01-02"]);
    }

    #[test]
    fn test_idempotent() {
        let tokens = days(&["2024-01-01", "2024-01-04"]);

        let first = analyze_partitions(&tokens);
        let second = analyze_partitions(&tokens);

        assert_eq!(first, second);
    }

    #[test]
    fn test_year_month_succ_rollover() {
        let dec = YearMonth { year: 2023, month: 12 };
        assert_eq!(dec.succ(), YearMonth { year: 2024, month: 1 });

        let jan = YearMonth { year: 2024, month: 1 };
        assert_eq!(jan.succ(), YearMonth { year: 2024, month: 2 });
    }

    #[test]
    fn test_year_month_parse() {
        assert_eq!(
            YearMonth::parse("2024-03"),
            Some(YearMonth { year: 2024, month: 3 })
        );
        assert_eq!(YearMonth::parse("2024-13"), None);
        assert_eq!(YearMonth::parse("2024"), None);
        assert_eq!(YearMonth::parse("abcd-ef"), None);
    }
}
