//! Analysis session state.
//!
//! The core scan and analysis functions are stateless; callers that want
//! to hold on to results across interactions own an [`AnalysisSession`]
//! and control its invalidation explicitly. Repeated runs against the
//! same bucket/prefix are idempotent, so caching by that key is safe.

use std::collections::HashMap;

use crate::partition::AnalysisResult;

/// Cache key: one analyzed location.
type Location = (String, String);

/// Explicit per-(bucket, prefix) cache of analysis results.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    results: HashMap<Location, AnalysisResult>,
}

impl AnalysisSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result for a bucket/prefix.
    pub fn get(&self, bucket: &str, prefix: &str) -> Option<&AnalysisResult> {
        self.results.get(&(bucket.to_string(), prefix.to_string()))
    }

    /// Store the result of an analysis run.
    pub fn insert(&mut self, bucket: &str, prefix: &str, result: AnalysisResult) {
        self.results
            .insert((bucket.to_string(), prefix.to_string()), result);
    }

    /// Drop the cached result for one bucket/prefix, returning it if present.
    pub fn invalidate(&mut self, bucket: &str, prefix: &str) -> Option<AnalysisResult> {
        self.results
            .remove(&(bucket.to_string(), prefix.to_string()))
    }

    /// Drop all cached results.
    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the session holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
