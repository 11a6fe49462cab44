//! Sample data preview.
//!
//! Finds the first readable CSV/Parquet/JSON file under a prefix and
//! decodes a small head-of-file preview. A candidate that cannot be
//! fetched or decoded is skipped and the search continues; exhausting all
//! candidates is "no sample available", not a failure. Only a listing
//! failure aborts the search.

mod decode;

pub use decode::{FileFormat, decode_preview};

use arrow::array::RecordBatch;
use futures::{StreamExt, pin_mut};
use lg_error::Result;
use tracing::{debug, warn};

use crate::traits::{ObjectFetcher, ObjectLister};

/// Default cap on candidate keys inspected for a sample.
pub const DEFAULT_MAX_CANDIDATES: usize = 100;

/// Default number of preview rows.
pub const DEFAULT_MAX_ROWS: usize = 10;

/// A decoded sample preview.
#[derive(Debug, Clone)]
pub struct SamplePreview {
    /// Key of the file the sample was read from
    pub key: String,

    /// Detected file format
    pub format: FileFormat,

    /// The preview rows
    pub batch: RecordBatch,
}

/// Searches a prefix for a readable sample file.
pub struct SampleFinder<'a, L: ObjectLister, F: ObjectFetcher> {
    lister: &'a L,
    fetcher: &'a F,
    max_candidates: usize,
    max_rows: usize,
}

impl<'a, L: ObjectLister, F: ObjectFetcher> SampleFinder<'a, L, F> {
    /// Create a finder with default candidate and row caps.
    pub fn new(lister: &'a L, fetcher: &'a F) -> Self {
        Self {
            lister,
            fetcher,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    /// Set the maximum number of preview rows.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Set the maximum number of candidate keys to inspect.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Find and decode the first readable sample under `prefix`.
    ///
    /// Only the first listing page is consulted, capped at
    /// `max_candidates` keys; a prefix whose first page holds no readable
    /// tabular file yields `Ok(None)`.
    pub async fn find(&self, bucket: &str, prefix: &str) -> Result<Option<SamplePreview>> {
        let stream = self.lister.list_pages(bucket, prefix).await?;
        pin_mut!(stream);

        let candidates = match stream.next().await {
            Some(page) => page?,
            None => return Ok(None),
        };

        for key in candidates.into_iter().take(self.max_candidates) {
            let Some(format) = FileFormat::from_key(&key) else {
                continue;
            };

            let bytes = match self.fetcher.get(bucket, &key).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to fetch sample candidate");
                    continue;
                }
            };

            match decode_preview(format, &key, &bytes, self.max_rows) {
                Ok(batch) => {
                    debug!(key = %key, format = %format, rows = batch.num_rows(), "Decoded sample");
                    return Ok(Some(SamplePreview { key, format, batch }));
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to decode sample candidate");
                    continue;
                }
            }
        }

        debug!(bucket = %bucket, prefix = %prefix, "No readable sample found");
        Ok(None)
    }
}
