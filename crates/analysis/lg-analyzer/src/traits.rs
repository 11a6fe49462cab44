//! Capability traits for object storage access.
//!
//! The core logic depends on storage through these two narrow interfaces,
//! so tests can drive it with in-memory doubles and the S3 client stays at
//! the edge of the crate.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use lg_error::Result;
use std::pin::Pin;

/// A stream of listing pages, each a batch of object keys.
pub type KeyPageStream = Pin<Box<dyn Stream<Item = Result<Vec<String>>> + Send>>;

/// Trait for paginated object listing.
///
/// Implementations must support exhaustive pagination over an unbounded
/// number of keys: page N+1 is only requested after page N is yielded.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// Lists object keys under `prefix`, yielding one page at a time.
    ///
    /// A failing page terminates the stream with an
    /// [`AccessError`](lg_error::AccessError); consumers must not treat the
    /// keys seen so far as a complete listing.
    async fn list_pages(&self, bucket: &str, prefix: &str) -> Result<KeyPageStream>;
}

/// Trait for fetching a single object's contents.
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    /// Fetches the full body of `key` from `bucket`.
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes>;
}

/// An in-memory lister over a fixed sequence of pages.
///
/// Used in tests and available to callers that already hold a key listing.
pub struct StaticLister {
    pages: Vec<Vec<String>>,
}

impl StaticLister {
    /// Creates a lister that yields the given pages in order.
    pub fn new(pages: Vec<Vec<String>>) -> Self {
        Self { pages }
    }

    /// Creates a lister with all keys on a single page.
    pub fn single_page(keys: Vec<String>) -> Self {
        Self { pages: vec![keys] }
    }
}

#[async_trait]
impl ObjectLister for StaticLister {
    async fn list_pages(&self, _bucket: &str, _prefix: &str) -> Result<KeyPageStream> {
        let pages: Vec<Result<Vec<String>>> = self.pages.clone().into_iter().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(pages)))
    }
}
