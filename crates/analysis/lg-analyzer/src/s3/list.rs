//! S3 object listing and fetch with pagination support.

use async_stream::try_stream;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use bytes::Bytes;
use lg_error::{AccessError, Result};
use tracing::debug;

use crate::traits::{KeyPageStream, ObjectFetcher, ObjectLister};

/// S3-backed implementation of the listing and fetch capabilities.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Wrap an existing S3 client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectLister for S3Store {
    /// List object keys with automatic pagination.
    ///
    /// Each yielded page corresponds to one `ListObjectsV2` response.
    /// Directory markers (keys ending with `/`) are filtered out. The next
    /// page is only requested after the current one has been yielded.
    async fn list_pages(&self, bucket: &str, prefix: &str) -> Result<KeyPageStream> {
        let client = self.client.clone();
        let bucket = bucket.to_string();
        let prefix = prefix.to_string();

        Ok(Box::pin(try_stream! {
            let mut continuation_token: Option<String> = None;
            let mut page_num = 0usize;

            loop {
                let mut req = client.list_objects_v2().bucket(&bucket);

                if !prefix.is_empty() {
                    req = req.prefix(&prefix);
                }

                if let Some(ref token) = continuation_token {
                    req = req.continuation_token(token);
                }

                let resp = req
                    .send()
                    .await
                    .map_err(|e| classify_sdk_error(&bucket, DisplayErrorContext(&e).to_string()))?;

                page_num += 1;

                let mut keys = Vec::new();
                if let Some(contents) = resp.contents {
                    for obj in contents {
                        let key = obj.key.unwrap_or_default();

                        // Skip directory markers and empty keys
                        if key.is_empty() || key.ends_with('/') {
                            continue;
                        }

                        keys.push(key);
                    }
                }

                debug!(page = page_num, keys = keys.len(), "Listed page");
                yield keys;

                if resp.is_truncated == Some(true) {
                    continuation_token = resp.next_continuation_token;
                    if continuation_token.is_none() {
                        break;
                    }
                } else {
                    break;
                }
            }
        }))
    }
}

#[async_trait]
impl ObjectFetcher for S3Store {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_sdk_error(key, DisplayErrorContext(&e).to_string()))?;

        let body = resp.body.collect().await.map_err(|e| {
            AccessError::Network(format!("reading body of '{key}': {e}"))
        })?;

        Ok(body.into_bytes())
    }
}

/// Classify a rendered SDK error into an [`AccessError`] variant.
///
/// The SDK surfaces service errors through deeply nested types; matching on
/// the rendered error text mirrors how the service codes appear on the wire.
fn classify_sdk_error(subject: &str, rendered: String) -> AccessError {
    let lower = rendered.to_lowercase();

    if lower.contains("accessdenied") || lower.contains("invalidaccesskeyid")
        || lower.contains("signaturedoesnotmatch")
        || lower.contains("403")
    {
        AccessError::Denied(format!("'{subject}': {rendered}"))
    } else if lower.contains("nosuchbucket") || lower.contains("nosuchkey") || lower.contains("404")
    {
        AccessError::NotFound(format!("'{subject}': {rendered}"))
    } else {
        AccessError::Network(format!("'{subject}': {rendered}"))
    }
}
