//! `s3://` path parsing.

use lg_error::{AnalyzerError, Result};

/// Parse an S3 path into bucket and prefix.
///
/// Unlike an object URI, the prefix part may be empty (analyze a whole
/// bucket) and may or may not carry a trailing slash.
pub fn parse_s3_path(path: &str) -> Result<(String, String)> {
    let url = url::Url::parse(path)
        .map_err(|e| AnalyzerError::Config(format!("Invalid S3 path '{path}': {e}")))?;

    if url.scheme() != "s3" {
        return Err(AnalyzerError::Config(format!(
            "Expected s3:// path, got: {path}"
        )));
    }

    let bucket = url
        .host_str()
        .ok_or_else(|| AnalyzerError::Config(format!("Missing bucket in S3 path: {path}")))?;

    let prefix = url.path().trim_start_matches('/');

    Ok((bucket.to_string(), prefix.to_string()))
}
