//! S3 client construction and storage access.
//!
//! This module keeps all AWS SDK usage at the edge of the crate:
//! - Client configuration with LocalStack support
//! - Paginated object listing and whole-object fetch behind the
//!   capability traits
//! - `s3://` path parsing

mod client;
mod list;
mod path;

pub use client::{S3Config, create_s3_client};
pub use list::S3Store;
pub use path::parse_s3_path;
