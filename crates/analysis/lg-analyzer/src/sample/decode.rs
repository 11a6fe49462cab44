//! Format detection and decoding of sample bytes into a record batch.

use arrow::array::RecordBatch;
use bytes::Bytes;
use lg_error::SampleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufReader, Cursor};
use std::sync::Arc;

/// Supported tabular file formats, detected from the key extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Parquet,
    Json,
}

impl FileFormat {
    /// Detect the format from a key's extension (case-insensitive).
    ///
    /// Returns `None` for anything other than `.csv`, `.parquet`, `.json`.
    pub fn from_key(key: &str) -> Option<Self> {
        let lower = key.to_lowercase();
        if lower.ends_with(".csv") {
            Some(Self::Csv)
        } else if lower.ends_with(".parquet") {
            Some(Self::Parquet)
        } else if lower.ends_with(".json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Parquet => write!(f, "parquet"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Decode the head of a file into a single record batch of at most
/// `max_rows` rows.
pub fn decode_preview(
    format: FileFormat,
    key: &str,
    bytes: &Bytes,
    max_rows: usize,
) -> Result<RecordBatch, SampleError> {
    let batch = match format {
        FileFormat::Csv => decode_csv(bytes, max_rows),
        FileFormat::Parquet => decode_parquet(bytes, max_rows),
        FileFormat::Json => decode_json(bytes, max_rows),
    }
    .map_err(|e| SampleError::Decode {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    if batch.num_rows() > max_rows {
        Ok(batch.slice(0, max_rows))
    } else {
        Ok(batch)
    }
}

fn decode_csv(bytes: &Bytes, max_rows: usize) -> Result<RecordBatch, arrow::error::ArrowError> {
    let format = arrow::csv::reader::Format::default().with_header(true);
    let (schema, _) = format.infer_schema(Cursor::new(bytes.as_ref()), Some(max_rows))?;
    let schema = Arc::new(schema);

    let mut reader = arrow::csv::ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(max_rows)
        .build(Cursor::new(bytes.as_ref()))?;

    match reader.next() {
        Some(batch) => batch,
        None => Ok(RecordBatch::new_empty(schema)),
    }
}

fn decode_parquet(bytes: &Bytes, max_rows: usize) -> Result<RecordBatch, arrow::error::ArrowError> {
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes.clone())?;
    let schema = builder.schema().clone();
    let mut reader = builder.with_batch_size(max_rows).build()?;

    match reader.next() {
        Some(batch) => batch,
        None => Ok(RecordBatch::new_empty(schema)),
    }
}

fn decode_json(bytes: &Bytes, max_rows: usize) -> Result<RecordBatch, arrow::error::ArrowError> {
    // Line-delimited JSON; a top-level-array file fails decode and the
    // candidate is skipped upstream
    let (schema, _) = arrow::json::reader::infer_json_schema(
        BufReader::new(Cursor::new(bytes.as_ref())),
        Some(max_rows),
    )?;
    let schema = Arc::new(schema);

    let mut reader = arrow::json::ReaderBuilder::new(schema.clone())
        .with_batch_size(max_rows)
        .build(BufReader::new(Cursor::new(bytes.as_ref())))?;

    match reader.next() {
        Some(batch) => batch,
        None => Ok(RecordBatch::new_empty(schema)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_key() {
        assert_eq!(FileFormat::from_key("data/file.csv"), Some(FileFormat::Csv));
        assert_eq!(
            FileFormat::from_key("data/FILE.PARQUET"),
            Some(FileFormat::Parquet)
        );
        assert_eq!(
            FileFormat::from_key("date=2024-01-01/part.json"),
            Some(FileFormat::Json)
        );
        assert_eq!(FileFormat::from_key("data/_SUCCESS"), None);
        assert_eq!(FileFormat::from_key("data/file.csv.gz"), None);
    }

    #[test]
    fn test_decode_csv_preview() {
        let data = Bytes::from_static(b"id,name\n1,alpha\n2,beta\n3,gamma\n");

        let batch = decode_preview(FileFormat::Csv, "f.csv", &data, 2).unwrap();

        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.schema().field(0).name(), "id");
    }

    #[test]
    fn test_decode_csv_fewer_rows_than_cap() {
        let data = Bytes::from_static(b"id\n1\n");

        let batch = decode_preview(FileFormat::Csv, "f.csv", &data, 10).unwrap();

        assert_eq!(batch.num_rows(), 1);
    }

    #[test]
    fn test_decode_json_preview() {
        let data = Bytes::from_static(b"{\"id\":1,\"name\":\"a\"}\n{\"id\":2,\"name\":\"b\"}\n");

        let batch = decode_preview(FileFormat::Json, "f.json", &data, 10).unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 2);
    }

    #[test]
    fn test_decode_garbage_fails_with_key() {
        let data = Bytes::from_static(b"\x00\x01\x02 not parquet");

        let err = decode_preview(FileFormat::Parquet, "bad.parquet", &data, 10).unwrap_err();

        assert!(err.to_string().contains("bad.parquet"));
    }
}
