//! CSV output formatters for scan and cleanup results.
//!
//! Provides machine-readable CSV output for spreadsheets and data analysis.
//! Duplicate scans emit one row per member file; large-file scans one row per
//! file; cleanups one row per folder.
//!
//! # Duplicate Columns
//!
//! - `group_id`: Numeric ID identifying the duplicate group
//! - `hash`: BLAKE3 content hash (hexadecimal)
//! - `path`: Path to the file
//! - `size`: File size in bytes
//! - `modified`: Last modified time (RFC 3339 format)
//!
//! # Example
//!
//! ```no_run
//! use spacesweep::discovery::DuplicateScanner;
//! use spacesweep::output::DuplicateCsv;
//! use std::path::Path;
//!
//! let scanner = DuplicateScanner::new();
//! let (groups, _) = scanner.scan(Path::new(".")).unwrap();
//!
//! let output = DuplicateCsv::new(&groups);
//! output.write_to(std::io::stdout()).unwrap();
//! ```

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::cleaner::{BatchDeleteResult, MoveResult};
use crate::discovery::{DuplicateGroup, LargeFileRecord};

use super::format_timestamp;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct DuplicateRow {
    group_id: usize,
    hash: String,
    path: String,
    size: u64,
    modified: String,
}

/// CSV output formatter for duplicate groups.
pub struct DuplicateCsv<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> DuplicateCsv<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for (idx, group) in self.groups.iter().enumerate() {
            let group_id = idx + 1;
            let hash_hex = group.hash_hex();

            for file in &group.files {
                csv_writer.serialize(DuplicateRow {
                    group_id,
                    hash: hash_hex.clone(),
                    path: file.path.to_string_lossy().into_owned(),
                    size: file.size,
                    modified: format_timestamp(file.modified),
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[derive(Debug, Serialize)]
struct LargeFileRow {
    path: String,
    size: u64,
    kind: &'static str,
    age_days: u64,
    modified: String,
}

/// CSV output formatter for large-file records.
pub struct LargeFileCsv<'a> {
    records: &'a [LargeFileRecord],
}

impl<'a> LargeFileCsv<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(records: &'a [LargeFileRecord]) -> Self {
        Self { records }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for record in self.records {
            csv_writer.serialize(LargeFileRow {
                path: record.record.path.to_string_lossy().into_owned(),
                size: record.size(),
                kind: record.kind.label(),
                age_days: record.age_days,
                modified: format_timestamp(record.record.modified),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[derive(Debug, Serialize)]
struct CleanRow {
    path: String,
    outcome: &'static str,
    bytes_freed: Option<u64>,
    detail: String,
}

/// CSV output formatter for batch cleanup results.
///
/// Successes come first, then failures, each tagged in the `outcome` column.
pub struct CleanCsv<'a> {
    result: &'a BatchDeleteResult,
}

impl<'a> CleanCsv<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(result: &'a BatchDeleteResult) -> Self {
        Self { result }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for success in &self.result.successes {
            csv_writer.serialize(CleanRow {
                path: success.path.to_string_lossy().into_owned(),
                outcome: "deleted",
                bytes_freed: Some(success.bytes_freed),
                detail: String::new(),
            })?;
        }

        for failure in &self.result.failures {
            csv_writer.serialize(CleanRow {
                path: failure.path.to_string_lossy().into_owned(),
                outcome: "failed",
                bytes_freed: None,
                detail: failure.message.clone(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[derive(Debug, Serialize)]
struct MoveRow {
    source: String,
    destination: String,
}

/// CSV output formatter for a file move (single row).
pub struct MoveCsv<'a> {
    result: &'a MoveResult,
}

impl<'a> MoveCsv<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(result: &'a MoveResult) -> Self {
        Self { result }
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        let mut csv_writer = csv::Writer::from_writer(&mut buffer);
        csv_writer.serialize(MoveRow {
            source: self.result.source.to_string_lossy().into_owned(),
            destination: self.result.destination.to_string_lossy().into_owned(),
        })?;
        csv_writer.flush()?;
        drop(csv_writer);
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::{BatchFailure, DeleteResult};
    use crate::scanner::FileRecord;
    use std::path::PathBuf;
    use std::time::SystemTime;

    #[test]
    fn test_duplicate_csv_basic() {
        let now = SystemTime::now();
        let groups = vec![DuplicateGroup::new(
            [0u8; 32],
            7,
            vec![
                FileRecord::new(PathBuf::from("/tmp/file1.txt"), 7, now),
                FileRecord::new(PathBuf::from("/tmp/file2.txt"), 7, now),
            ],
        )];

        let csv_str = DuplicateCsv::new(&groups).to_string().unwrap();

        assert!(csv_str.contains("group_id,hash,path,size,modified"));
        assert!(
            csv_str.contains("1,0000000000000000000000000000000000000000000000000000000000000000")
        );
        assert!(csv_str.contains("file1.txt"));
        assert!(csv_str.contains("file2.txt"));
        assert!(csv_str.contains(",7,"));
    }

    #[test]
    fn test_duplicate_csv_quotes_commas() {
        let now = SystemTime::now();
        let groups = vec![DuplicateGroup::new(
            [0u8; 32],
            7,
            vec![
                FileRecord::new(PathBuf::from("/tmp/file,with,comma.txt"), 7, now),
                FileRecord::new(PathBuf::from("/tmp/other.txt"), 7, now),
            ],
        )];

        let csv_str = DuplicateCsv::new(&groups).to_string().unwrap();

        assert!(csv_str.contains('"'));
        assert!(csv_str.contains("file,with,comma.txt"));
    }

    #[test]
    fn test_duplicate_csv_group_ids_count_from_one() {
        let now = SystemTime::now();
        let groups = vec![
            DuplicateGroup::new(
                [0u8; 32],
                1,
                vec![
                    FileRecord::new(PathBuf::from("/a"), 1, now),
                    FileRecord::new(PathBuf::from("/b"), 1, now),
                ],
            ),
            DuplicateGroup::new(
                [1u8; 32],
                1,
                vec![
                    FileRecord::new(PathBuf::from("/c"), 1, now),
                    FileRecord::new(PathBuf::from("/d"), 1, now),
                ],
            ),
        ];

        let csv_str = DuplicateCsv::new(&groups).to_string().unwrap();
        assert!(csv_str.lines().any(|l| l.starts_with("1,")));
        assert!(csv_str.lines().any(|l| l.starts_with("2,")));
    }

    #[test]
    fn test_large_file_csv() {
        let now = SystemTime::now();
        let record = LargeFileRecord::new(
            FileRecord::new(PathBuf::from("/videos/movie.mkv"), 1024, now),
            now,
        );

        let csv_str = LargeFileCsv::new(&[record]).to_string().unwrap();

        assert!(csv_str.contains("path,size,kind,age_days,modified"));
        assert!(csv_str.contains("movie.mkv"));
        assert!(csv_str.contains("video"));
    }

    #[test]
    fn test_clean_csv_mixed_outcomes() {
        let result = BatchDeleteResult {
            successes: vec![DeleteResult {
                path: PathBuf::from("/a/.npm"),
                bytes_freed: 600,
                existed: true,
            }],
            failures: vec![BatchFailure {
                path: PathBuf::from("/b/locked"),
                message: "Some files are locked. Try closing VS Code.".to_string(),
            }],
            bytes_freed: 600,
        };

        let csv_str = CleanCsv::new(&result).to_string().unwrap();

        assert!(csv_str.contains("path,outcome,bytes_freed,detail"));
        assert!(csv_str.contains("/a/.npm,deleted,600,"));
        assert!(csv_str.contains("failed"));
        assert!(csv_str.contains("VS Code"));
    }

    #[test]
    fn test_move_csv_single_row() {
        let result = MoveResult {
            source: PathBuf::from("/src/big.iso"),
            destination: PathBuf::from("/archive/big.iso"),
        };

        let csv_str = MoveCsv::new(&result).to_string().unwrap();

        assert!(csv_str.contains("source,destination"));
        assert!(csv_str.contains("/src/big.iso,/archive/big.iso"));
    }
}
