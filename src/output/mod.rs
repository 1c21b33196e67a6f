//! Output formatters for scan and cleanup results.
//!
//! This module provides the output formats the CLI exposes:
//! - Text for humans
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use spacesweep::discovery::DuplicateScanner;
//! use spacesweep::error::ExitCode;
//! use spacesweep::output::DuplicateReport;
//! use std::path::Path;
//!
//! let scanner = DuplicateScanner::new();
//! let (groups, stats) = scanner.scan(Path::new(".")).unwrap();
//!
//! let report = DuplicateReport::new(&groups, &stats, ExitCode::Success);
//! println!("{}", report.to_json_pretty().unwrap());
//! ```

use std::time::SystemTime;

use chrono::{DateTime, Utc};

pub mod csv;
pub mod json;
pub mod text;

// Re-export main types
pub use csv::{CleanCsv, CsvOutputError, DuplicateCsv, LargeFileCsv, MoveCsv};
pub use json::{CleanReport, DuplicateReport, JsonOutputError, LargeFileReport, MoveReport};
pub use text::{render_clean, render_duplicates, render_large_files, render_move};

/// Format a timestamp as RFC 3339 for machine-readable output.
pub(crate) fn format_timestamp(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.to_rfc3339()
}
