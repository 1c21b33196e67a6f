//! Human-readable text output for scan and cleanup results.
//!
//! Each renderer returns a finished `String`; the caller decides whether it
//! goes to stdout or a report file. Sizes use IEC units via `bytesize`, and
//! accents use `yansi`, which the application disables globally when color is
//! unwanted.

use std::fmt::Write;

use bytesize::ByteSize;
use yansi::Paint;

use crate::cleaner::{BatchDeleteResult, MoveResult};
use crate::discovery::{DuplicateGroup, DuplicateScanStats, LargeFileRecord, LargeFileScanStats};

/// Render a duplicate scan as text.
///
/// Groups are listed in the order the scanner returned them (most wasteful
/// first), each member on its own line with the first-seen copy marked.
#[must_use]
pub fn render_duplicates(groups: &[DuplicateGroup], stats: &DuplicateScanStats) -> String {
    // Writing into a String cannot fail
    let mut out = String::new();

    if groups.is_empty() {
        let _ = writeln!(out, "No duplicate files found.");
    } else {
        let wasted = ByteSize::b(stats.wasted_space).to_string();
        let _ = writeln!(
            out,
            "Found {} duplicate group(s), {} reclaimable",
            groups.len(),
            wasted.yellow().bold()
        );

        for (idx, group) in groups.iter().enumerate() {
            let hash = group.hash_hex();
            let each = ByteSize::b(group.size).to_string();
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "group {}: {} each, {} redundant cop{}, hash {}",
                idx + 1,
                each,
                group.duplicate_count(),
                if group.duplicate_count() == 1 { "y" } else { "ies" },
                (&hash[..12]).dim()
            );
            for (i, file) in group.files.iter().enumerate() {
                if i == 0 {
                    let _ = writeln!(out, "  {} {}", file.path.display(), "(original)".dim());
                } else {
                    let _ = writeln!(out, "  {}", file.path.display());
                }
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Considered {} file(s), hashed {} in {:.2}s",
            stats.files_considered,
            stats.files_hashed,
            stats.scan_duration.as_secs_f64()
        );
    }

    if stats.interrupted {
        let _ = writeln!(out, "{}", "Scan interrupted; results are partial.".yellow());
    }

    out
}

/// Render a large-file scan as text, one row per file, largest first.
#[must_use]
pub fn render_large_files(records: &[LargeFileRecord], stats: &LargeFileScanStats) -> String {
    let mut out = String::new();

    if records.is_empty() {
        let _ = writeln!(out, "No files at or above the threshold.");
    } else {
        let total = ByteSize::b(stats.total_size).to_string();
        let _ = writeln!(
            out,
            "Found {} file(s) totaling {}",
            records.len(),
            total.yellow().bold()
        );
        let _ = writeln!(out);

        for record in records {
            let size = ByteSize::b(record.size()).to_string();
            let _ = writeln!(
                out,
                "{:>10}  {:<9} {:>5}d  {}",
                size,
                record.kind.label(),
                record.age_days,
                record.record.path.display()
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Scanned {} file(s) in {:.2}s",
            stats.files_seen,
            stats.scan_duration.as_secs_f64()
        );
    }

    if stats.interrupted {
        let _ = writeln!(out, "{}", "Scan interrupted; results are partial.".yellow());
    }

    out
}

/// Render a batch cleanup as text.
///
/// Failure lines carry the full message, lock hint included.
#[must_use]
pub fn render_clean(result: &BatchDeleteResult) -> String {
    let mut out = String::new();

    let freed = ByteSize::b(result.bytes_freed).to_string();
    if result.all_succeeded() {
        let _ = writeln!(
            out,
            "Deleted {} folder(s), freed {}",
            result.success_count(),
            freed.green().bold()
        );
    } else {
        let _ = writeln!(
            out,
            "Deleted {} folder(s), {} failed, freed {}",
            result.success_count(),
            result.failure_count(),
            freed.green().bold()
        );
    }

    for success in &result.successes {
        let _ = writeln!(
            out,
            "  {} {} ({})",
            "deleted:".green(),
            success.path.display(),
            ByteSize::b(success.bytes_freed)
        );
    }

    for failure in &result.failures {
        let _ = writeln!(
            out,
            "  {} {}: {}",
            "failed:".red(),
            failure.path.display(),
            failure.message
        );
    }

    out
}

/// Render a completed move as a single line.
#[must_use]
pub fn render_move(result: &MoveResult) -> String {
    format!(
        "{} {} -> {}\n",
        "Moved".green(),
        result.source.display(),
        result.destination.display()
    )
}
