//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`ScanProgress`] struct which implements
//! [`ScanProgressCallback`] to display a visual progress bar in the terminal,
//! and [`DeleteProgress`] which renders batch deletions the same way.
//!
//! Scanners report progress at a fixed cadence rather than per file, so the
//! bar advances in steps. A scan over a small tree may finish without a
//! single callback firing.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::cleaner::{BatchDeleteResult, DeleteProgressCallback};

/// Progress callback for discovery scans.
///
/// Implement this trait to receive periodic updates while a scan runs.
pub trait ScanProgressCallback: Send + Sync {
    /// Called at the scanner's reporting cadence.
    ///
    /// # Arguments
    ///
    /// * `done` - Files processed so far (duplicate scans) or results found
    ///   so far (large-file scans)
    /// * `total` - Total number of files the scan will process, or 0 when the
    ///   scan has no denominator
    fn on_progress(&self, done: usize, total: usize);
}

/// Progress reporter using indicatif.
///
/// The bar is created lazily on the first callback: a percentage bar when the
/// scan knows its total, a running counter when it does not.
///
/// # Examples
///
/// ```
/// use spacesweep::progress::ScanProgress;
///
/// let progress = ScanProgress::new(false);
/// ```
pub struct ScanProgress {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl ScanProgress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bar will be displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            bar: Mutex::new(None),
            quiet,
        }
    }

    /// Finish and clear the bar, if one was ever created.
    ///
    /// Call this after the scan returns so result output starts on a clean
    /// line.
    pub fn finish(&self) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }

    /// Create a style for scans with a known total (progress bar).
    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    /// Create a style for open-ended scans (running counter).
    fn counter_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} found")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }
}

impl ScanProgressCallback for ScanProgress {
    fn on_progress(&self, done: usize, total: usize) {
        if self.quiet {
            return;
        }

        let mut bar = self.bar.lock().unwrap();
        let pb = bar.get_or_insert_with(|| {
            if total > 0 {
                let pb = self.multi.add(ProgressBar::new(total as u64));
                pb.set_style(Self::bar_style());
                pb.set_message("Hashing files");
                pb
            } else {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::counter_style());
                pb.set_message("Scanning");
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            }
        });
        pb.set_position(done as u64);
    }
}

/// Progress reporter for batch folder deletion.
///
/// Failures are printed above the bar as they happen so they stay visible
/// after the bar completes.
pub struct DeleteProgress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl DeleteProgress {
    /// Create a new deletion progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bar will be displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.red/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█>-")
    }
}

impl DeleteProgressCallback for DeleteProgress {
    fn on_folder_start(&self, path: &Path, index: usize, total: usize) {
        if self.quiet {
            return;
        }

        let mut bar = self.bar.lock().unwrap();
        let pb = bar.get_or_insert_with(|| {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(Self::bar_style());
            pb
        });
        pb.set_position((index - 1) as u64);
        pb.set_message(truncate_path(&path.to_string_lossy(), 40));
    }

    fn on_folder_success(&self, _path: &Path, _bytes_freed: u64) {
        if self.quiet {
            return;
        }

        if let Some(ref pb) = *self.bar.lock().unwrap() {
            pb.inc(1);
        }
    }

    fn on_folder_failure(&self, path: &Path, error: &str) {
        if self.quiet {
            return;
        }

        if let Some(ref pb) = *self.bar.lock().unwrap() {
            pb.inc(1);
            pb.println(format!("failed: {}: {}", path.display(), error));
        }
    }

    fn on_complete(&self, result: &BatchDeleteResult) {
        if self.quiet {
            return;
        }

        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message(result.summary());
        }
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        return path.to_string();
    }

    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if file_name.len() >= max_len {
        return format!("...{}", &file_name[file_name.len() - max_len + 3..]);
    }

    format!(".../{}", file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_path_unchanged() {
        assert_eq!(truncate_path("/tmp/a.txt", 30), "/tmp/a.txt");
    }

    #[test]
    fn test_truncate_long_path_keeps_file_name() {
        let path = "/very/long/directory/chain/that/keeps/going/file.txt";
        assert_eq!(truncate_path(path, 20), ".../file.txt");
    }

    #[test]
    fn test_truncate_long_file_name() {
        let path = "/tmp/an_extremely_long_file_name_that_overflows.txt";
        let out = truncate_path(path, 20);
        assert!(out.starts_with("..."));
        assert_eq!(out.len(), 20);
    }
}
