//! spacesweep - Disk Space Reclamation Toolkit
//!
//! A cross-platform Rust CLI for winning disk space back: finds duplicate
//! files using content hashing (BLAKE3), finds oversized files by threshold,
//! and deletes or relocates them with lock-aware diagnostics when a removal
//! fails.

pub mod app;
pub mod cleaner;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

pub use app::run_app;
