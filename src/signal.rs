//! Signal handling for graceful shutdown.
//!
//! This module provides centralized Ctrl+C handling for the spacesweep CLI.
//! It wraps an `AtomicBool` flag that can be shared across threads; scanners
//! poll the flag and return their partial results when it flips.
//!
//! # Usage
//!
//! ```rust,no_run
//! use spacesweep::signal::{install_handler, ShutdownHandler};
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//!
//! if handler.is_shutdown_requested() {
//!     println!("Interrupted, stopping...");
//!     return;
//! }
//!
//! // Pass the flag to scanners via with_cancel_flag().
//! let cancel_flag = handler.get_flag();
//! ```
//!
//! When a signal is received the flag is set, a short notice is printed to
//! stderr, and the application exits with code 130 (128 + SIGINT) once the
//! interrupted operation has wound down.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Centralized shutdown handler for graceful termination.
///
/// Wraps an `AtomicBool` flag that is set when Ctrl+C is received. Clones
/// share the same flag, so a handler can live in the application loop while
/// its flag travels into scanner threads.
///
/// # Example
///
/// ```rust,no_run
/// use spacesweep::signal::ShutdownHandler;
/// use spacesweep::discovery::DuplicateScanner;
///
/// let handler = ShutdownHandler::new();
/// let scanner = DuplicateScanner::new().with_cancel_flag(handler.get_flag());
/// ```
#[derive(Debug, Clone)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a new handler with the flag initially unset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    ///
    /// Observed by anything holding the flag from `get_flag()`.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the flag for passing to scanner threads.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Reset the flag to `false`.
    ///
    /// Used when the process-global handler is reused across runs.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install a Ctrl+C handler that sets the shutdown flag on interrupt.
///
/// Call once, early in startup, before any long-running operation begins.
///
/// The OS allows only one handler per process, so the handler is stored in a
/// process-global and reused (with its flag reset) on subsequent calls. If
/// registration fails because something else already claimed the signal, a
/// detached handler is returned instead; it still works for manual
/// `request_shutdown()` calls, which keeps parallel tests that drive the
/// application loop from failing on registration conflicts.
///
/// # Errors
///
/// Currently always succeeds; the `Result` is kept so callers handle future
/// registration failures uniformly.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);

        let _ = writeln!(std::io::stderr(), "\nInterrupted, stopping...");
        let _ = std::io::stderr().flush();

        log::info!("Shutdown signal received");
    }) {
        Ok(()) => {
            let _ = GLOBAL_HANDLER.set(handler.clone());
            Ok(handler)
        }
        Err(_) => {
            if let Some(handler) = GLOBAL_HANDLER.get() {
                handler.reset();
                Ok(handler.clone())
            } else {
                log::debug!("Ctrl+C handler already registered, using detached handler");
                let fallback = ShutdownHandler::new();
                let _ = GLOBAL_HANDLER.set(fallback.clone());
                Ok(fallback)
            }
        }
    }
}
