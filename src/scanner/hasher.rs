//! Streaming file content hashing.
//!
//! Files are read in fixed-size chunks and fed into an incremental BLAKE3
//! hasher, so memory use stays constant regardless of file size. Two entry
//! points cover the two call sites: [`hash_file`] returns a full error for
//! callers that surface failures, [`try_hash_file`] logs and skips for the
//! scan path where an unreadable file must never abort the walk.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Read granularity for streaming hashes.
pub const HASH_CHUNK_SIZE: usize = 8 * 1024;

/// A file content digest (32-byte BLAKE3).
pub type Hash = [u8; 32];

/// Errors produced while hashing a file.
#[derive(Debug, Error)]
pub enum HashError {
    /// The file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A read failed partway through the file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed mid-read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Hash a file's full contents, reading in [`HASH_CHUNK_SIZE`] chunks.
pub fn hash_file(path: &Path) -> Result<Hash, HashError> {
    let mut file = File::open(path).map_err(|source| HashError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; HASH_CHUNK_SIZE];

    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(HashError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        hasher.update(&buffer[..read]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Hash a file, logging and returning `None` if it cannot be read.
///
/// Used on the scan path, where a vanished or permission-restricted file is
/// skipped rather than treated as a failure.
pub fn try_hash_file(path: &Path) -> Option<Hash> {
    match hash_file(path) {
        Ok(hash) => Some(hash),
        Err(err) => {
            log::debug!("Skipping unhashable file: {err}");
            None
        }
    }
}

/// Render a digest as lowercase hex.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut hex = String::with_capacity(hash.len() * 2);
    for byte in hash {
        // Writing into a String cannot fail
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
