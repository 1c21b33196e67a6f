//! Single-file relocation without overwrite.
//!
//! # Overview
//!
//! Moving validates in a fixed order: the source must exist and be a
//! regular file, the destination directory is created (parents included)
//! if absent, and a same-named file at the destination fails the move
//! rather than being overwritten. The move itself is an atomic rename
//! when source and destination share a filesystem, falling back to
//! copy-then-delete across filesystems. Any failure leaves the source
//! intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for file moves.
#[derive(Debug, Error)]
pub enum MoveError {
    /// The source path does not exist.
    #[error("Source file doesn't exist")]
    SourceMissing(PathBuf),

    /// The source exists but is not a regular file.
    #[error("Source path is not a file")]
    SourceNotAFile(PathBuf),

    /// The destination directory could not be created.
    #[error("Failed to create destination directory: {cause}")]
    CreateDestination {
        /// Underlying I/O error.
        #[source]
        cause: io::Error,
    },

    /// The destination path is not a directory.
    #[error("Destination is not a directory")]
    DestinationNotADirectory(PathBuf),

    /// A file with the same name already exists at the destination.
    #[error("Destination file already exists")]
    DestinationExists(PathBuf),

    /// The filesystem refused the move.
    #[error("Permission denied: {cause}")]
    PermissionDenied {
        /// Underlying I/O error.
        #[source]
        cause: io::Error,
    },

    /// The move failed for an I/O reason other than permissions.
    #[error("Cannot move file: {cause}")]
    Io {
        /// Underlying I/O error.
        #[source]
        cause: io::Error,
    },
}

/// Result of a successful move.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Original location of the file.
    pub source: PathBuf,
    /// Where the file now lives.
    pub destination: PathBuf,
}

fn map_move_error(error: io::Error) -> MoveError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => MoveError::PermissionDenied { cause: error },
        _ => MoveError::Io { cause: error },
    }
}

/// Copy across filesystems, then remove the source.
///
/// Cleans up the destination copy on any failure so the filesystem is
/// left exactly as before.
fn copy_then_remove(source: &Path, destination: &Path) -> Result<(), MoveError> {
    if let Err(e) = fs::copy(source, destination) {
        let _ = fs::remove_file(destination);
        return Err(map_move_error(e));
    }
    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(destination);
        return Err(map_move_error(e));
    }
    Ok(())
}

/// Move a file into a directory, keeping its name.
///
/// # Errors
///
/// Validation failures ([`MoveError::SourceMissing`],
/// [`MoveError::SourceNotAFile`], [`MoveError::CreateDestination`],
/// [`MoveError::DestinationNotADirectory`],
/// [`MoveError::DestinationExists`]) are checked in that order before
/// anything is touched. I/O failures during the move surface as
/// [`MoveError::PermissionDenied`] or [`MoveError::Io`]; in every failure
/// case the source file is left unchanged.
pub fn move_file(source: &Path, dest_dir: &Path) -> Result<MoveResult, MoveError> {
    if !source.exists() {
        return Err(MoveError::SourceMissing(source.to_path_buf()));
    }
    if !source.is_file() {
        return Err(MoveError::SourceNotAFile(source.to_path_buf()));
    }

    fs::create_dir_all(dest_dir).map_err(|cause| MoveError::CreateDestination { cause })?;
    if !dest_dir.is_dir() {
        return Err(MoveError::DestinationNotADirectory(dest_dir.to_path_buf()));
    }

    let Some(file_name) = source.file_name() else {
        return Err(MoveError::SourceNotAFile(source.to_path_buf()));
    };
    let destination = dest_dir.join(file_name);
    if destination.exists() {
        return Err(MoveError::DestinationExists(destination));
    }

    match fs::rename(source, &destination) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "Rename crossed filesystems, copying {} -> {}",
                source.display(),
                destination.display()
            );
            copy_then_remove(source, &destination)?;
        }
        Err(e) => return Err(map_move_error(e)),
    }

    log::info!("Moved {} -> {}", source.display(), destination.display());
    Ok(MoveResult {
        source: source.to_path_buf(),
        destination,
    })
}
