//! Deletion and relocation engines.
//!
//! Everything here surfaces failures individually, unlike the scan walk,
//! which swallows them. Submodules:
//! - [`delete`]: folder removal with size-before-delete accounting, a
//!   hard timeout, and serial batch processing
//! - [`move_file`]: single-file relocation that never overwrites
//! - [`hints`]: diagnostic hints for lock-prone tool directories

pub mod delete;
pub mod hints;
pub mod move_file;

pub use delete::{
    delete_folder, delete_folders_batch, folder_size, BatchDeleteResult, BatchFailure, DeleteError,
    DeleteProgressCallback, DeleteResult, DELETE_TIMEOUT,
};
pub use hints::lock_hint;
pub use move_file::{move_file, MoveError, MoveResult};
