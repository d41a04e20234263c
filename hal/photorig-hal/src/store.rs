//! Image store abstraction
//!
//! Paths handed to the store are relative to its root (the project output
//! directory). The camera receives the same relative paths, so both must be
//! rooted at the same place.

use core::fmt;

/// Errors from image store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Directory already exists and must not be reused
    AlreadyExists,
    /// Path contains components the store refuses (absolute, `..`)
    InvalidPath,
    /// Underlying filesystem operation failed
    Io,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            StoreError::AlreadyExists => "directory already exists",
            StoreError::InvalidPath => "invalid path",
            StoreError::Io => "filesystem error",
        };
        f.write_str(msg)
    }
}

/// Directory management for captured images
pub trait ImageStore {
    /// Create a fresh directory
    ///
    /// Fails with [`StoreError::AlreadyExists`] if it is already present.
    /// Existing data is never overwritten.
    fn create_dir(&mut self, dir: &str) -> Result<(), StoreError>;

    /// Create a directory if it does not exist yet
    fn ensure_dir(&mut self, dir: &str) -> Result<(), StoreError>;

    /// Check whether a directory exists
    fn dir_exists(&self, dir: &str) -> bool;
}
