//! Image directories on the local filesystem

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use log::warn;
use photorig_hal::{ImageStore, StoreError};

/// Store rooted at the output directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, dir: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(dir);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if dir.is_empty() || !plain {
            return Err(StoreError::InvalidPath);
        }
        Ok(self.root.join(relative))
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    warn!("{}: {}", path.display(), e);
    StoreError::Io
}

impl ImageStore for FsStore {
    fn create_dir(&mut self, dir: &str) -> Result<(), StoreError> {
        let path = self.resolve(dir)?;
        fs::create_dir(&path).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => StoreError::AlreadyExists,
            _ => io_error(&path, e),
        })
    }

    fn ensure_dir(&mut self, dir: &str) -> Result<(), StoreError> {
        let path = self.resolve(dir)?;
        fs::create_dir_all(&path).map_err(|e| io_error(&path, e))
    }

    fn dir_exists(&self, dir: &str) -> bool {
        self.resolve(dir).map(|path| path.is_dir()).unwrap_or(false)
    }
}
