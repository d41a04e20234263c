//! Mock image store

use std::collections::BTreeSet;
use std::string::{String, ToString};

use super::{Op, OpLog};
use crate::store::{ImageStore, StoreError};

/// In-memory directory set
#[derive(Debug, Clone)]
pub struct MockStore {
    log: OpLog,
    dirs: BTreeSet<String>,
}

impl MockStore {
    /// Create an empty store
    pub fn new(log: &OpLog) -> Self {
        Self {
            log: log.clone(),
            dirs: BTreeSet::new(),
        }
    }

    /// Pretend `dir` already exists (for collision tests)
    pub fn with_existing(mut self, dir: &str) -> Self {
        self.dirs.insert(dir.to_string());
        self
    }
}

impl ImageStore for MockStore {
    fn create_dir(&mut self, dir: &str) -> Result<(), StoreError> {
        if dir.is_empty() || dir.starts_with('/') {
            return Err(StoreError::InvalidPath);
        }
        if !self.dirs.insert(dir.to_string()) {
            return Err(StoreError::AlreadyExists);
        }
        self.log.push(Op::CreateDir {
            dir: dir.to_string(),
        });
        Ok(())
    }

    fn ensure_dir(&mut self, dir: &str) -> Result<(), StoreError> {
        if self.dir_exists(dir) {
            return Ok(());
        }
        self.create_dir(dir)
    }

    fn dir_exists(&self, dir: &str) -> bool {
        self.dirs.contains(dir)
    }
}
