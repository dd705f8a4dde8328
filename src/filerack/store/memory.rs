use super::{validate_name, RackStore, Removal};
use crate::error::{RackError, Result};
use crate::model::RackMetadata;
use crate::naming::DEFAULT_FILE_EXT;
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Clone)]
struct StoredFile {
    content: String,
    modified_at: DateTime<Utc>,
}

/// In-memory rack for testing.
///
/// Uses `RefCell` for interior mutability since the rack is single-threaded,
/// which lets `RackStore` take `&self` everywhere.
pub struct InMemoryRack {
    files: RefCell<BTreeMap<String, StoredFile>>,
    metadata: RefCell<RackMetadata>,
    file_ext: String,
    simulate_write_error: Cell<bool>,
    simulate_remove_error: Cell<bool>,
}

impl Default for InMemoryRack {
    fn default() -> Self {
        Self {
            files: RefCell::new(BTreeMap::new()),
            metadata: RefCell::new(RackMetadata::new()),
            file_ext: DEFAULT_FILE_EXT.to_string(),
            simulate_write_error: Cell::new(false),
            simulate_remove_error: Cell::new(false),
        }
    }
}

impl InMemoryRack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `write` and `rename` fail, for testing error propagation.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Make `remove` fail with a non-recoverable error.
    pub fn set_simulate_remove_error(&self, simulate: bool) {
        self.simulate_remove_error.set(simulate);
    }

    /// Sorted file names, for assertions.
    pub fn names(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(RackError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl RackStore for InMemoryRack {
    fn file_ext(&self) -> &str {
        &self.file_ext
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.names())
    }

    fn exists(&self, name: &str) -> Result<bool> {
        validate_name(name, &self.file_ext)?;
        Ok(self.files.borrow().contains_key(name))
    }

    fn read(&self, name: &str) -> Result<String> {
        validate_name(name, &self.file_ext)?;
        self.files
            .borrow()
            .get(name)
            .map(|file| file.content.clone())
            .ok_or_else(|| RackError::FileNotFound(name.to_string()))
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        validate_name(name, &self.file_ext)?;
        self.check_writable()?;
        self.files.borrow_mut().insert(
            name.to_string(),
            StoredFile {
                content: content.to_string(),
                modified_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<Removal> {
        validate_name(name, &self.file_ext)?;
        if self.simulate_remove_error.get() {
            return Err(RackError::Store("Simulated remove error".to_string()));
        }
        match self.files.borrow_mut().remove(name) {
            Some(_) => Ok(Removal::Deleted),
            None => Ok(Removal::AlreadyGone),
        }
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        validate_name(from, &self.file_ext)?;
        validate_name(to, &self.file_ext)?;
        self.check_writable()?;

        let mut files = self.files.borrow_mut();
        if files.contains_key(to) {
            return Err(RackError::Store(format!(
                "Cannot rename {} to {}: target already exists",
                from, to
            )));
        }
        let file = files
            .remove(from)
            .ok_or_else(|| RackError::FileNotFound(from.to_string()))?;
        files.insert(to.to_string(), file);
        Ok(())
    }

    fn modified_at(&self, name: &str) -> Result<Option<DateTime<Utc>>> {
        validate_name(name, &self.file_ext)?;
        Ok(self.files.borrow().get(name).map(|file| file.modified_at))
    }

    fn read_metadata(&self) -> RackMetadata {
        self.metadata.borrow().clone()
    }

    fn write_metadata(&self, metadata: &RackMetadata) -> Result<()> {
        self.check_writable()?;
        *self.metadata.borrow_mut() = metadata.clone();
        Ok(())
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name, &self.file_ext)?;
        Ok(PathBuf::from("memory://rack").join(name))
    }
}
