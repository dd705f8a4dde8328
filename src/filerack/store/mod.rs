//! # Storage Layer
//!
//! The rack is a single flat directory of plain text files plus a metadata
//! sidecar. The [`RackStore`] trait is the only way the rest of the crate
//! touches it.
//!
//! ## Implementations
//!
//! - [`fs::FileRack`]: production storage in a real directory
//!   - one `<title>.txt` file per racked buffer
//!   - `index.json` mapping file names to syntax identifiers
//!   - writes go through a temp file and a rename
//!
//! - [`memory::InMemoryRack`]: in-memory storage for testing
//!   - can simulate write and remove failures
//!
//! ## Storage Format
//!
//! ```text
//! files/
//! ├── index.json              # {"groceries.txt": "Packages/Text/Plain text.tmLanguage"}
//! ├── groceries.txt
//! ├── groceries1.txt
//! └── untitled - 14-05_03-02-26.txt
//! ```
//!
//! ## Failure Semantics
//!
//! Every operation fails loudly except two, which the rack treats as
//! best-effort:
//! - [`RackStore::remove`] reports a missing file as [`Removal::AlreadyGone`]
//!   instead of an error.
//! - [`RackStore::read_metadata`] returns an empty map when the sidecar is
//!   absent or unreadable.

use crate::error::{RackError, Result};
use crate::model::RackMetadata;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub mod fs;
pub mod memory;

pub const METADATA_FILENAME: &str = "index.json";

/// Result of removing a rack file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    /// Nothing was there to remove.
    AlreadyGone,
}

/// Abstract interface over one rack directory.
pub trait RackStore {
    /// Extension shared by every rack file, including the leading dot.
    fn file_ext(&self) -> &str;

    /// Names of all rack files. Order is unspecified.
    fn list(&self) -> Result<Vec<String>>;

    fn exists(&self, name: &str) -> Result<bool>;

    fn read(&self, name: &str) -> Result<String>;

    /// Create or replace a rack file.
    fn write(&self, name: &str, content: &str) -> Result<()>;

    fn remove(&self, name: &str) -> Result<Removal>;

    /// Rename a rack file. Fails if `to` is already taken.
    fn rename(&self, from: &str, to: &str) -> Result<()>;

    fn modified_at(&self, name: &str) -> Result<Option<DateTime<Utc>>>;

    /// Load the sidecar. Never fails: a missing or corrupt sidecar is empty.
    fn read_metadata(&self) -> RackMetadata;

    /// Rewrite the sidecar in full.
    fn write_metadata(&self, metadata: &RackMetadata) -> Result<()>;

    /// Location of a rack file (virtual for in-memory stores).
    fn path_for(&self, name: &str) -> Result<PathBuf>;
}

/// Reject names that would escape the rack, shadow the sidecar, or be
/// invisible to [`RackStore::list`].
pub fn validate_name(name: &str, file_ext: &str) -> Result<()> {
    let stem = name.strip_suffix(file_ext).unwrap_or("");
    let is_valid = !stem.is_empty()
        && name != METADATA_FILENAME
        && !name.contains(['/', '\\'])
        && name != "."
        && name != "..";

    if is_valid {
        Ok(())
    } else {
        Err(RackError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_names() {
        assert!(validate_name("this is a test.txt", ".txt").is_ok());
        assert!(validate_name("untitled - 14-05_03-02-26.txt", ".txt").is_ok());
        assert!(validate_name("..txt", ".txt").is_ok());
    }

    #[test]
    fn rejects_unsafe_names() {
        for name in ["", ".txt", "notes", "notes.md", "../up.txt", "a/b.txt", "a\\b.txt"] {
            assert!(
                matches!(validate_name(name, ".txt"), Err(RackError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_sidecar_name() {
        assert!(validate_name(METADATA_FILENAME, ".json").is_err());
    }
}
