use super::{validate_name, RackStore, Removal, METADATA_FILENAME};
use crate::error::{RackError, Result};
use crate::model::RackMetadata;
use crate::naming::DEFAULT_FILE_EXT;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

pub struct FileRack {
    root: PathBuf,
    file_ext: String,
}

impl FileRack {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_ext: DEFAULT_FILE_EXT.to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(RackError::Io)?;
        }
        Ok(())
    }

    fn file_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name, &self.file_ext)?;
        Ok(self.root.join(name))
    }

    /// Write through a temp file in the same directory so readers never see
    /// a half-written file.
    fn write_atomic(&self, target: &Path, content: &[u8]) -> Result<()> {
        self.ensure_dir()?;
        let tmp_file = self.root.join(format!(".rack-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(RackError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, target) {
            let _ = fs::remove_file(&tmp_file);
            return Err(RackError::Io(e));
        }
        Ok(())
    }
}

impl RackStore for FileRack {
    fn file_ext(&self) -> &str {
        &self.file_ext
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(RackError::Io)? {
            let entry = entry.map_err(RackError::Io)?;
            if !entry.file_type().map_err(RackError::Io)?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.ends_with(&self.file_ext) && validate_name(&name, &self.file_ext).is_ok() {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.file_path(name)?.is_file())
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.file_path(name)?;
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RackError::FileNotFound(name.to_string()),
            _ => RackError::Io(e),
        })
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.file_path(name)?;
        self.write_atomic(&path, content.as_bytes())
    }

    fn remove(&self, name: &str) -> Result<Removal> {
        let path = self.file_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(Removal::Deleted),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Removal::AlreadyGone),
            Err(e) => Err(RackError::Io(e)),
        }
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        let from_path = self.file_path(from)?;
        let to_path = self.file_path(to)?;
        if to_path.exists() {
            return Err(RackError::Store(format!(
                "Cannot rename {} to {}: target already exists",
                from, to
            )));
        }
        fs::rename(&from_path, &to_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RackError::FileNotFound(from.to_string()),
            _ => RackError::Io(e),
        })
    }

    fn modified_at(&self, name: &str) -> Result<Option<DateTime<Utc>>> {
        let path = self.file_path(name)?;
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.modified().ok().map(DateTime::<Utc>::from)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RackError::Io(e)),
        }
    }

    fn read_metadata(&self) -> RackMetadata {
        let data_file = self.root.join(METADATA_FILENAME);
        let content = match fs::read_to_string(&data_file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return RackMetadata::new(),
            Err(e) => {
                warn!(path = %data_file.display(), error = %e, "could not read rack metadata");
                return RackMetadata::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(path = %data_file.display(), error = %e, "ignoring corrupt rack metadata");
                RackMetadata::new()
            }
        }
    }

    fn write_metadata(&self, metadata: &RackMetadata) -> Result<()> {
        let mut content = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut content, PrettyFormatter::with_indent(b"    "));
        metadata
            .serialize(&mut serializer)
            .map_err(RackError::Serialization)?;
        content.push(b'\n');

        let data_file = self.root.join(METADATA_FILENAME);
        self.write_atomic(&data_file, &content)?;
        debug!(entries = metadata.len(), "rack metadata written");
        Ok(())
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        self.file_path(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileRack) {
        let dir = TempDir::new().unwrap();
        let rack = FileRack::new(dir.path().join("files"));
        (dir, rack)
    }

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let (_dir, rack) = setup();
        assert!(rack.list().unwrap().is_empty());
    }

    #[test]
    fn test_write_creates_dir_and_file() {
        let (_dir, rack) = setup();
        rack.write("hello.txt", "hello\nworld").unwrap();

        let on_disk = fs::read_to_string(rack.root().join("hello.txt")).unwrap();
        assert_eq!(on_disk, "hello\nworld");
        assert_eq!(rack.read("hello.txt").unwrap(), "hello\nworld");
        assert!(rack.exists("hello.txt").unwrap());
    }

    #[test]
    fn test_write_leaves_no_tmp_files() {
        let (_dir, rack) = setup();
        rack.write("a.txt", "a").unwrap();
        rack.write("a.txt", "b").unwrap();

        for entry in fs::read_dir(rack.root()).unwrap() {
            let name = entry.unwrap().file_name().into_string().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
        assert_eq!(rack.read("a.txt").unwrap(), "b");
    }

    #[test]
    fn test_list_only_returns_rack_files() {
        let (_dir, rack) = setup();
        rack.write("one.txt", "1").unwrap();
        rack.write("two.txt", "2").unwrap();
        rack.write_metadata(&RackMetadata::new()).unwrap();
        fs::write(rack.root().join("notes.md"), "md").unwrap();
        fs::create_dir(rack.root().join("dir.txt")).unwrap();

        assert_eq!(sorted(rack.list().unwrap()), vec!["one.txt", "two.txt"]);
    }

    #[test]
    fn test_rename_moves_file() {
        let (_dir, rack) = setup();
        rack.write("old.txt", "content").unwrap();
        rack.rename("old.txt", "new.txt").unwrap();

        assert_eq!(rack.list().unwrap(), vec!["new.txt"]);
        assert_eq!(rack.read("new.txt").unwrap(), "content");
    }

    #[test]
    fn test_rename_refuses_to_clobber() {
        let (_dir, rack) = setup();
        rack.write("a.txt", "a").unwrap();
        rack.write("b.txt", "b").unwrap();

        assert!(matches!(
            rack.rename("a.txt", "b.txt"),
            Err(RackError::Store(_))
        ));
        assert_eq!(rack.read("b.txt").unwrap(), "b");
    }

    #[test]
    fn test_rename_missing_source() {
        let (_dir, rack) = setup();
        rack.write("other.txt", "x").unwrap();
        assert!(matches!(
            rack.rename("ghost.txt", "new.txt"),
            Err(RackError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_remove_reports_missing_file() {
        let (_dir, rack) = setup();
        rack.write("gone.txt", "x").unwrap();

        assert_eq!(rack.remove("gone.txt").unwrap(), Removal::Deleted);
        assert_eq!(rack.remove("gone.txt").unwrap(), Removal::AlreadyGone);
    }

    #[test]
    fn test_read_missing_file() {
        let (_dir, rack) = setup();
        assert!(matches!(
            rack.read("nope.txt"),
            Err(RackError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_paths_cannot_escape_rack() {
        let (_dir, rack) = setup();
        assert!(matches!(
            rack.write("../escape.txt", "x"),
            Err(RackError::InvalidName(_))
        ));
        assert!(rack.path_for("index.json").is_err());
    }

    #[test]
    fn test_metadata_roundtrip_is_sorted_and_indented() {
        let (_dir, rack) = setup();
        let mut metadata = RackMetadata::new();
        metadata.insert("zeta.txt".into(), "Markdown".into());
        metadata.insert("alpha.txt".into(), "Rust".into());
        rack.write_metadata(&metadata).unwrap();

        let raw = fs::read_to_string(rack.root().join(METADATA_FILENAME)).unwrap();
        assert_eq!(
            raw,
            "{\n    \"alpha.txt\": \"Rust\",\n    \"zeta.txt\": \"Markdown\"\n}\n"
        );
        assert_eq!(rack.read_metadata(), metadata);
    }

    #[test]
    fn test_missing_metadata_is_empty() {
        let (_dir, rack) = setup();
        assert!(rack.read_metadata().is_empty());
    }

    #[test]
    fn test_corrupt_metadata_is_empty() {
        let (_dir, rack) = setup();
        fs::create_dir_all(rack.root()).unwrap();
        fs::write(rack.root().join(METADATA_FILENAME), "{ not json").unwrap();
        assert!(rack.read_metadata().is_empty());

        let mut metadata = RackMetadata::new();
        metadata.insert("a.txt".into(), "Plain".into());
        rack.write_metadata(&metadata).unwrap();
        assert_eq!(rack.read_metadata(), metadata);
    }

    #[test]
    fn test_modified_at() {
        let (_dir, rack) = setup();
        rack.write("dated.txt", "x").unwrap();
        assert!(rack.modified_at("dated.txt").unwrap().is_some());
        assert!(rack.modified_at("missing.txt").unwrap().is_none());
    }
}
