use crate::error::{RackError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for the rack, stored in `config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RackConfig {
    /// Directory holding the rack files. Falls back to the default rack when
    /// unset or when the directory does not exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack_path: Option<PathBuf>,

    /// When set, buffers only enter the rack through the explicit save command.
    #[serde(default)]
    pub explicit_save_to_file_rack: bool,
}

impl RackConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RackError::Io)?;
        let config: RackConfig =
            serde_json::from_str(&content).map_err(RackError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RackError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RackError::Serialization)?;
        fs::write(config_path, content).map_err(RackError::Io)?;
        Ok(())
    }

    /// The directory the rack should live in.
    ///
    /// A configured `rack_path` that does not exist is reported and ignored.
    pub fn resolve_rack_dir(&self, default_dir: &Path) -> PathBuf {
        match &self.rack_path {
            Some(path) if path.is_dir() => path.clone(),
            Some(path) => {
                warn!(
                    rack_path = %path.display(),
                    fallback = %default_dir.display(),
                    "configured rack_path does not exist, using default rack"
                );
                default_dir.to_path_buf()
            }
            None => default_dir.to_path_buf(),
        }
    }

    /// Set a value by its CLI key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "rack-path" => {
                self.rack_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "explicit-save" => {
                self.explicit_save_to_file_rack = parse_bool(value)?;
            }
            other => return Err(RackError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// Get a value by its CLI key.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "rack-path" => Ok(self
                .rack_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            "explicit-save" => Ok(self.explicit_save_to_file_rack.to_string()),
            other => Err(RackError::Config(format!("Unknown config key: {}", other))),
        }
    }
}

pub const CONFIG_KEYS: &[&str] = &["rack-path", "explicit-save"];

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(RackError::Config(format!("Not a boolean: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RackConfig::default();
        assert_eq!(config.rack_path, None);
        assert!(!config.explicit_save_to_file_rack);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = RackConfig::load(dir.path().join("nowhere")).unwrap();
        assert_eq!(config, RackConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let config = RackConfig {
            rack_path: Some(PathBuf::from("/srv/rack")),
            explicit_save_to_file_rack: true,
        };
        config.save(dir.path()).unwrap();

        let loaded = RackConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{\"explicit_save_to_file_rack\": true}")
            .unwrap();

        let loaded = RackConfig::load(dir.path()).unwrap();
        assert!(loaded.explicit_save_to_file_rack);
        assert_eq!(loaded.rack_path, None);
    }

    #[test]
    fn test_corrupt_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "not json").unwrap();
        assert!(matches!(
            RackConfig::load(dir.path()),
            Err(RackError::Serialization(_))
        ));
    }

    #[test]
    fn test_resolve_existing_rack_path() {
        let dir = TempDir::new().unwrap();
        let config = RackConfig {
            rack_path: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_rack_dir(Path::new("/default")),
            dir.path().to_path_buf()
        );
    }

    #[test]
    fn test_resolve_missing_rack_path_falls_back() {
        let dir = TempDir::new().unwrap();
        let config = RackConfig {
            rack_path: Some(dir.path().join("missing")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_rack_dir(Path::new("/default")),
            PathBuf::from("/default")
        );
    }

    #[test]
    fn test_set_and_get_keys() {
        let mut config = RackConfig::default();
        config.set("explicit-save", "yes").unwrap();
        config.set("rack-path", "/tmp/rack").unwrap();
        assert_eq!(config.get("explicit-save").unwrap(), "true");
        assert_eq!(config.get("rack-path").unwrap(), "/tmp/rack");

        config.set("rack-path", "").unwrap();
        assert_eq!(config.rack_path, None);

        assert!(config.set("explicit-save", "maybe").is_err());
        assert!(config.get("colour").is_err());
    }
}
