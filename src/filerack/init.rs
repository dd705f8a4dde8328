use crate::api::{RackApi, RackPaths};
use crate::config::RackConfig;
use crate::error::{RackError, Result};
use crate::router::EventRouter;
use crate::store::fs::FileRack;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the base directory holding `config.json` and the default rack.
pub const HOME_ENV: &str = "FILERACK_HOME";

const DEFAULT_RACK_DIR: &str = "files";

pub struct RackContext {
    pub api: RackApi<FileRack>,
    pub config: RackConfig,
}

/// The directory holding configuration and the default rack.
pub fn base_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "filerack", "filerack")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RackError::Config("Could not determine data dir".into()))
}

pub fn initialize() -> Result<RackContext> {
    Ok(initialize_at(&base_dir()?))
}

/// Wire up the rack rooted at `base`.
pub fn initialize_at(base: &Path) -> RackContext {
    let config = RackConfig::load(base).unwrap_or_else(|e| {
        warn!(error = %e, "could not read config, using defaults");
        RackConfig::default()
    });

    let rack_dir = config.resolve_rack_dir(&base.join(DEFAULT_RACK_DIR));
    debug!(rack = %rack_dir.display(), explicit_save = config.explicit_save_to_file_rack, "rack initialized");

    let store = FileRack::new(rack_dir.clone());
    let paths = RackPaths {
        config_dir: base.to_path_buf(),
        rack_dir,
    };
    let router = EventRouter::new(config.explicit_save_to_file_rack);
    let api = RackApi::new(store, router, paths);

    RackContext { api, config }
}
