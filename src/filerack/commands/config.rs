use crate::commands::{CmdMessage, CmdResult};
use crate::config::RackConfig;
use crate::error::{RackError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = RackConfig::load(config_dir)?;

    let message = match action {
        ConfigAction::ShowAll => return Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => config.get(&key).map(CmdMessage::info),
        ConfigAction::Set(key, value) => config
            .set(&key, &value)
            .and_then(|()| config.save(config_dir))
            .and_then(|()| config.get(&key))
            .map(|shown| CmdMessage::success(format!("{} set to {}", key, shown))),
    };

    // Unknown keys and unparsable values are reported, not raised.
    let message = match message {
        Ok(message) => message,
        Err(RackError::Config(reason)) => CmdMessage::error(reason),
        Err(e) => return Err(e),
    };

    let mut result = CmdResult::default().with_config(config);
    result.add_message(message);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn set_then_show() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("explicit-save".into(), "true".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);

        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert!(result.config.unwrap().explicit_save_to_file_rack);

        let result = run(dir.path(), ConfigAction::ShowKey("explicit-save".into())).unwrap();
        assert_eq!(result.messages[0].content, "true");
    }

    #[test]
    fn unknown_key_is_reported_not_saved() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::Set("theme".into(), "dark".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn bad_values_and_keys_are_reported() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("explicit-save".into(), "maybe".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.messages[0].content.contains("maybe"));

        let result = run(dir.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }
}
