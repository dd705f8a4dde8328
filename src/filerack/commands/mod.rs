use crate::config::RackConfig;
use crate::entry::ModifyOutcome;
use crate::model::{BufferId, RackFile};
use std::path::PathBuf;

pub mod config;
pub mod harness;
pub mod helpers;
pub mod list;
pub mod open;
pub mod paths;
pub mod remove;
pub mod save;
pub mod syntax;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub outcome: Option<ModifyOutcome>,
    pub buffer: Option<BufferId>,
    pub listed_files: Vec<RackFile>,
    pub file_paths: Vec<PathBuf>,
    pub content: Option<String>,
    pub config: Option<RackConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_outcome(mut self, outcome: ModifyOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_buffer(mut self, id: BufferId) -> Self {
        self.buffer = Some(id);
        self
    }

    pub fn with_listed_files(mut self, files: Vec<RackFile>) -> Self {
        self.listed_files = files;
        self
    }

    pub fn with_file_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.file_paths = paths;
        self
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_config(mut self, config: RackConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Name of the rack file the command left the buffer bound to, if any.
    pub fn saved_name(&self) -> Option<&str> {
        match &self.outcome {
            Some(ModifyOutcome::Saved { name, .. }) => Some(name),
            _ => None,
        }
    }
}

/// Describe a modification outcome for the user.
pub fn outcome_message(outcome: &ModifyOutcome) -> CmdMessage {
    use crate::entry::Skip;

    match outcome {
        ModifyOutcome::Saved {
            name,
            renamed_from: Some(old),
        } => CmdMessage::success(format!("Racked as {} (was {})", name, old)),
        ModifyOutcome::Saved {
            name,
            renamed_from: None,
        } => CmdMessage::success(format!("Racked as {}", name)),
        ModifyOutcome::Released {
            name,
            removal: Some(_),
        } => CmdMessage::info(format!("Buffer emptied, removed {}", name)),
        ModifyOutcome::Released {
            name,
            removal: None,
        } => CmdMessage::warning(format!("Buffer emptied, but {} could not be removed", name)),
        ModifyOutcome::Ignored(Skip::Empty) => CmdMessage::info("Nothing to rack: buffer is empty"),
        ModifyOutcome::Ignored(Skip::Duplicate) => CmdMessage::info("Rack is up to date"),
        ModifyOutcome::Ignored(Skip::Ineligible(reason)) => {
            CmdMessage::info(format!("Buffer not racked ({:?})", reason))
        }
    }
}
