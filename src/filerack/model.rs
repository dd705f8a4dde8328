use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Host-provided identity of an open buffer. Stable while the buffer is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BufferId(pub u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a buffer currently has a file in the rack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryState {
    #[default]
    Untracked,
    Tracked(String),
}

impl EntryState {
    pub fn is_tracked(&self) -> bool {
        matches!(self, EntryState::Tracked(_))
    }

    pub fn current_name(&self) -> Option<&str> {
        match self {
            EntryState::Tracked(name) => Some(name),
            EntryState::Untracked => None,
        }
    }
}

/// What a buffer carries across a host session save/restore.
///
/// Hosts store this in whatever view-local settings they have; the rack only
/// reads it back when it first sees the buffer again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub in_rack: bool,
    pub current_name: Option<String>,
}

impl From<&EntryState> for SessionState {
    fn from(state: &EntryState) -> Self {
        Self {
            in_rack: state.is_tracked(),
            current_name: state.current_name().map(str::to_string),
        }
    }
}

impl SessionState {
    pub fn into_entry_state(self) -> EntryState {
        match (self.in_rack, self.current_name) {
            (true, Some(name)) => EntryState::Tracked(name),
            _ => EntryState::Untracked,
        }
    }
}

/// Contents of the `index.json` sidecar: rack file name to syntax identifier.
/// A `BTreeMap` keeps the written keys sorted.
pub type RackMetadata = BTreeMap<String, String>;

/// A rack file as shown in the quick-pick list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackFile {
    pub name: String,
    pub modified_at: Option<DateTime<Utc>>,
    pub syntax: Option<String>,
}

impl RackFile {
    /// The file name without the rack extension, for display.
    pub fn title(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.name)
    }
}

/// How the host should open a buffer loaded from the rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// A regular buffer the user is working in.
    Committed,
    /// A preview that the host may discard as soon as focus moves on.
    Transient,
}
