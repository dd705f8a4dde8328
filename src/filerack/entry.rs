//! # Rack Entries
//!
//! A [`RackEntry`] ties one open buffer to at most one rack file and keeps the
//! two in step. It has two states:
//!
//! ```text
//!              non-empty edit                 edit changing the title
//!  Untracked ─────────────────▶ Tracked(name) ───────────────────────▶ Tracked(new)
//!      ▲                            │           (rename, then write)
//!      └────────────────────────────┘
//!          buffer emptied (file removed)
//! ```
//!
//! Every call to [`RackEntry::on_modify`] runs to completion: when it returns,
//! the entry's state matches the rack directory. The order inside a save is
//! rename, write, then mark the buffer scratch.
//!
//! Removing the file of an emptied buffer is best-effort. A file that is
//! already gone is fine, any other failure is logged and the entry still
//! becomes untracked, possibly leaving an orphaned file behind. Write and
//! rename failures are returned to the caller.

use crate::error::Result;
use crate::host::Buffer;
use crate::model::{BufferId, EntryState, SessionState};
use crate::naming::NameGenerator;
use crate::store::{RackStore, Removal};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Whether an untracked buffer may enter the rack on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// The buffer is a real file the user opened or saved.
    HasBackingFile,
    /// Not the active buffer, so the event is probably spurious.
    Inactive,
    /// Search results, output panels and the like.
    Disposable,
    /// Automatic racking is turned off in the config.
    ExplicitSaveOnly,
}

/// What caused an `on_modify` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A modification notification from the host.
    Event(Eligibility),
    /// A direct invocation that bypasses the eligibility gate.
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Ineligible(Eligibility),
    /// The change counter did not move since the last handled notification.
    Duplicate,
    /// An untracked buffer with no text has nothing to store.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifyOutcome {
    Ignored(Skip),
    Saved {
        name: String,
        renamed_from: Option<String>,
    },
    /// The buffer was emptied and its file dropped. `removal` is `None` when
    /// the file could not be removed.
    Released {
        name: String,
        removal: Option<Removal>,
    },
}

#[derive(Debug, Clone)]
pub struct RackEntry {
    buffer_id: BufferId,
    state: EntryState,
    last_observed_version: u64,
}

impl RackEntry {
    pub fn new(buffer_id: BufferId) -> Self {
        Self {
            buffer_id,
            state: EntryState::Untracked,
            last_observed_version: 0,
        }
    }

    /// Entry for a buffer that was just loaded from `name`; edits up to
    /// `version` are already on disk.
    pub fn tracked(buffer_id: BufferId, name: String, version: u64) -> Self {
        Self {
            buffer_id,
            state: EntryState::Tracked(name),
            last_observed_version: version,
        }
    }

    /// Rebuild an entry from the state a buffer carried through a session
    /// restore. State pointing at a file that no longer exists is dropped.
    pub fn restore<S: RackStore>(
        buffer_id: BufferId,
        session: Option<SessionState>,
        store: &S,
    ) -> Self {
        let mut entry = Self::new(buffer_id);
        if let Some(EntryState::Tracked(name)) = session.map(SessionState::into_entry_state) {
            match store.exists(&name) {
                Ok(true) => entry.state = EntryState::Tracked(name),
                Ok(false) => debug!(buffer = %buffer_id, file = %name, "restored rack file is gone"),
                Err(e) => warn!(buffer = %buffer_id, file = %name, error = %e, "ignoring restored rack state"),
            }
        }
        entry
    }

    pub fn buffer_id(&self) -> BufferId {
        self.buffer_id
    }

    pub fn state(&self) -> &EntryState {
        &self.state
    }

    pub fn is_tracked(&self) -> bool {
        self.state.is_tracked()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.state.current_name()
    }

    pub fn last_observed_version(&self) -> u64 {
        self.last_observed_version
    }

    /// Handle one modification of the buffer.
    ///
    /// `held` names the files other live buffers are bound to. They count
    /// as taken even when the file is missing from the rack.
    pub fn on_modify<B: Buffer, S: RackStore>(
        &mut self,
        buffer: &mut B,
        store: &S,
        namer: &NameGenerator,
        held: &HashSet<String>,
        trigger: Trigger,
    ) -> Result<ModifyOutcome> {
        if let Trigger::Event(eligibility) = trigger {
            if !self.is_tracked() && eligibility != Eligibility::Eligible {
                return Ok(ModifyOutcome::Ignored(Skip::Ineligible(eligibility)));
            }
        }

        let version = buffer.change_count();
        if version <= self.last_observed_version {
            return Ok(ModifyOutcome::Ignored(Skip::Duplicate));
        }

        let outcome = self.sync(buffer, store, namer, held)?;
        self.last_observed_version = version;
        Ok(outcome)
    }

    /// Bring the rack in line with the buffer regardless of eligibility or
    /// change counter. Used by the manual "save to rack" command.
    pub fn force_sync<B: Buffer, S: RackStore>(
        &mut self,
        buffer: &mut B,
        store: &S,
        namer: &NameGenerator,
        held: &HashSet<String>,
    ) -> Result<ModifyOutcome> {
        let version = buffer.change_count();
        let outcome = self.sync(buffer, store, namer, held)?;
        self.last_observed_version = self.last_observed_version.max(version);
        Ok(outcome)
    }

    fn sync<B: Buffer, S: RackStore>(
        &mut self,
        buffer: &mut B,
        store: &S,
        namer: &NameGenerator,
        held: &HashSet<String>,
    ) -> Result<ModifyOutcome> {
        let content = buffer.text();
        if !content.is_empty() {
            return self.save(buffer, store, namer, held, &content);
        }

        match self.state.clone() {
            EntryState::Tracked(name) => Ok(self.release(buffer, store, name)),
            EntryState::Untracked => Ok(ModifyOutcome::Ignored(Skip::Empty)),
        }
    }

    fn save<B: Buffer, S: RackStore>(
        &mut self,
        buffer: &mut B,
        store: &S,
        namer: &NameGenerator,
        held: &HashSet<String>,
        content: &str,
    ) -> Result<ModifyOutcome> {
        let on_disk: HashSet<String> = store.list()?.into_iter().collect();
        let mut existing = on_disk.clone();
        existing.extend(held.iter().cloned());
        let current = self.state.current_name().map(str::to_string);
        let desired = namer.generate(content, current.as_deref(), &existing);

        let renamed_from = match &current {
            Some(old) if *old != desired => {
                if on_disk.contains(old) {
                    store.rename(old, &desired)?;
                    info!(buffer = %self.buffer_id, from = %old, to = %desired, "renamed rack file");
                } else {
                    warn!(buffer = %self.buffer_id, file = %old, "rack file vanished, writing under new name");
                }
                // The file now lives under the new name even if the write below fails.
                self.state = EntryState::Tracked(desired.clone());
                Some(old.clone())
            }
            _ => None,
        };

        store.write(&desired, content)?;
        let binding = match (&current, &renamed_from) {
            (None, _) => {
                debug!(buffer = %self.buffer_id, file = %desired, "buffer entered the rack");
                Binding::New
            }
            (Some(_), Some(old)) => Binding::Renamed(old),
            (Some(_), None) => Binding::Kept,
        };
        record_syntax(buffer, store, &desired, binding);
        self.state = EntryState::Tracked(desired.clone());
        buffer.set_scratch(true);
        self.persist(buffer);

        Ok(ModifyOutcome::Saved {
            name: desired,
            renamed_from,
        })
    }

    fn release<B: Buffer, S: RackStore>(
        &mut self,
        buffer: &mut B,
        store: &S,
        name: String,
    ) -> ModifyOutcome {
        let removal = match store.remove(&name) {
            Ok(removal) => {
                if removal == Removal::AlreadyGone {
                    debug!(buffer = %self.buffer_id, file = %name, "emptied rack file was already gone");
                }
                Some(removal)
            }
            Err(e) => {
                warn!(buffer = %self.buffer_id, file = %name, error = %e, "could not remove emptied rack file");
                None
            }
        };

        self.state = EntryState::Untracked;
        buffer.set_scratch(false);
        self.persist(buffer);
        ModifyOutcome::Released { name, removal }
    }

    fn persist<B: Buffer>(&self, buffer: &mut B) {
        buffer.set_session_state(SessionState::from(&self.state));
    }
}

/// How a save relates the buffer to the file it just wrote.
enum Binding<'a> {
    /// The buffer was untracked until now.
    New,
    Kept,
    Renamed(&'a str),
}

/// Keep the sidecar's syntax for `name` in step with the buffer. When the
/// buffer has no syntax of its own, a renamed file keeps its old one and a
/// newly bound file drops whatever a previous owner of the name left behind.
fn record_syntax<B: Buffer, S: RackStore>(buffer: &B, store: &S, name: &str, binding: Binding) {
    let mut metadata = store.read_metadata();
    let syntax = match (buffer.syntax(), &binding) {
        (Some(syntax), _) => Some(syntax),
        (None, Binding::Renamed(old)) => metadata.get(*old).cloned(),
        (None, _) => None,
    };

    let changed = match syntax {
        Some(syntax) if metadata.get(name) != Some(&syntax) => {
            metadata.insert(name.to_string(), syntax);
            true
        }
        None if matches!(binding, Binding::New) => metadata.remove(name).is_some(),
        _ => false,
    };
    if !changed {
        return;
    }

    if let Err(e) = store.write_metadata(&metadata) {
        warn!(file = %name, error = %e, "could not record syntax for rack file");
    }
}
