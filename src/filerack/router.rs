//! Routes host notifications to the [`RackEntry`] of each buffer.
//!
//! The router owns the registry of entries. An entry is created the first
//! time a buffer is seen (restoring any session state the buffer carries) and
//! dropped when the host reports the buffer closed. Closing never touches the
//! rack file.

use crate::entry::{Eligibility, ModifyOutcome, RackEntry, Trigger};
use crate::error::{RackError, Result};
use crate::host::{Buffer, Host};
use crate::model::BufferId;
use crate::naming::NameGenerator;
use crate::store::RackStore;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Default)]
pub struct EventRouter {
    entries: HashMap<BufferId, RackEntry>,
    explicit_save_only: bool,
}

impl EventRouter {
    pub fn new(explicit_save_only: bool) -> Self {
        Self {
            entries: HashMap::new(),
            explicit_save_only,
        }
    }

    pub fn explicit_save_only(&self) -> bool {
        self.explicit_save_only
    }

    /// Decide whether an untracked buffer may enter the rack automatically.
    pub fn eligibility<H: Host>(&self, host: &H, id: BufferId) -> Result<Eligibility> {
        let buffer = host.buffer(id).ok_or(RackError::BufferNotFound(id))?;

        let eligibility = if buffer.file_path().is_some() {
            Eligibility::HasBackingFile
        } else if host.active_buffer() != Some(id) {
            Eligibility::Inactive
        } else if buffer.is_disposable() {
            Eligibility::Disposable
        } else if self.explicit_save_only {
            Eligibility::ExplicitSaveOnly
        } else {
            Eligibility::Eligible
        };
        Ok(eligibility)
    }

    /// Handle a "buffer modified" notification.
    pub fn on_modified<H: Host, S: RackStore>(
        &mut self,
        host: &mut H,
        store: &S,
        namer: &NameGenerator,
        id: BufferId,
    ) -> Result<ModifyOutcome> {
        let eligibility = self.eligibility(&*host, id)?;
        self.dispatch(host, store, namer, id, Trigger::Event(eligibility))
    }

    /// Run the modification path for `id` without the eligibility gate.
    pub fn on_modified_forced<H: Host, S: RackStore>(
        &mut self,
        host: &mut H,
        store: &S,
        namer: &NameGenerator,
        id: BufferId,
    ) -> Result<ModifyOutcome> {
        self.dispatch(host, store, namer, id, Trigger::Forced)
    }

    /// Push the buffer into the rack now, whatever its state.
    pub fn force_sync<H: Host, S: RackStore>(
        &mut self,
        host: &mut H,
        store: &S,
        namer: &NameGenerator,
        id: BufferId,
    ) -> Result<ModifyOutcome> {
        let buffer = host.buffer_mut(id).ok_or(RackError::BufferNotFound(id))?;
        let held = self.held_by_others(id);
        let entry = self.observe(&*buffer, store);
        entry.force_sync(buffer, store, namer, &held)
    }

    fn dispatch<H: Host, S: RackStore>(
        &mut self,
        host: &mut H,
        store: &S,
        namer: &NameGenerator,
        id: BufferId,
        trigger: Trigger,
    ) -> Result<ModifyOutcome> {
        let buffer = host.buffer_mut(id).ok_or(RackError::BufferNotFound(id))?;
        let held = self.held_by_others(id);
        let entry = self.observe(&*buffer, store);
        entry.on_modify(buffer, store, namer, &held, trigger)
    }

    /// Rack names bound to live buffers other than `id`.
    fn held_by_others(&self, id: BufferId) -> HashSet<String> {
        self.entries
            .values()
            .filter(|entry| entry.buffer_id() != id)
            .filter_map(|entry| entry.current_name().map(str::to_string))
            .collect()
    }

    fn observe<B: Buffer, S: RackStore>(&mut self, buffer: &B, store: &S) -> &mut RackEntry {
        let id = buffer.id();
        self.entries.entry(id).or_insert_with(|| {
            debug!(buffer = %id, "observing new buffer");
            RackEntry::restore(id, buffer.session_state(), store)
        })
    }

    /// Register a buffer that was loaded from a rack file.
    pub fn adopt(&mut self, entry: RackEntry) {
        self.entries.insert(entry.buffer_id(), entry);
    }

    /// Handle a "buffer closed" notification.
    pub fn on_closed(&mut self, id: BufferId) -> Option<RackEntry> {
        let entry = self.entries.remove(&id);
        if entry.is_some() {
            debug!(buffer = %id, "forgetting closed buffer");
        }
        entry
    }

    pub fn entry(&self, id: BufferId) -> Option<&RackEntry> {
        self.entries.get(&id)
    }

    /// The open buffer currently bound to rack file `name`, if any.
    pub fn buffer_for_file(&self, name: &str) -> Option<BufferId> {
        self.entries
            .values()
            .find(|entry| entry.current_name() == Some(name))
            .map(RackEntry::buffer_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
