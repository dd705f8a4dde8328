use super::{Buffer, Host};
use crate::model::{BufferId, OpenMode, SessionState};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    id: BufferId,
    text: String,
    change_count: u64,
    file_path: Option<PathBuf>,
    disposable: bool,
    scratch: bool,
    transient: bool,
    syntax: Option<String>,
    session: Option<SessionState>,
}

impl MemoryBuffer {
    fn new(id: BufferId) -> Self {
        Self {
            id,
            text: String::new(),
            change_count: 0,
            file_path: None,
            disposable: false,
            scratch: false,
            transient: false,
            syntax: None,
            session: None,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }

    pub fn set_file_path(&mut self, path: Option<PathBuf>) {
        self.file_path = path;
    }

    pub fn set_disposable(&mut self, disposable: bool) {
        self.disposable = disposable;
    }

    /// Replace the whole text as one edit.
    pub fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.change_count += 1;
    }
}

impl Buffer for MemoryBuffer {
    fn id(&self) -> BufferId {
        self.id
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn change_count(&self) -> u64 {
        self.change_count
    }

    fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn is_disposable(&self) -> bool {
        self.disposable
    }

    fn is_scratch(&self) -> bool {
        self.scratch
    }

    fn set_scratch(&mut self, scratch: bool) {
        self.scratch = scratch;
    }

    fn syntax(&self) -> Option<String> {
        self.syntax.clone()
    }

    fn set_syntax(&mut self, syntax: &str) {
        self.syntax = Some(syntax.to_string());
    }

    fn session_state(&self) -> Option<SessionState> {
        self.session.clone()
    }

    fn set_session_state(&mut self, state: SessionState) {
        self.session = Some(state);
    }

    fn insert(&mut self, text: &str) {
        self.text.push_str(text);
        self.change_count += 1;
    }

    fn clear(&mut self) {
        self.text.clear();
        self.change_count += 1;
    }
}

/// A single-window host kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    buffers: BTreeMap<BufferId, MemoryBuffer>,
    active: Option<BufferId>,
    next_id: u64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an empty untitled buffer and make it active.
    pub fn new_buffer(&mut self) -> BufferId {
        let id = self.allocate_id();
        self.buffers.insert(id, MemoryBuffer::new(id));
        self.active = Some(id);
        id
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    fn allocate_id(&mut self) -> BufferId {
        self.next_id += 1;
        BufferId(self.next_id)
    }
}

impl Host for MemoryHost {
    type Buffer = MemoryBuffer;

    fn active_buffer(&self) -> Option<BufferId> {
        self.active
    }

    fn buffer(&self, id: BufferId) -> Option<&MemoryBuffer> {
        self.buffers.get(&id)
    }

    fn buffer_mut(&mut self, id: BufferId) -> Option<&mut MemoryBuffer> {
        self.buffers.get_mut(&id)
    }

    fn buffer_ids(&self) -> Vec<BufferId> {
        self.buffers.keys().copied().collect()
    }

    fn open_buffer(&mut self, content: &str, mode: OpenMode) -> BufferId {
        let id = self.allocate_id();
        let mut buffer = MemoryBuffer::new(id);
        buffer.text = content.to_string();
        buffer.transient = mode == OpenMode::Transient;
        self.buffers.insert(id, buffer);
        self.active = Some(id);
        id
    }

    fn focus(&mut self, id: BufferId) {
        if self.buffers.contains_key(&id) {
            self.active = Some(id);
        }
    }

    fn commit(&mut self, id: BufferId) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.transient = false;
        }
    }

    fn close(&mut self, id: BufferId) {
        self.buffers.remove(&id);
        if self.active == Some(id) {
            self.active = self.buffers.keys().next_back().copied();
        }
    }
}
