//! # Host Boundary
//!
//! The rack does not own any UI. Whatever editor embeds it provides buffers,
//! focus and session storage through the two traits here, and forwards its
//! "buffer modified" and "buffer closed" notifications to
//! [`RackApi`](crate::api::RackApi).
//!
//! - [`Buffer`]: one editor buffer: its text, change counter, scratch flag,
//!   syntax, and a slot of view-local settings that survive session restore.
//! - [`Host`]: the window side: which buffer is active, opening, focusing and
//!   closing buffers.
//!
//! [`memory::MemoryHost`] is a complete in-process implementation used by the
//! tests and by the `filerack` binary.

use crate::model::{BufferId, OpenMode, SessionState};
use std::path::Path;

pub mod memory;

pub trait Buffer {
    fn id(&self) -> BufferId;

    /// Full text of the buffer.
    fn text(&self) -> String;

    /// Counter bumped by the host on every edit.
    fn change_count(&self) -> u64;

    /// The file this buffer was opened from or saved to by the user, if any.
    fn file_path(&self) -> Option<&Path>;

    /// Output panels, search results and similar throwaway buffers.
    fn is_disposable(&self) -> bool;

    fn is_scratch(&self) -> bool;

    /// Scratch buffers are never prompted for on close.
    fn set_scratch(&mut self, scratch: bool);

    fn syntax(&self) -> Option<String>;

    fn set_syntax(&mut self, syntax: &str);

    fn session_state(&self) -> Option<SessionState>;

    fn set_session_state(&mut self, state: SessionState);

    /// Append text at the end of the buffer as a user edit.
    fn insert(&mut self, text: &str);

    /// Remove all text as a user edit.
    fn clear(&mut self);
}

pub trait Host {
    type Buffer: Buffer;

    fn active_buffer(&self) -> Option<BufferId>;

    fn buffer(&self, id: BufferId) -> Option<&Self::Buffer>;

    fn buffer_mut(&mut self, id: BufferId) -> Option<&mut Self::Buffer>;

    fn buffer_ids(&self) -> Vec<BufferId>;

    /// Open a new buffer holding `content` and make it active.
    fn open_buffer(&mut self, content: &str, mode: OpenMode) -> BufferId;

    fn focus(&mut self, id: BufferId);

    /// Turn a transient buffer into a regular one the host keeps open.
    fn commit(&mut self, id: BufferId);

    fn close(&mut self, id: BufferId);
}
