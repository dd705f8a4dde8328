//! Opening rack files from the quick-pick list.
//!
//! Selecting a file focuses the buffer already bound to it, or loads it into a
//! new buffer that is tracked under that name from the start. Highlighting a
//! file opens a transient preview; only one preview exists at a time and it
//! is closed as soon as the user moves on, unless the selection commits it.

use crate::commands::{CmdMessage, CmdResult};
use crate::entry::RackEntry;
use crate::error::{RackError, Result};
use crate::host::{Buffer, Host};
use crate::model::{BufferId, OpenMode, SessionState};
use crate::router::EventRouter;
use crate::store::RackStore;
use tracing::debug;

use super::helpers::resolve_name;

/// Commit to a rack file.
pub fn run<H: Host, S: RackStore>(
    host: &mut H,
    store: &S,
    router: &mut EventRouter,
    preview: &mut Option<BufferId>,
    name: &str,
) -> Result<CmdResult> {
    let name = resolve_name(store, name)?;

    if let Some(id) = router.buffer_for_file(&name) {
        if host.buffer(id).is_some() {
            if *preview == Some(id) {
                *preview = None;
                host.commit(id);
                debug!(buffer = %id, file = %name, "preview committed");
            } else {
                end_preview(host, router, preview);
            }
            host.focus(id);
            let mut result = CmdResult::default().with_buffer(id);
            result.add_message(CmdMessage::info(format!("Switched to {}", name)));
            return Ok(result);
        }
        // The host closed it without telling us.
        router.on_closed(id);
    }

    end_preview(host, router, preview);
    let id = load(host, store, router, &name, OpenMode::Committed)?;
    let mut result = CmdResult::default().with_buffer(id);
    result.add_message(CmdMessage::success(format!("Opened {}", name)));
    Ok(result)
}

/// Show a rack file transiently, replacing any previous preview.
pub fn preview<H: Host, S: RackStore>(
    host: &mut H,
    store: &S,
    router: &mut EventRouter,
    preview: &mut Option<BufferId>,
    name: &str,
) -> Result<CmdResult> {
    let name = resolve_name(store, name)?;
    end_preview(host, router, preview);

    if let Some(id) = router.buffer_for_file(&name) {
        if host.buffer(id).is_some() {
            host.focus(id);
            return Ok(CmdResult::default().with_buffer(id));
        }
        router.on_closed(id);
    }

    let id = load(host, store, router, &name, OpenMode::Transient)?;
    *preview = Some(id);
    Ok(CmdResult::default().with_buffer(id))
}

/// Discard the current preview, if any. Returns whether one was closed.
pub fn end_preview<H: Host>(
    host: &mut H,
    router: &mut EventRouter,
    preview: &mut Option<BufferId>,
) -> bool {
    match preview.take() {
        Some(id) => {
            host.close(id);
            router.on_closed(id);
            true
        }
        None => false,
    }
}

fn load<H: Host, S: RackStore>(
    host: &mut H,
    store: &S,
    router: &mut EventRouter,
    name: &str,
    mode: OpenMode,
) -> Result<BufferId> {
    let content = store.read(name)?;
    let syntax = store.read_metadata().get(name).cloned();

    let id = host.open_buffer(&content, mode);
    let buffer = host.buffer_mut(id).ok_or(RackError::BufferNotFound(id))?;
    if let Some(syntax) = syntax {
        buffer.set_syntax(&syntax);
    }
    buffer.set_scratch(true);

    let entry = RackEntry::tracked(id, name.to_string(), buffer.change_count());
    buffer.set_session_state(SessionState::from(entry.state()));
    router.adopt(entry);
    debug!(buffer = %id, file = %name, ?mode, "loaded rack file");
    Ok(id)
}
