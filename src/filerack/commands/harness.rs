//! Buffer manipulation commands used to drive the rack from tests and
//! scripted hosts.

use crate::commands::{outcome_message, CmdResult};
use crate::error::{RackError, Result};
use crate::host::{Buffer, Host};
use crate::model::BufferId;
use crate::naming::NameGenerator;
use crate::router::EventRouter;
use crate::store::RackStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessCommand {
    /// Append text to the buffer, then deliver the modification.
    InsertText(String),
    /// Clear the buffer, then deliver the modification.
    DeleteText,
    /// Run the save path again without editing.
    Save,
}

pub fn run<H: Host, S: RackStore>(
    host: &mut H,
    store: &S,
    router: &mut EventRouter,
    namer: &NameGenerator,
    id: BufferId,
    command: HarnessCommand,
) -> Result<CmdResult> {
    let outcome = match command {
        HarnessCommand::InsertText(text) => {
            edit(host, id, |buffer| buffer.insert(&text))?;
            router.on_modified_forced(host, store, namer, id)?
        }
        HarnessCommand::DeleteText => {
            edit(host, id, |buffer| buffer.clear())?;
            router.on_modified_forced(host, store, namer, id)?
        }
        HarnessCommand::Save => router.force_sync(host, store, namer, id)?,
    };

    let mut result = CmdResult::default().with_buffer(id);
    result.add_message(outcome_message(&outcome));
    Ok(result.with_outcome(outcome))
}

fn edit<H: Host>(host: &mut H, id: BufferId, apply: impl FnOnce(&mut H::Buffer)) -> Result<()> {
    let buffer = host.buffer_mut(id).ok_or(RackError::BufferNotFound(id))?;
    apply(buffer);
    Ok(())
}
