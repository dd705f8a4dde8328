use crate::commands::{CmdMessage, CmdResult};
use crate::error::{RackError, Result};
use crate::host::{Buffer, Host};
use crate::model::BufferId;
use crate::router::EventRouter;
use crate::store::RackStore;

/// Assign a syntax to a buffer and remember it for its rack file.
pub fn run<H: Host, S: RackStore>(
    host: &mut H,
    store: &S,
    router: &EventRouter,
    id: BufferId,
    syntax: &str,
) -> Result<CmdResult> {
    let buffer = host.buffer_mut(id).ok_or(RackError::BufferNotFound(id))?;
    buffer.set_syntax(syntax);

    let mut result = CmdResult::default().with_buffer(id);
    let Some(name) = router.entry(id).and_then(|entry| entry.current_name()) else {
        result.add_message(CmdMessage::info(format!(
            "Syntax set to {}; buffer is not racked yet",
            syntax
        )));
        return Ok(result);
    };

    let mut metadata = store.read_metadata();
    if metadata.get(name).map(String::as_str) != Some(syntax) {
        metadata.insert(name.to_string(), syntax.to_string());
        store.write_metadata(&metadata)?;
    }
    result.add_message(CmdMessage::success(format!(
        "Syntax of {} set to {}",
        name, syntax
    )));
    Ok(result)
}
