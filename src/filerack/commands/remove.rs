use crate::commands::{CmdMessage, CmdResult};
use crate::error::{RackError, Result};
use crate::router::EventRouter;
use crate::store::{RackStore, Removal};

use super::helpers::resolve_names;

/// Delete rack files that no open buffer is bound to.
pub fn run<S: RackStore, I: AsRef<str>>(
    store: &S,
    router: &EventRouter,
    names: &[I],
) -> Result<CmdResult> {
    let resolved = resolve_names(store, names)?;

    if let Some(name) = resolved
        .iter()
        .find(|name| router.buffer_for_file(name).is_some())
    {
        return Err(RackError::Api(format!(
            "{} is open in a buffer; empty the buffer instead",
            name
        )));
    }

    let mut result = CmdResult::default();
    for name in resolved {
        let message = match store.remove(&name)? {
            Removal::Deleted => CmdMessage::success(format!("Removed {}", name)),
            Removal::AlreadyGone => CmdMessage::warning(format!("{} was already gone", name)),
        };
        result.add_message(message);
    }
    Ok(result)
}
