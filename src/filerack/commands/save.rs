use crate::commands::{outcome_message, CmdResult};
use crate::error::Result;
use crate::host::Host;
use crate::model::BufferId;
use crate::naming::NameGenerator;
use crate::router::EventRouter;
use crate::store::RackStore;

/// Put a buffer into the rack on request. This is the only way in when
/// automatic racking is disabled.
pub fn run<H: Host, S: RackStore>(
    host: &mut H,
    store: &S,
    router: &mut EventRouter,
    namer: &NameGenerator,
    id: BufferId,
) -> Result<CmdResult> {
    let outcome = router.force_sync(host, store, namer, id)?;
    let mut result = CmdResult::default().with_buffer(id);
    result.add_message(outcome_message(&outcome));
    Ok(result.with_outcome(outcome))
}
