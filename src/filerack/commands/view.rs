use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RackStore;

use super::helpers::resolve_name;

pub fn run<S: RackStore>(store: &S, name: &str) -> Result<CmdResult> {
    let name = resolve_name(store, name)?;
    let content = store.read(&name)?;
    Ok(CmdResult::default().with_content(content))
}
