use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::RackFile;
use crate::store::RackStore;

/// All rack files, most recently modified first.
pub fn run<S: RackStore>(store: &S) -> Result<CmdResult> {
    let metadata = store.read_metadata();
    let mut files = Vec::new();

    for name in store.list()? {
        let modified_at = store.modified_at(&name)?;
        let syntax = metadata.get(&name).cloned();
        files.push(RackFile {
            name,
            modified_at,
            syntax,
        });
    }

    files.sort_by(|a, b| {
        b.modified_at
            .cmp(&a.modified_at)
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(CmdResult::default().with_listed_files(files))
}
