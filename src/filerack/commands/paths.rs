use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RackStore;

use super::helpers::resolve_names;

pub fn run<S: RackStore, I: AsRef<str>>(store: &S, names: &[I]) -> Result<CmdResult> {
    let resolved = resolve_names(store, names)?;
    let mut paths = Vec::with_capacity(resolved.len());

    for name in resolved {
        paths.push(store.path_for(&name)?);
    }

    Ok(CmdResult::default().with_file_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryRack;

    #[test]
    fn test_get_paths() {
        let store = InMemoryRack::new();
        store.write("a.txt", "a").unwrap();
        store.write("b.txt", "b").unwrap();

        let res = run(&store, &["a", "b.txt"]).unwrap();
        assert_eq!(res.file_paths.len(), 2);
        assert!(res.file_paths[0].ends_with("a.txt"));
        assert!(res.file_paths[1].ends_with("b.txt"));
    }
}
