use crate::error::{RackError, Result};
use crate::store::RackStore;

/// Turn user input into an existing rack file name. The extension may be
/// omitted (`groceries` finds `groceries.txt`).
pub fn resolve_name<S: RackStore>(store: &S, input: &str) -> Result<String> {
    let input = input.trim();
    let name = if input.ends_with(store.file_ext()) {
        input.to_string()
    } else {
        format!("{}{}", input, store.file_ext())
    };

    if store.exists(&name)? {
        Ok(name)
    } else {
        Err(RackError::FileNotFound(name))
    }
}

pub fn resolve_names<S: RackStore, I: AsRef<str>>(store: &S, inputs: &[I]) -> Result<Vec<String>> {
    inputs
        .iter()
        .map(|input| resolve_name(store, input.as_ref()))
        .collect()
}
