//! # API Facade
//!
//! The single entry point for rack operations, whatever the host. The facade
//! owns the rack-side state (store, naming policy, buffer registry and the
//! current preview) while the host is borrowed per call, since buffers live
//! in the editor and not here.
//!
//! Like the command layer below it, nothing here prints or exits. Methods
//! dispatch to `commands/*.rs` and return `Result<CmdResult>`.
//!
//! `RackApi<S: RackStore>` is generic over the storage backend:
//! - Production: `RackApi<FileRack>`
//! - Testing: `RackApi<InMemoryRack>`

use crate::commands;
use crate::entry::{ModifyOutcome, RackEntry};
use crate::error::Result;
use crate::host::Host;
use crate::model::BufferId;
use crate::naming::NameGenerator;
use crate::router::EventRouter;
use crate::store::RackStore;
use std::path::PathBuf;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::harness::HarnessCommand;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

/// Where the rack keeps its configuration and files.
#[derive(Debug, Clone)]
pub struct RackPaths {
    pub config_dir: PathBuf,
    pub rack_dir: PathBuf,
}

pub struct RackApi<S: RackStore> {
    store: S,
    namer: NameGenerator,
    router: EventRouter,
    preview: Option<BufferId>,
    paths: RackPaths,
}

impl<S: RackStore> RackApi<S> {
    pub fn new(store: S, router: EventRouter, paths: RackPaths) -> Self {
        let namer = NameGenerator::new().with_file_ext(store.file_ext());
        Self {
            store,
            namer,
            router,
            preview: None,
            paths,
        }
    }

    /// Host notification: the buffer's text changed.
    pub fn on_modified<H: Host>(&mut self, host: &mut H, id: BufferId) -> Result<ModifyOutcome> {
        self.router.on_modified(host, &self.store, &self.namer, id)
    }

    /// Host notification: the buffer was closed. The rack file stays.
    pub fn on_closed(&mut self, id: BufferId) -> Option<RackEntry> {
        if self.preview == Some(id) {
            self.preview = None;
        }
        self.router.on_closed(id)
    }

    pub fn list_files(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_file(&self, name: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, name)
    }

    pub fn open_file<H: Host>(&mut self, host: &mut H, name: &str) -> Result<CmdResult> {
        commands::open::run(
            host,
            &self.store,
            &mut self.router,
            &mut self.preview,
            name,
        )
    }

    pub fn preview_file<H: Host>(&mut self, host: &mut H, name: &str) -> Result<CmdResult> {
        commands::open::preview(
            host,
            &self.store,
            &mut self.router,
            &mut self.preview,
            name,
        )
    }

    pub fn end_preview<H: Host>(&mut self, host: &mut H) -> bool {
        commands::open::end_preview(host, &mut self.router, &mut self.preview)
    }

    pub fn current_preview(&self) -> Option<BufferId> {
        self.preview
    }

    pub fn save_to_rack<H: Host>(&mut self, host: &mut H, id: BufferId) -> Result<CmdResult> {
        commands::save::run(host, &self.store, &mut self.router, &self.namer, id)
    }

    pub fn set_syntax<H: Host>(
        &mut self,
        host: &mut H,
        id: BufferId,
        syntax: &str,
    ) -> Result<CmdResult> {
        commands::syntax::run(host, &self.store, &self.router, id, syntax)
    }

    pub fn run_command<H: Host>(
        &mut self,
        host: &mut H,
        id: BufferId,
        command: HarnessCommand,
    ) -> Result<CmdResult> {
        commands::harness::run(
            host,
            &self.store,
            &mut self.router,
            &self.namer,
            id,
            command,
        )
    }

    pub fn file_paths<I: AsRef<str>>(&self, names: &[I]) -> Result<CmdResult> {
        commands::paths::run(&self.store, names)
    }

    pub fn remove_files<I: AsRef<str>>(&self, names: &[I]) -> Result<CmdResult> {
        commands::remove::run(&self.store, &self.router, names)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths.config_dir, action)
    }

    pub fn paths(&self) -> &RackPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;
    use crate::host::Buffer;
    use crate::store::memory::InMemoryRack;
    use tempfile::TempDir;

    fn make_api(explicit: bool) -> (RackApi<InMemoryRack>, TempDir) {
        let dir = TempDir::new().unwrap();
        let paths = RackPaths {
            config_dir: dir.path().to_path_buf(),
            rack_dir: dir.path().join("files"),
        };
        (
            RackApi::new(InMemoryRack::new(), EventRouter::new(explicit), paths),
            dir,
        )
    }

    #[test]
    fn on_modified_dispatches_to_router() {
        let (mut api, _dir) = make_api(false);
        let mut host = MemoryHost::new();
        let id = host.new_buffer();
        host.buffer_mut(id).unwrap().insert("hello");

        let outcome = api.on_modified(&mut host, id).unwrap();
        assert!(matches!(outcome, ModifyOutcome::Saved { .. }));
        assert_eq!(api.store().names(), vec!["hello.txt"]);
        assert_eq!(api.list_files().unwrap().listed_files.len(), 1);
        assert_eq!(
            api.view_file("hello").unwrap().content.as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn explicit_mode_flows_through_save_to_rack() {
        let (mut api, _dir) = make_api(true);
        let mut host = MemoryHost::new();
        let id = host.new_buffer();
        host.buffer_mut(id).unwrap().insert("manual");

        api.on_modified(&mut host, id).unwrap();
        assert!(api.store().names().is_empty());

        let result = api.save_to_rack(&mut host, id).unwrap();
        assert_eq!(result.saved_name(), Some("manual.txt"));
    }

    #[test]
    fn closing_the_preview_forgets_it() {
        let (mut api, _dir) = make_api(false);
        api.store().write("peek.txt", "peek").unwrap();
        let mut host = MemoryHost::new();

        let id = api.preview_file(&mut host, "peek").unwrap().buffer.unwrap();
        assert_eq!(api.current_preview(), Some(id));

        host.close(id);
        assert!(api.on_closed(id).is_some());
        assert_eq!(api.current_preview(), None);
        assert!(!api.end_preview(&mut host));
    }

    #[test]
    fn run_command_and_remove() {
        let (mut api, _dir) = make_api(false);
        let mut host = MemoryHost::new();
        let id = host.new_buffer();

        api.run_command(&mut host, id, HarnessCommand::InsertText("temp".into()))
            .unwrap();
        assert!(api.remove_files(&["temp"]).is_err());

        api.on_closed(id);
        api.remove_files(&["temp"]).unwrap();
        assert!(api.store().names().is_empty());
    }

    #[test]
    fn set_syntax_records_metadata() {
        let (mut api, _dir) = make_api(false);
        let mut host = MemoryHost::new();
        let id = host.new_buffer();
        host.buffer_mut(id).unwrap().insert("script");
        api.on_modified(&mut host, id).unwrap();

        api.set_syntax(&mut host, id, "Python").unwrap();
        assert_eq!(
            api.store().read_metadata().get("script.txt").map(String::as_str),
            Some("Python")
        );
        assert_eq!(host.buffer(id).unwrap().syntax().as_deref(), Some("Python"));
    }

    #[test]
    fn config_uses_config_dir() {
        let (api, dir) = make_api(false);
        api.config(ConfigAction::Set("explicit-save".into(), "on".into()))
            .unwrap();
        assert!(dir.path().join("config.json").exists());
        assert_eq!(api.paths().config_dir, dir.path());
    }
}
