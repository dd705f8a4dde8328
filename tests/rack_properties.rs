//! End-to-end behavior of the rack against a real directory.

use filerack::api::{HarnessCommand, RackApi, RackPaths};
use filerack::host::memory::MemoryHost;
use filerack::host::{Buffer, Host};
use filerack::model::BufferId;
use filerack::router::EventRouter;
use filerack::store::fs::FileRack;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Rack {
    _temp: TempDir,
    api: RackApi<FileRack>,
    host: MemoryHost,
}

impl Rack {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let rack_dir = temp.path().join("files");
        let paths = RackPaths {
            config_dir: temp.path().to_path_buf(),
            rack_dir: rack_dir.clone(),
        };
        let api = RackApi::new(FileRack::new(rack_dir), EventRouter::new(false), paths);
        Self {
            _temp: temp,
            api,
            host: MemoryHost::new(),
        }
    }

    fn dir(&self) -> &Path {
        &self.api.paths().rack_dir
    }

    fn new_buffer(&mut self) -> BufferId {
        self.host.new_buffer()
    }

    fn run(&mut self, id: BufferId, command: HarnessCommand) {
        self.api.run_command(&mut self.host, id, command).unwrap();
    }

    fn type_text(&mut self, id: BufferId, text: &str) {
        self.run(id, HarnessCommand::InsertText(text.to_string()));
    }

    /// Rack files on disk, sorted.
    fn files(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".txt"))
            .collect();
        names.sort();
        names
    }
}

#[test]
fn typing_creates_one_file_named_after_content() {
    let mut rack = Rack::new();
    let id = rack.new_buffer();
    rack.type_text(id, "this is a test");

    assert_eq!(rack.files(), vec!["this is a test.txt"]);
    assert_eq!(
        fs::read_to_string(rack.dir().join("this is a test.txt")).unwrap(),
        "this is a test"
    );
    assert!(rack.host.buffer(id).unwrap().is_scratch());
}

#[test]
fn same_content_in_two_buffers_is_disambiguated() {
    let mut rack = Rack::new();
    let first = rack.new_buffer();
    rack.type_text(first, "this is a test");
    let second = rack.new_buffer();
    rack.type_text(second, "this is a test");

    assert_eq!(
        rack.files(),
        vec!["this is a test.txt", "this is a test1.txt"]
    );
    let first_name = rack.api.router().entry(first).unwrap().current_name();
    let second_name = rack.api.router().entry(second).unwrap().current_name();
    assert_ne!(first_name, second_name);
}

#[test]
fn illegal_characters_are_stripped() {
    let mut rack = Rack::new();
    let id = rack.new_buffer();
    rack.type_text(id, "this :is ?a /test");

    assert_eq!(rack.files(), vec!["this is a test.txt"]);
}

#[test]
fn deleting_all_text_removes_the_file() {
    let mut rack = Rack::new();
    let id = rack.new_buffer();
    rack.type_text(id, "short lived");
    assert_eq!(rack.files().len(), 1);

    rack.run(id, HarnessCommand::DeleteText);
    assert!(rack.files().is_empty());
    assert!(!rack.host.buffer(id).unwrap().is_scratch());
    assert!(rack
        .api
        .router()
        .entry(id)
        .unwrap()
        .current_name()
        .is_none());
}

#[test]
fn whitespace_only_content_gets_placeholder_name() {
    let mut rack = Rack::new();
    let id = rack.new_buffer();
    rack.type_text(id, "   \n\t ");

    let files = rack.files();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("untitled - "));
    assert!(files[0].len() > ".txt".len() + 10);
}

#[test]
fn saving_twice_is_idempotent() {
    let mut rack = Rack::new();
    let id = rack.new_buffer();
    rack.type_text(id, "steady state");

    rack.run(id, HarnessCommand::Save);
    rack.run(id, HarnessCommand::Save);

    assert_eq!(rack.files(), vec!["steady state.txt"]);
    assert_eq!(
        fs::read_to_string(rack.dir().join("steady state.txt")).unwrap(),
        "steady state"
    );
}

#[test]
fn changing_the_first_line_renames_the_file() {
    let mut rack = Rack::new();
    let id = rack.new_buffer();
    rack.type_text(id, "draft");
    rack.type_text(id, " final");

    assert_eq!(rack.files(), vec!["draft final.txt"]);
    assert!(!rack.dir().join("draft.txt").exists());
}

#[test]
fn syntax_follows_the_file_across_renames() {
    let mut rack = Rack::new();
    let id = rack.new_buffer();
    rack.type_text(id, "notes");
    rack.api.set_syntax(&mut rack.host, id, "Markdown").unwrap();
    rack.type_text(id, " v2");

    let sidecar = fs::read_to_string(rack.dir().join("index.json")).unwrap();
    assert_eq!(
        sidecar,
        "{\n    \"notes v2.txt\": \"Markdown\",\n    \"notes.txt\": \"Markdown\"\n}\n"
    );
}

#[test]
fn closing_leaves_the_file_and_reopening_tracks_it() {
    let mut rack = Rack::new();
    let id = rack.new_buffer();
    rack.type_text(id, "keep me");
    rack.host.close(id);
    rack.api.on_closed(id);
    assert_eq!(rack.files(), vec!["keep me.txt"]);

    let reopened = rack
        .api
        .open_file(&mut rack.host, "keep me")
        .unwrap()
        .buffer
        .unwrap();
    assert_eq!(rack.host.buffer(reopened).unwrap().text(), "keep me");

    rack.host.buffer_mut(reopened).unwrap().replace("kept");
    rack.api.on_modified(&mut rack.host, reopened).unwrap();
    assert_eq!(rack.files(), vec!["kept.txt"]);
}
