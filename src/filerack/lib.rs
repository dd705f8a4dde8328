//! # FileRack Architecture
//!
//! FileRack keeps every unsaved editor buffer shadowed by a plain text file in
//! a single directory, the *rack*. The file is named after the first line of
//! the buffer, renamed as that line changes, and deleted when the buffer is
//! emptied. It is a library that happens to ship a small CLI for browsing the
//! rack; the editor integration drives it through the [`host`] traits.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns store, naming policy, buffer registry, preview      │
//! │  - Borrows the host per call                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command / Routing Layer (commands/, router.rs, entry.rs)   │
//! │  - Per-buffer state machine and user-facing commands        │
//! │  - Returns Rust types, never prints                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RackStore trait                                          │
//! │  - FileRack (production), InMemoryRack (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Buffer lifecycle
//!
//! A buffer starts *untracked*. Its first non-empty modification, if the
//! buffer is eligible, writes `<sanitized first line>.txt` and the buffer
//! becomes *tracked* under that name. Later edits rewrite or rename the file;
//! emptying the buffer deletes it and the buffer is untracked again. Closing
//! a buffer leaves its file in the rack.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade every client goes through
//! - [`entry`]: The per-buffer state machine
//! - [`router`]: Host notifications to entries
//! - [`naming`]: Title extraction, sanitizing and collision handling
//! - [`store`]: Storage abstraction, the `index.json` syntax sidecar
//! - [`host`]: What the rack needs from an editor
//! - [`commands`]: List, view, open/preview, save, syntax, remove, config
//! - [`config`] / [`init`]: Configuration and wiring
//! - [`model`] / [`error`]: Shared types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod entry;
pub mod error;
pub mod host;
pub mod init;
pub mod model;
pub mod naming;
pub mod router;
pub mod store;
