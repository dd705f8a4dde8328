//! Dispatch from parsed arguments to the API, and from results to output.

use super::render::{print_content, print_files, print_messages, print_paths};
use super::setup::{Cli, Commands};
use clap::Parser;
use filerack::api::{ConfigAction, RackApi};
use filerack::config::CONFIG_KEYS;
use filerack::error::{RackError, Result};
use filerack::host::memory::MemoryHost;
use filerack::host::{Buffer, Host};
use filerack::init::initialize;
use filerack::store::fs::FileRack;
use std::io::Read;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `FILERACK_LOG=filerack=debug`.
const LOG_ENV: &str = "FILERACK_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { "debug" } else { "warn" });

    let mut api = initialize()?.api;

    match cli.command {
        None | Some(Commands::List) => handle_list(&api),
        Some(Commands::View { name }) => handle_view(&api, &name),
        Some(Commands::Path { names }) => handle_paths(&api, &names),
        Some(Commands::Capture { syntax }) => handle_capture(&mut api, syntax),
        Some(Commands::Remove { names }) => handle_remove(&api, &names),
        Some(Commands::Config { key, value }) => handle_config(&api, key, value),
    }
}

fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV)
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_list(api: &RackApi<FileRack>) -> Result<()> {
    let result = api.list_files()?;
    print_files(&result.listed_files);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(api: &RackApi<FileRack>, name: &str) -> Result<()> {
    let result = api.view_file(name)?;
    if let Some(content) = &result.content {
        print_content(content);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(api: &RackApi<FileRack>, names: &[String]) -> Result<()> {
    if names.is_empty() {
        println!("{}", api.paths().rack_dir.display());
        return Ok(());
    }
    let result = api.file_paths(names)?;
    print_paths(&result.file_paths);
    print_messages(&result.messages);
    Ok(())
}

fn handle_capture(api: &mut RackApi<FileRack>, syntax: Option<String>) -> Result<()> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(RackError::Io)?;

    let mut host = MemoryHost::new();
    let id = host.new_buffer();
    let buffer = host.buffer_mut(id).ok_or(RackError::BufferNotFound(id))?;
    buffer.insert(&text);
    if let Some(syntax) = &syntax {
        buffer.set_syntax(syntax);
    }

    let result = api.save_to_rack(&mut host, id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(api: &RackApi<FileRack>, names: &[String]) -> Result<()> {
    let result = api.remove_files(names)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    api: &RackApi<FileRack>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}
