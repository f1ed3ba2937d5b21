//! # CLI Layer
//!
//! This module is **one possible UI client** for vibecheck. It is the only
//! place that reads stdin, writes stdout/stderr or sets up logging.
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap, see `setup.rs`
//! 2. **Context Setup**: resolve the ledger directory, build the store once
//! 3. **API Dispatch**: call the matching `LedgerApi` method
//! 4. **Output Formatting**: hand the `CmdResult` to `print.rs`
//! 5. **Confirmation**: the reset prompt lives here, not in the command

use super::print::{print_config, print_messages, print_moods, print_paths, print_records, print_summary};
use super::setup::{Cli, Commands};
use clap::Parser;
use log::debug;
use std::io::{self, Write};
use vibecheck::api::{ConfigAction, LedgerApi, NewEntry};
use vibecheck::error::{LedgerError, Result};
use vibecheck::init::initialize;
use vibecheck::model::{self, Kind};
use vibecheck::store::fs_backend::FsBackend;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(cli.data_dir.clone())?;
    debug!("Ledger directory: {}", ctx.data_dir.display());
    ctx.api.subscribe(|_| debug!("Ledger records changed"));

    match cli.command {
        Some(Commands::Add {
            amount,
            mood,
            income,
            note,
            category,
        }) => {
            let kind = if income { Kind::Income } else { Kind::Expense };
            let entry = NewEntry {
                timestamp: model::now(),
                kind,
                amount,
                note,
                mood,
                category,
            };
            handle_add(&ctx.api, entry)
        }
        Some(Commands::Recent { limit }) => handle_recent(&ctx.api, limit),
        Some(Commands::List) => handle_list(&ctx.api),
        Some(Commands::Summary) => handle_summary(&ctx.api),
        Some(Commands::Reset { yes }) => handle_reset(&ctx.api, yes),
        Some(Commands::Path) => handle_path(&ctx.api),
        Some(Commands::Config { key, value }) => handle_config(&ctx.api, key, value),
        Some(Commands::Moods) => {
            print_moods();
            Ok(())
        }
        None => handle_recent(&ctx.api, None),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn handle_add(api: &LedgerApi<FsBackend>, entry: NewEntry) -> Result<()> {
    let result = api.add(entry)?;
    print_records(&result.records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_recent(api: &LedgerApi<FsBackend>, limit: Option<usize>) -> Result<()> {
    let result = api.recent(limit)?;
    print_records(&result.records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &LedgerApi<FsBackend>) -> Result<()> {
    let result = api.list()?;
    print_records(&result.records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_summary(api: &LedgerApi<FsBackend>) -> Result<()> {
    let result = api.summary(model::now().date())?;
    if let Some(summary) = &result.summary {
        print_summary(summary);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(api: &LedgerApi<FsBackend>, skip_confirm: bool) -> Result<()> {
    if !skip_confirm && !confirm_reset(api)? {
        println!("Operation cancelled.");
        return Ok(());
    }
    let result = api.reset()?;
    print_messages(&result.messages);
    Ok(())
}

fn confirm_reset(api: &LedgerApi<FsBackend>) -> Result<bool> {
    match api.list() {
        Ok(result) => println!("This will permanently remove {} records.", result.records.len()),
        Err(e) => {
            debug!("Could not count records before reset: {}", e);
            println!("The ledger cannot be read. Resetting replaces it with an empty one.");
        }
    }
    print!("[Y] To reset: ");
    io::stdout().flush().map_err(LedgerError::Io)?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(LedgerError::Io)?;
    Ok(input.trim() == "Y")
}

fn handle_path(api: &LedgerApi<FsBackend>) -> Result<()> {
    let result = api.paths()?;
    print_paths(&result.paths);
    Ok(())
}

fn handle_config(
    api: &LedgerApi<FsBackend>,
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
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
