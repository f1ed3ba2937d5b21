//! # Vibecheck CLI
//!
//! The `vibe` binary is one client of the `vibecheck` library. This file only
//! invokes `cli::run()` and turns an error into a message and exit code; the
//! CLI proper lives in `src/vibecheck/cli/`:
//!
//! - `setup.rs`: clap argument definitions and version string
//! - `commands.rs`: context setup, logging, dispatch to `LedgerApi`
//! - `print.rs`: colored terminal output for `CmdResult` values
//!
//! Everything from `api.rs` inward is UI agnostic, so all terminal concerns
//! (prompts, colors, exit codes) stay on this side.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
