// src/bin/himenu.rs

use clap::Parser;
use colored::*;
use himenu::cli::{Cli, dispatcher};

/// The main entry point of the `himenu` application.
/// It sets up logging, parses arguments, dispatches to the action handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    if let Err(e) = dispatcher::dispatch(cli.args) {
        // Argument errors from an action's own parser print their usage as-is.
        if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
