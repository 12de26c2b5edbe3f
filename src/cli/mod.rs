// src/cli/mod.rs

//! The command-line host: argument parsing, action routing and the handlers.

use clap::Parser;

/// Routes the first argument to an action handler.
pub mod dispatcher;
/// The action handlers.
pub mod handlers;

/// himenu: a file-backed, hierarchical program launcher.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = "Actions: run (start), show (ls), exec, new, edit, settings, cursor, _resolve.\n\
                  A first argument that is not an action is opened as a menu file.",
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// An action followed by its arguments, or a menu file to open.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}
