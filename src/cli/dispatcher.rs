// src/cli/dispatcher.rs

//! Maps the first command-line argument to an action handler.

use anyhow::Result;

use crate::cli::handlers;

/// A CLI action, its aliases and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The default action, also used when the first argument names a menu file.
static RUN: CommandDefinition = CommandDefinition {
    name: "run",
    aliases: &["start"],
    handler: handlers::run::handle,
};

/// The single source of truth for all actions.
static COMMAND_REGISTRY: &[&CommandDefinition] = &[
    &RUN,
    &CommandDefinition {
        name: "show",
        aliases: &["ls"],
        handler: handlers::show::handle,
    },
    &CommandDefinition {
        name: "exec",
        aliases: &[],
        handler: handlers::exec::handle,
    },
    &CommandDefinition {
        name: "new",
        aliases: &[],
        handler: handlers::new::handle,
    },
    &CommandDefinition {
        name: "edit",
        aliases: &[],
        handler: handlers::edit::handle,
    },
    &CommandDefinition {
        name: "settings",
        aliases: &["set"],
        handler: handlers::settings::handle,
    },
    &CommandDefinition {
        name: "cursor",
        aliases: &[],
        handler: handlers::cursor::handle,
    },
    &CommandDefinition {
        name: "_resolve",
        aliases: &[],
        handler: handlers::resolve::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
        .copied()
}

/// Splits the raw arguments into an action name and the arguments for its handler.
///
/// - `himenu` runs the default menu.
/// - `himenu <action> [args...]` runs that action.
/// - `himenu <menu> [args...]` is a shortcut for `run <menu> [args...]`.
fn route(all_args: Vec<String>) -> (&'static CommandDefinition, Vec<String>) {
    let mut args = all_args.into_iter();
    let run = &RUN;
    match args.next() {
        None => (run, Vec::new()),
        Some(first) => match find_command(&first) {
            Some(command) => (command, args.collect()),
            None => {
                let mut run_args = vec![first];
                run_args.extend(args);
                (run, run_args)
            }
        },
    }
}

/// Runs the action named by the first argument. See [`Cli`](crate::cli::Cli).
pub fn dispatch(all_args: Vec<String>) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);
    let (command, handler_args) = route(all_args);
    log::debug!("Action '{}' with {:?}", command.name, handler_args);
    (command.handler)(handler_args)
}
