// src/cli/handlers/resolve.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use crate::core::path_resolver;

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    about = "[DEBUG] Shows how a command line is split before launching."
)]
struct ResolveArgs {
    /// The command line, quoted as one argument.
    #[arg(allow_hyphen_values = true)]
    command: String,
}

/// The main handler for the `_resolve` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let resolve_args = ResolveArgs::try_parse_from(&args)?;
    let command_line = resolve_args.command.as_str();

    let token = path_resolver::path_token(command_line);
    let (directory, file_name) = path_resolver::split_path_and_file(&token);

    println!("\n--- {} ---", "Command Line".yellow());
    println!("  {:<12} {}", "Input".blue(), command_line);
    println!("  {:<12} {}", "Path token".blue(), token);
    println!("  {:<12} {}", "Directory".blue(), directory);
    println!("  {:<12} {}", "File name".blue(), file_name);
    match path_resolver::split_command_and_options(command_line) {
        Ok((command, options)) => {
            println!("  {:<12} {}", "Command".blue(), command);
            println!("  {:<12} {}", "Options".blue(), options);
        }
        Err(e) => println!("  {:<12} {}", "Options".blue(), e.to_string().red()),
    }
    println!("  {:<12} {}", "Quoted".blue(), path_resolver::quote_if_needed(&token));
    Ok(())
}
