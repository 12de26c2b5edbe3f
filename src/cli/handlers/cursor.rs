// src/cli/handlers/cursor.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use crate::core::menu_store;

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    about = "Records the window position of a menu without touching anything else in its file."
)]
struct CursorArgs {
    menu: PathBuf,
    #[arg(allow_hyphen_values = true)]
    x: i32,
    #[arg(allow_hyphen_values = true)]
    y: i32,
}

/// The main handler for the `cursor` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let cursor_args = CursorArgs::try_parse_from(&args)?;

    let mut page = menu_store::load(&cursor_args.menu);
    menu_store::try_update_position(&mut page, cursor_args.x, cursor_args.y).map_err(|e| {
        anyhow!(
            "Could not record the position in '{}': {}",
            cursor_args.menu.display(),
            e
        )
    })?;

    println!(
        "{} Position of '{}' set to {}, {}.",
        "✔".green(),
        cursor_args.menu.display(),
        cursor_args.x,
        cursor_args.y
    );
    Ok(())
}
