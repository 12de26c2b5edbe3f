// src/cli/handlers/edit.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use super::commons;
use crate::{core::flag, models::MenuPage};

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    about = "Edits one item of a menu.",
    after_help = "Flag codes: 1st char - * B (launch, next menu, back), \
                  2nd char - * I (continue, end, minimize), 3rd char - * (shown, hidden)."
)]
struct EditArgs {
    menu: PathBuf,
    /// 1-based item index.
    index: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    comment: Option<String>,
    /// Command line, or the menu file for a next-menu item.
    #[arg(long, allow_hyphen_values = true)]
    command: Option<String>,
    /// Three-character flag code, e.g. `--*` or `*--`.
    #[arg(long, allow_hyphen_values = true)]
    flag: Option<String>,
    /// Flip the hidden flag.
    #[arg(long)]
    toggle_hidden: bool,
    /// Reset the item to an empty button.
    #[arg(long, conflicts_with_all = ["title", "comment", "command", "flag", "toggle_hidden"])]
    clear: bool,
    /// Copy the item to another 1-based slot, replacing what is there.
    #[arg(long, value_name = "INDEX", conflicts_with = "move_to")]
    copy_to: Option<String>,
    /// Move the item to another 1-based slot, leaving an empty button behind.
    #[arg(long, value_name = "INDEX")]
    move_to: Option<String>,
}

/// The main handler for the `edit` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let edit_args = EditArgs::try_parse_from(&args)?;
    let index = commons::parse_index(&edit_args.index)?;
    let mut page = commons::load_existing(&edit_args.menu)?;
    commons::ensure_unlocked(&page)?;

    if let Some(code) = &edit_args.flag
        && !flag::is_valid(code)
    {
        return Err(anyhow!("'{}' is not a valid flag code.", code));
    }

    let touched = apply_edits(&mut page, index, &edit_args)?;
    if !touched {
        println!("Nothing to change.");
        return Ok(());
    }
    commons::save(&mut page)?;

    println!("{} Updated item {} of '{}'.", "✔".green(), edit_args.index, edit_args.menu.display());
    Ok(())
}

/// Applies the requested edits to the page. Returns whether anything was requested.
fn apply_edits(page: &mut MenuPage, index: usize, edit: &EditArgs) -> Result<bool> {
    if edit.clear {
        page.clear_item(index)?;
        return Ok(true);
    }

    let mut touched = false;
    let has_field_edit = edit.title.is_some()
        || edit.comment.is_some()
        || edit.command.is_some()
        || edit.flag.is_some();
    if has_field_edit {
        let mut item = page.item(index).cloned().unwrap_or_default();
        if let Some(title) = &edit.title {
            item.title.clone_from(title);
        }
        if let Some(comment) = &edit.comment {
            item.comment.clone_from(comment);
        }
        if let Some(command) = &edit.command {
            item.command.clone_from(command);
        }
        if let Some(code) = &edit.flag {
            item.apply_flag_code(code);
        }
        page.set_item(index, item)?;
        touched = true;
    }
    if edit.toggle_hidden {
        page.toggle_hidden(index)?;
        touched = true;
    }

    if let Some(target) = &edit.copy_to {
        let target = commons::parse_index(target)?;
        let item = page.item(index).cloned().unwrap_or_default();
        page.set_item(target, item)?;
        touched = true;
    } else if let Some(target) = &edit.move_to {
        let target = commons::parse_index(target)?;
        let item = page.take_item(index)?;
        page.set_item(target, item)?;
        touched = true;
    }
    Ok(touched)
}
