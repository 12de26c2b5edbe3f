// src/cli/handlers/new.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use super::commons;
use crate::{
    constants::{DEFAULT_COLUMNS, DEFAULT_ROWS},
    models::MenuPage,
};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, about = "Creates an empty menu file.")]
struct NewArgs {
    /// Path of the menu file to create.
    menu: PathBuf,
    #[arg(long, short)]
    title: Option<String>,
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    cols: usize,
    /// Replace an existing file.
    #[arg(long, short)]
    force: bool,
}

/// The main handler for the `new` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let new_args = NewArgs::try_parse_from(&args)?;
    if new_args.menu.exists() && !new_args.force {
        return Err(anyhow!(
            "'{}' already exists. Use --force to replace it.",
            new_args.menu.display()
        ));
    }

    let mut page = build_page(&new_args)?;
    commons::save(&mut page)?;

    println!(
        "{} Created '{}' ({} x {}).",
        "✔".green(),
        new_args.menu.display(),
        page.rows,
        page.columns
    );
    Ok(())
}

fn build_page(new_args: &NewArgs) -> Result<MenuPage> {
    commons::check_grid(new_args.rows, new_args.cols)?;
    let mut page = MenuPage::new(&new_args.menu);
    if let Some(title) = &new_args.title {
        page.title.clone_from(title);
    }
    if (new_args.rows, new_args.cols) != (page.rows, page.columns) {
        page.resize(new_args.rows, new_args.cols)?;
    }
    Ok(page)
}
