// src/cli/handlers/show.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::*;

use super::commons;
use crate::{
    core::{color, menu_store},
    models::{MenuPage, RgbColor},
};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Prints a menu's items and layout.")]
struct ShowArgs {
    /// Menu file to show. Defaults to `default_menu` from config.toml.
    menu: Option<String>,
    /// Also list empty slots.
    #[arg(long, short)]
    all: bool,
}

/// The main handler for the `show` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let show_args = ShowArgs::try_parse_from(&args)?;
    let menu = commons::resolve_menu(show_args.menu.as_deref())?
        .ok_or_else(|| anyhow!("No menu given and no `default_menu` configured."))?;

    let page = menu_store::try_load(&menu)?;
    print_header(&page);
    print_items(&page, show_args.all);
    print_layout(&page);
    Ok(())
}

fn print_header(page: &MenuPage) {
    let title = if page.title.is_empty() {
        "(untitled)".dimmed().to_string()
    } else {
        page.title.yellow().to_string()
    };
    println!("\n--- {} ---", title);
    println!("  {:<10} {}", "File".blue(), page.file_name.display());
    if page.is_locked() {
        println!("  {:<10} {}", "Locked".blue(), "yes".red());
    }
}

fn print_items(page: &MenuPage, all: bool) {
    println!("\n{}", "Items:".green().bold());
    for (index, item) in page.items.iter().enumerate() {
        if !all && item.is_default() {
            continue;
        }
        let label = commons::item_label(index, item, page.cancel_button == Some(index));
        let flag = item.flag_code().dimmed();
        if item.hidden {
            println!("  {} {} {}", label.dimmed(), flag, "(hidden)".dimmed());
        } else {
            println!("  {} {}", label, flag);
        }
        if !item.command.is_empty() {
            println!("        {}", item.command.cyan());
        }
    }
}

fn print_layout(page: &MenuPage) {
    println!("\n{}", "Layout:".green().bold());
    println!("  {:<10} {} x {}", "Grid".blue(), page.rows, page.columns);
    println!("  {:<10} {} x {}", "Size".blue(), page.width, page.height);
    println!("  {:<10} {}, {}", "Position".blue(), page.current_x, page.current_y);
    println!("  {:<10} {:?}", "Display".blue(), page.display_position);
    println!(
        "  {:<10} {} {}{}{}{}",
        "Font".blue(),
        page.font_name,
        page.font_size,
        if page.font_bold { " bold" } else { "" },
        if page.font_italic { " italic" } else { "" },
        if page.font_underline { " underline" } else { "" }
    );
    println!(
        "  {:<10} back {} / button {} / text {} / highlight {}",
        "Colors".blue(),
        swatch(page.back_color),
        swatch(page.button_color),
        swatch(page.text_color),
        swatch(page.highlight_text_color)
    );
    if !page.background_image_file.is_empty() {
        println!(
            "  {:<10} {}{}",
            "Background".blue(),
            page.background_image_file,
            if page.background_image_tile { " (tiled)" } else { "" }
        );
    }
}

/// The color as `#RRGGBB`, painted in itself when the terminal allows it.
fn swatch(rgb: RgbColor) -> ColoredString {
    let hex = format!("#{:06X}", color::to_hex(rgb));
    hex.truecolor(rgb.r, rgb.g, rgb.b)
}
