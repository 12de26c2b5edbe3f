// src/cli/handlers/settings.rs

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use super::commons;
use crate::{
    core::color,
    models::{DisplayPosition, MenuPage, RgbColor},
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PositionArg {
    Root,
    Current,
    Center,
}

impl From<PositionArg> for DisplayPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Root => Self::RootMenu,
            PositionArg::Current => Self::CurrentMenu,
            PositionArg::Center => Self::ScreenCenter,
        }
    }
}

#[derive(Parser, Debug, Default, PartialEq)]
#[command(no_binary_name = true, about = "Changes the page-level settings of a menu.")]
struct SettingsArgs {
    menu: PathBuf,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    #[arg(long)]
    width: Option<i32>,
    #[arg(long)]
    height: Option<i32>,
    /// Lock password. An empty string unlocks the menu.
    #[arg(long)]
    password: Option<String>,
    /// 1-based index of the item selected by Esc.
    #[arg(long, value_name = "INDEX", conflicts_with = "no_cancel")]
    cancel: Option<String>,
    /// Remove the Esc item.
    #[arg(long)]
    no_cancel: bool,
    #[arg(long, value_enum)]
    display: Option<PositionArg>,
    #[arg(long)]
    font: Option<String>,
    #[arg(long)]
    font_size: Option<f32>,
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    bold: Option<bool>,
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    italic: Option<bool>,
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    underline: Option<bool>,
    /// Background image file. An empty string removes it.
    #[arg(long)]
    background: Option<String>,
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    tile: Option<bool>,
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    menu_bar: Option<bool>,
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    status_bar: Option<bool>,
    /// Colors as `#RRGGBB`.
    #[arg(long, value_name = "#RRGGBB")]
    back_color: Option<String>,
    #[arg(long, value_name = "#RRGGBB")]
    button_color: Option<String>,
    #[arg(long, value_name = "#RRGGBB")]
    text_color: Option<String>,
    #[arg(long, value_name = "#RRGGBB")]
    highlight_color: Option<String>,
}

/// The main handler for the `settings` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let settings = SettingsArgs::try_parse_from(&args)?;
    let mut page = commons::load_existing(&settings.menu)?;

    // A locked menu only accepts a password change.
    let only_password = SettingsArgs {
        menu: settings.menu.clone(),
        password: settings.password.clone(),
        ..Default::default()
    };
    if page.is_locked() && settings != only_password {
        commons::ensure_unlocked(&page)?;
    }

    apply_settings(&mut page, &settings)?;
    if !page.is_changed {
        println!("Nothing to change.");
        return Ok(());
    }
    commons::save(&mut page)?;

    println!("{} Updated '{}'.", "✔".green(), settings.menu.display());
    if page.is_locked() {
        println!("  The menu is locked.");
    }
    Ok(())
}

fn apply_settings(page: &mut MenuPage, settings: &SettingsArgs) -> Result<()> {
    if let Some(title) = &settings.title {
        page.title.clone_from(title);
        page.is_changed = true;
    }
    if settings.rows.is_some() || settings.cols.is_some() {
        let rows = settings.rows.unwrap_or(page.rows);
        let columns = settings.cols.unwrap_or(page.columns);
        commons::check_grid(rows, columns)?;
        page.resize(rows, columns)?;
    }
    if let Some(password) = &settings.password {
        page.set_lock_password(password.as_str());
    }
    if let Some(cancel) = &settings.cancel {
        let index = commons::parse_index(cancel)?;
        if page.cancel_button != Some(index) {
            page.toggle_cancel_button(index)?;
        }
    } else if settings.no_cancel && page.cancel_button.is_some() {
        page.cancel_button = None;
        page.is_changed = true;
    }

    set_field(page, settings.width, |p| &mut p.width);
    set_field(page, settings.height, |p| &mut p.height);
    set_field(page, settings.display.map(DisplayPosition::from), |p| &mut p.display_position);
    set_field(page, settings.font.clone(), |p| &mut p.font_name);
    set_field(page, settings.font_size, |p| &mut p.font_size);
    set_field(page, settings.bold, |p| &mut p.font_bold);
    set_field(page, settings.italic, |p| &mut p.font_italic);
    set_field(page, settings.underline, |p| &mut p.font_underline);
    set_field(page, settings.background.clone(), |p| &mut p.background_image_file);
    set_field(page, settings.tile, |p| &mut p.background_image_tile);
    set_field(page, settings.menu_bar, |p| &mut p.menu_visible);
    set_field(page, settings.status_bar, |p| &mut p.status_bar_visible);

    set_field(page, parse_color(settings.back_color.as_deref())?, |p| &mut p.back_color);
    set_field(page, parse_color(settings.button_color.as_deref())?, |p| &mut p.button_color);
    set_field(page, parse_color(settings.text_color.as_deref())?, |p| &mut p.text_color);
    set_field(page, parse_color(settings.highlight_color.as_deref())?, |p| {
        &mut p.highlight_text_color
    });
    Ok(())
}

/// Stores `value` in the selected field and marks the page dirty if it was given.
fn set_field<T>(page: &mut MenuPage, value: Option<T>, field: impl FnOnce(&mut MenuPage) -> &mut T) {
    if let Some(value) = value {
        *field(page) = value;
        page.is_changed = true;
    }
}

fn parse_color(text: Option<&str>) -> Result<Option<RgbColor>> {
    text.map(|t| color::parse_hex(t).ok_or_else(|| anyhow!("'{}' is not a #RRGGBB color.", t)))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SettingsArgs {
        SettingsArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_resize_and_layout() {
        // --- Setup ---
        let mut page = MenuPage::new("m.toml");
        let settings = parse(&["m.toml", "--rows", "3", "--cols", "4", "--display", "center", "--bold", "false"]);

        // --- Execute ---
        apply_settings(&mut page, &settings).unwrap();

        // --- Assert ---
        assert_eq!((page.rows, page.columns), (3, 4));
        // Shrinking never drops items.
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.display_position, DisplayPosition::ScreenCenter);
        assert!(!page.font_bold);
        assert!(page.is_changed);
    }

    #[test]
    fn test_password_locks_and_unlocks() {
        let mut page = MenuPage::new("m.toml");
        apply_settings(&mut page, &parse(&["m.toml", "--password", "secret"])).unwrap();
        assert!(page.is_locked());
        apply_settings(&mut page, &parse(&["m.toml", "--password", ""])).unwrap();
        assert!(!page.is_locked());
    }

    #[test]
    fn test_cancel_button_is_set_not_toggled() {
        let mut page = MenuPage::new("m.toml");
        let settings = parse(&["m.toml", "--cancel", "5"]);
        apply_settings(&mut page, &settings).unwrap();
        apply_settings(&mut page, &settings).unwrap();
        assert_eq!(page.cancel_button, Some(4));

        apply_settings(&mut page, &parse(&["m.toml", "--no-cancel"])).unwrap();
        assert_eq!(page.cancel_button, None);
    }

    #[test]
    fn test_colors() {
        let mut page = MenuPage::new("m.toml");
        apply_settings(&mut page, &parse(&["m.toml", "--back-color", "#102030"])).unwrap();
        assert_eq!(page.back_color, RgbColor::new(0x10, 0x20, 0x30));

        let bad = parse(&["m.toml", "--text-color", "red"]);
        assert!(apply_settings(&mut page, &bad).is_err());
    }

    #[test]
    fn test_zero_rows_rejected() {
        let mut page = MenuPage::new("m.toml");
        assert!(apply_settings(&mut page, &parse(&["m.toml", "--rows", "0"])).is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        // --- Setup ---
        let mut page = MenuPage::new("m.toml");

        // --- Execute ---
        let result = apply_settings(&mut page, &parse(&["m.toml", "--rows", "300", "--cols", "300"]));

        // --- Assert ---
        assert!(result.is_err());
        assert_eq!((page.rows, page.columns), (10, 2));
        assert_eq!(page.items.len(), 20);
        assert!(!page.is_changed);
    }

    #[test]
    fn test_out_of_range_cancel_rejected() {
        let mut page = MenuPage::new("m.toml");
        assert!(apply_settings(&mut page, &parse(&["m.toml", "--cancel", "70000"])).is_err());
        assert_eq!(page.cancel_button, None);
    }

    #[test]
    fn test_password_only_request_detection() {
        let request = parse(&["m.toml", "--password", ""]);
        let only_password = SettingsArgs {
            menu: request.menu.clone(),
            password: request.password.clone(),
            ..Default::default()
        };
        assert_eq!(request, only_password);
        assert_ne!(parse(&["m.toml", "--title", "x"]), only_password);
    }
}
