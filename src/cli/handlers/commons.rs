// src/cli/handlers/commons.rs

//! Shared helpers for the action handlers.

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::{
    constants::MAX_ITEM_SLOTS,
    core::{
        config,
        menu_store::{self, StoreError},
    },
    models::{ItemAttribute, MenuItem, MenuPage},
    system::{
        executor::ShellSpawner,
        launcher::{LaunchOutcome, LaunchResult},
    },
};

/// Converts a 1-based index given on the command line into a 0-based slot.
/// Indexes run from 1 to `MAX_ITEM_SLOTS`.
pub fn parse_index(raw: &str) -> Result<usize> {
    let index: usize = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("'{}' is not a valid item index.", raw))?;
    if index > MAX_ITEM_SLOTS {
        return Err(anyhow!(
            "Item {} is out of range (a menu holds at most {} items).",
            index,
            MAX_ITEM_SLOTS
        ));
    }
    index
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Item indexes start at 1."))
}

/// Checks a grid size given on the command line. Zero and grids past
/// `MAX_ITEM_SLOTS` slots are refused.
pub fn check_grid(rows: usize, columns: usize) -> Result<()> {
    if rows == 0 || columns == 0 {
        return Err(anyhow!("Rows and columns must be at least 1."));
    }
    match rows.checked_mul(columns) {
        Some(slots) if slots <= MAX_ITEM_SLOTS => Ok(()),
        _ => Err(anyhow!(
            "A {} x {} grid is too large (at most {} items).",
            rows,
            columns,
            MAX_ITEM_SLOTS
        )),
    }
}

/// Resolves the menu to open from an optional CLI argument and the launcher config.
pub fn resolve_menu(cli_menu: Option<&str>) -> Result<Option<PathBuf>> {
    let launcher_config = config::load_config()?;
    Ok(config::initial_menu(cli_menu, &launcher_config)?)
}

/// Builds the spawner, honoring a configured opener.
pub fn spawner_from_config() -> Result<ShellSpawner> {
    let launcher_config = config::load_config()?;
    Ok(ShellSpawner::new(launcher_config.opener))
}

/// Loads a menu that must already exist, reporting why it could not be read.
pub fn load_existing(path: &Path) -> Result<MenuPage> {
    if !path.is_file() {
        return Err(StoreError::NotFound(path.to_path_buf()).into());
    }
    menu_store::try_load(path).with_context(|| format!("Could not read menu '{}'", path.display()))
}

/// Saves a page, naming the file in the error.
pub fn save(page: &mut MenuPage) -> Result<()> {
    menu_store::try_save(page)
        .with_context(|| format!("Could not save menu '{}'", page.file_name.display()))
}

/// Locked pages are execution-only.
pub fn ensure_unlocked(page: &MenuPage) -> Result<()> {
    if page.is_locked() {
        return Err(anyhow!(
            "Menu '{}' is locked. Remove the password with `settings --password \"\"` first.",
            page.file_name.display()
        ));
    }
    Ok(())
}

/// A one-line label for an item, as shown in listings and selection prompts.
pub fn item_label(index: usize, item: &MenuItem, is_cancel: bool) -> String {
    let marker = match item.attribute {
        ItemAttribute::ExecApplication => " ",
        ItemAttribute::OpenNextMenu => ">",
        ItemAttribute::BackPrevMenu => "<",
    };
    let mut label = format!("{:>3}{} {}", index + 1, marker, item.title);
    if is_cancel {
        label.push_str(" [esc]");
    }
    if !item.comment.is_empty() {
        label.push_str(&format!("  ({})", item.comment));
    }
    label
}

/// Prints a warning for a failed launch. Successful launches print nothing.
pub fn print_launch_outcome(outcome: &LaunchOutcome) {
    match outcome.result {
        LaunchResult::Success => {}
        LaunchResult::PathChangeError => eprintln!(
            "{} Could not change to directory '{}'.",
            "Warning:".yellow().bold(),
            outcome.message
        ),
        LaunchResult::LaunchError => eprintln!(
            "{} Could not launch '{}'.",
            "Warning:".yellow().bold(),
            outcome.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_is_one_based() {
        assert_eq!(parse_index("1").unwrap(), 0);
        assert_eq!(parse_index(" 20 ").unwrap(), 19);
        assert!(parse_index("0").is_err());
        assert!(parse_index("-3").is_err());
        assert!(parse_index("two").is_err());
    }

    #[test]
    fn test_parse_index_is_bounded() {
        // --- Execute & Assert ---
        assert_eq!(parse_index("65536").unwrap(), MAX_ITEM_SLOTS - 1);
        assert!(parse_index("65537").is_err());
        assert!(parse_index("18446744073709551615").is_err());
    }

    #[test]
    fn test_check_grid_limits() {
        assert!(check_grid(4, 5).is_ok());
        assert!(check_grid(256, 256).is_ok());
        assert!(check_grid(300, 300).is_err());
        assert!(check_grid(usize::MAX, 2).is_err());
        assert!(check_grid(0, 5).is_err());
    }

    #[test]
    fn test_item_label_markers() {
        let item = MenuItem {
            title: "Tools".to_string(),
            comment: "more".to_string(),
            attribute: ItemAttribute::OpenNextMenu,
            ..Default::default()
        };
        assert_eq!(item_label(0, &item, false), "  1> Tools  (more)");
        assert_eq!(item_label(9, &MenuItem::default(), true), " 10   [esc]");
    }

    #[test]
    fn test_load_existing_requires_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_existing(&dir.path().join("none.toml")).unwrap_err();
        assert!(err.downcast_ref::<StoreError>().is_some());
    }
}
