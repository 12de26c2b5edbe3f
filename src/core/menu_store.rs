// src/core/menu_store.rs

//! # Menu Store
//!
//! Reads and writes menu pages. One file holds one page.
//!
//! Storage problems never block the user: [`load`] falls back to a default page,
//! [`save`] and [`update_position`] report failure as `false`. The `try_*`
//! variants expose the underlying [`StoreError`] for hosts that want to show it.

use crate::{
    constants::{DEFAULT_FLAG_CODE, MAX_ITEM_SLOTS, MENU_FORMAT_VERSION},
    core::color,
    models::{
        CurrentSection, DisplayPosition, EnvironmentTitleSection, ExecuteEnvironmentSection,
        ItemEntry, ItemIndex, ItemsSection, MenuDocument, MenuItem, MenuPage, PageError,
    },
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Why a menu file could not be read or written.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the file failed.
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid menu document.
    #[error("Failed to parse menu file: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// The page could not be turned into TOML.
    #[error("Failed to serialize menu to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// A stored value is outside the range its page field accepts.
    #[error("Invalid value for '{field}': {value}")]
    Conversion {
        /// The key in the file.
        field: &'static str,
        /// The offending value, as text.
        value: String,
    },
    /// The page is larger than a menu file may hold.
    #[error("The menu page cannot be stored: {0}")]
    Page(#[from] PageError),
    /// The page has an empty file name.
    #[error("The menu page has no file name.")]
    NoFileName,
    /// The menu file does not exist.
    #[error("Menu file '{0}' does not exist.")]
    NotFound(PathBuf),
}

type StoreResult<T> = Result<T, StoreError>;

/// Loads the page stored at `file_name`.
///
/// A missing file yields the default page. An unreadable or malformed one also
/// yields a fresh default page: nothing parsed before the failure is kept, only
/// the file name.
pub fn load(file_name: impl AsRef<Path>) -> MenuPage {
    let path = file_name.as_ref();
    match try_load(path) {
        Ok(page) => page,
        Err(e) => {
            log::warn!(
                "Could not load menu '{}', using an empty page: {}",
                path.display(),
                e
            );
            MenuPage::new(path)
        }
    }
}

/// Like [`load`], but reports read and parse failures.
pub fn try_load(file_name: impl AsRef<Path>) -> StoreResult<MenuPage> {
    let path = file_name.as_ref();
    let mut page = MenuPage::new(path);

    if !path.is_file() {
        log::debug!("Menu '{}' not found, using defaults.", path.display());
        return Ok(page);
    }

    let content = fs::read_to_string(path)?;
    let document: MenuDocument = toml::from_str(&content)?;
    apply_document(&document, &mut page)?;

    log::debug!(
        "Loaded menu '{}' ({}x{}, {} items).",
        path.display(),
        page.rows,
        page.columns,
        page.items.len()
    );
    Ok(page)
}

/// Writes the page to its file and clears the dirty flag. Returns `false` on any failure.
pub fn save(page: &mut MenuPage) -> bool {
    match try_save(page) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not save menu '{}': {}", page.file_name.display(), e);
            false
        }
    }
}

/// Like [`save`], but reports the failure.
pub fn try_save(page: &mut MenuPage) -> StoreResult<()> {
    if page.file_name.as_os_str().is_empty() {
        return Err(StoreError::NoFileName);
    }
    check_storable(page)?;

    let document = to_document(page);
    let content = toml::to_string_pretty(&document)?;
    fs::write(&page.file_name, content)?;

    page.is_changed = false;
    log::debug!("Saved menu '{}'.", page.file_name.display());
    Ok(())
}

/// Records the window position on the page and in its file, leaving the rest of
/// the stored document untouched. Returns `false` on any failure; callers treat
/// that as harmless.
pub fn update_position(page: &mut MenuPage, x: i32, y: i32) -> bool {
    match try_update_position(page, x, y) {
        Ok(()) => true,
        Err(e) => {
            log::debug!(
                "Position of menu '{}' not stored: {}",
                page.file_name.display(),
                e
            );
            false
        }
    }
}

/// Like [`update_position`], but reports the failure.
pub fn try_update_position(page: &mut MenuPage, x: i32, y: i32) -> StoreResult<()> {
    page.current_x = x;
    page.current_y = y;

    let path = page.file_name.as_path();
    if path.as_os_str().is_empty() {
        return Err(StoreError::NoFileName);
    }
    if !path.is_file() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }

    let mut document: toml::Table = fs::read_to_string(path)?.parse()?;

    let current = document
        .entry("Current")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    if !current.is_table() {
        *current = toml::Value::Table(toml::Table::new());
    }
    if let toml::Value::Table(current) = current {
        current.insert("CurrentX".to_string(), toml::Value::Integer(i64::from(x)));
        current.insert("CurrentY".to_string(), toml::Value::Integer(i64::from(y)));
    }

    fs::write(path, toml::to_string_pretty(&document)?)?;
    Ok(())
}

/// Refuses pages the loader would reject, so a save never replaces a readable
/// file with one that loads as an empty page.
fn check_storable(page: &MenuPage) -> Result<(), PageError> {
    match page.rows.checked_mul(page.columns) {
        Some(slots) if slots <= MAX_ITEM_SLOTS => {}
        _ => {
            return Err(PageError::GridTooLarge {
                rows: page.rows,
                columns: page.columns,
            });
        }
    }
    // Default items are not written, so only stored ones past the cap matter.
    match page
        .items
        .iter()
        .enumerate()
        .skip(MAX_ITEM_SLOTS)
        .find(|(_, item)| !item.is_default())
    {
        Some((index, _)) => Err(PageError::SlotOutOfRange(index)),
        None => Ok(()),
    }
}

/// Builds the on-disk document for a page. Items with every field at its default
/// are left out; they come back as defaults on the next load.
pub fn to_document(page: &MenuPage) -> MenuDocument {
    let items = page
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_default())
        .map(|(index, item)| {
            let flag = item.flag_code();
            ItemEntry {
                index: Some(ItemIndex::Number(to_stored_int(index + 1))),
                title: Some(item.title.clone()),
                comment: non_empty(&item.comment),
                command: non_empty(&item.command),
                flag: (flag != DEFAULT_FLAG_CODE).then_some(flag),
            }
        })
        .collect();

    let cancel_button = page
        .cancel_button
        .filter(|&index| index < page.capacity())
        .map(to_stored_int);

    MenuDocument {
        version: Some(MENU_FORMAT_VERSION.to_string()),
        environment_title: Some(EnvironmentTitleSection {
            title: Some(page.title.clone()),
            items: Some(ItemsSection { item: items }),
        }),
        execute_environment: Some(ExecuteEnvironmentSection {
            rows: Some(to_stored_int(page.rows)),
            cols: Some(to_stored_int(page.columns)),
            width: Some(page.width),
            height: Some(page.height),
            font_name: Some(page.font_name.clone()),
            font_size: Some(page.font_size),
            font_bold: Some(page.font_bold),
            font_italic: Some(page.font_italic),
            font_underline: Some(page.font_underline),
            disp_position: Some(page.display_position.ordinal()),
            bg_file: Some(page.background_image_file.clone()),
            bg_tile: Some(page.background_image_tile),
            menu_visible: Some(page.menu_visible),
            status_bar_visible: Some(page.status_bar_visible),
            back_color: Some(color::to_packed(page.back_color)),
            button_color: Some(color::to_packed(page.button_color)),
            text_color: Some(color::to_packed(page.text_color)),
            highlight_text_color: Some(color::to_packed(page.highlight_text_color)),
            cancel_button,
            lock_password: page.is_locked().then(|| page.lock_password.clone()),
        }),
        current: Some(CurrentSection {
            current_x: Some(page.current_x),
            current_y: Some(page.current_y),
        }),
    }
}

/// Copies everything present in `document` onto `page`, then restores the page
/// invariants (item capacity, cancel button range) and marks it clean.
fn apply_document(document: &MenuDocument, page: &mut MenuPage) -> StoreResult<()> {
    if let Some(env_title) = &document.environment_title {
        if let Some(title) = &env_title.title {
            page.title = title.clone();
        }
        if let Some(items) = &env_title.items {
            for entry in &items.item {
                apply_item_entry(entry, page)?;
            }
        }
    }

    let mut stored_cancel_button = None;
    if let Some(env) = &document.execute_environment {
        if let Some(rows) = env.rows {
            page.rows = to_count("Rows", rows)?;
        }
        if let Some(cols) = env.cols {
            page.columns = to_count("Cols", cols)?;
        }
        if let Some(width) = env.width {
            page.width = width;
        }
        if let Some(height) = env.height {
            page.height = height;
        }
        if let Some(font_name) = &env.font_name {
            page.font_name = font_name.clone();
        }
        if let Some(font_size) = env.font_size {
            page.font_size = font_size;
        }
        if let Some(bold) = env.font_bold {
            page.font_bold = bold;
        }
        if let Some(italic) = env.font_italic {
            page.font_italic = italic;
        }
        if let Some(underline) = env.font_underline {
            page.font_underline = underline;
        }
        if let Some(ordinal) = env.disp_position {
            page.display_position =
                DisplayPosition::from_ordinal(ordinal).ok_or_else(|| StoreError::Conversion {
                    field: "DispPosition",
                    value: ordinal.to_string(),
                })?;
        }
        if let Some(bg_file) = &env.bg_file {
            page.background_image_file = bg_file.clone();
        }
        if let Some(bg_tile) = env.bg_tile {
            page.background_image_tile = bg_tile;
        }
        if let Some(visible) = env.menu_visible {
            page.menu_visible = visible;
        }
        if let Some(visible) = env.status_bar_visible {
            page.status_bar_visible = visible;
        }
        if let Some(packed) = env.back_color {
            page.back_color = color::from_packed(packed);
        }
        if let Some(packed) = env.button_color {
            page.button_color = color::from_packed(packed);
        }
        if let Some(packed) = env.text_color {
            page.text_color = color::from_packed(packed);
        }
        if let Some(packed) = env.highlight_text_color {
            page.highlight_text_color = color::from_packed(packed);
        }
        stored_cancel_button = env.cancel_button;
        if let Some(password) = &env.lock_password {
            page.lock_password = password.clone();
        }
    }

    if let Some(current) = &document.current {
        if let Some(x) = current.current_x {
            page.current_x = x;
        }
        if let Some(y) = current.current_y {
            page.current_y = y;
        }
    }

    let capacity = page
        .rows
        .checked_mul(page.columns)
        .filter(|&slots| slots <= MAX_ITEM_SLOTS)
        .ok_or_else(|| StoreError::Conversion {
            field: "Rows*Cols",
            value: format!("{}x{}", page.rows, page.columns),
        })?;
    page.ensure_item_count(capacity);

    page.cancel_button = stored_cancel_button
        .and_then(|index| usize::try_from(index).ok())
        .filter(|&index| index < page.items.len());
    page.is_changed = false;
    Ok(())
}

fn apply_item_entry(entry: &ItemEntry, page: &mut MenuPage) -> StoreResult<()> {
    let Some(position) = entry.index.as_ref().and_then(ItemIndex::value) else {
        return Ok(());
    };
    if position <= 0 {
        return Ok(());
    }

    let index = usize::try_from(position - 1)
        .ok()
        .filter(|&index| index < MAX_ITEM_SLOTS)
        .ok_or_else(|| StoreError::Conversion {
            field: "index",
            value: position.to_string(),
        })?;

    let mut item = MenuItem::default();
    if let Some(title) = &entry.title {
        item.title = title.clone();
    }
    if let Some(comment) = &entry.comment {
        item.comment = comment.clone();
    }
    if let Some(command) = &entry.command {
        item.command = command.clone();
    }
    if let Some(flag) = &entry.flag {
        item.apply_flag_code(flag);
    }

    page.ensure_item_count(index + 1);
    if let Some(slot) = page.items.get_mut(index) {
        *slot = item;
    }
    Ok(())
}

fn to_count(field: &'static str, value: i64) -> StoreResult<usize> {
    usize::try_from(value).map_err(|_| StoreError::Conversion {
        field,
        value: value.to_string(),
    })
}

fn to_stored_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
