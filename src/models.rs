// src/models.rs

//! The in-memory menu model and the serde mirror of the menu file.

use crate::constants::{
    DEFAULT_COLUMNS, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE, DEFAULT_HEIGHT, DEFAULT_ROWS,
    DEFAULT_WIDTH, MAX_ITEM_SLOTS,
};
use crate::core::flag;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// --- MENU ITEM MODELS ---

/// What selecting an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemAttribute {
    /// Launch the program named by the item's command.
    #[default]
    ExecApplication,
    /// Open the menu file named by the item's command as a child menu.
    OpenNextMenu,
    /// Return to the parent menu.
    BackPrevMenu,
}

/// What the launcher itself does once an item has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemAfter {
    /// Keep the launcher open.
    #[default]
    Continue,
    /// Exit the launcher.
    End,
    /// Minimize the launcher window.
    Minimize,
}

/// One actionable slot in a menu page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuItem {
    /// Button caption.
    pub title: String,
    /// Free-form note shown next to the caption.
    pub comment: String,
    /// Raw launch target: a command line for `ExecApplication`, a menu file otherwise.
    pub command: String,
    /// What selecting the item does.
    pub attribute: ItemAttribute,
    /// What the launcher does afterwards.
    pub after: ItemAfter,
    /// Hidden items are left out of the menu while the page is locked.
    pub hidden: bool,
}

impl MenuItem {
    /// The 3-character compact form of `attribute`, `after` and `hidden`.
    pub fn flag_code(&self) -> String {
        flag::encode(self.attribute, self.after, self.hidden)
    }

    /// Applies a flag code with the permissive decode policy: positions holding an
    /// unrecognized character keep the item's current value.
    pub fn apply_flag_code(&mut self, code: &str) {
        let decoded = flag::decode(code, self.attribute, self.after, self.hidden);
        self.attribute = decoded.attribute;
        self.after = decoded.after;
        self.hidden = decoded.hidden;
    }

    /// True if the item carries no information and is omitted when a page is saved.
    pub fn is_default(&self) -> bool {
        self.title.is_empty()
            && self.comment.is_empty()
            && self.command.is_empty()
            && flag::is_default(self.attribute, self.after, self.hidden)
    }
}

// --- MENU PAGE MODELS ---

/// Where the host should place the window of a menu page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayPosition {
    /// Same position as the root menu.
    #[default]
    RootMenu,
    /// Position of the menu being left.
    CurrentMenu,
    /// Centered on the screen.
    ScreenCenter,
}

impl DisplayPosition {
    /// The 1-based ordinal used in menu files.
    pub fn ordinal(self) -> i64 {
        match self {
            Self::RootMenu => 1,
            Self::CurrentMenu => 2,
            Self::ScreenCenter => 3,
        }
    }

    /// Inverse of [`DisplayPosition::ordinal`].
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            1 => Some(Self::RootMenu),
            2 => Some(Self::CurrentMenu),
            3 => Some(Self::ScreenCenter),
            _ => None,
        }
    }
}

/// An RGB color. The core never interprets it; it only stores and packs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl RgbColor {
    /// Builds a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Window background of a new page.
pub const DEFAULT_BACK_COLOR: RgbColor = RgbColor::new(160, 160, 160);
/// Button face of a new page.
pub const DEFAULT_BUTTON_COLOR: RgbColor = RgbColor::new(240, 240, 240);
/// Button text of a new page.
pub const DEFAULT_TEXT_COLOR: RgbColor = RgbColor::new(0, 0, 0);
/// Text of the highlighted button on a new page.
pub const DEFAULT_HIGHLIGHT_TEXT_COLOR: RgbColor = RgbColor::new(0, 120, 215);

/// An edit that would make a page the store cannot read back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The item index is past the last slot a menu file can hold.
    #[error("Item {} is out of range (a menu holds at most {max} items).", .0.saturating_add(1), max = MAX_ITEM_SLOTS)]
    SlotOutOfRange(usize),
    /// `rows * columns` exceeds the slots a menu file can hold.
    #[error("A {rows} x {columns} grid is too large (at most {max} items).", max = MAX_ITEM_SLOTS)]
    GridTooLarge {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        columns: usize,
    },
}

/// One persisted menu screen: its layout, appearance and item grid.
///
/// The item list always holds at least `rows * columns` entries. It grows lazily
/// and is never truncated, so shrinking the grid keeps the items beyond it.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuPage {
    /// Window title.
    pub title: String,
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub columns: usize,
    /// Window width. Passed through to the host.
    pub width: i32,
    /// Window height. Passed through to the host.
    pub height: i32,
    /// Last window position, as stored by the host.
    pub current_x: i32,
    /// See `current_x`.
    pub current_y: i32,
    /// Button font.
    pub font_name: String,
    /// Font size in points.
    pub font_size: f32,
    /// Bold text.
    pub font_bold: bool,
    /// Italic text.
    pub font_italic: bool,
    /// Underlined text.
    pub font_underline: bool,
    /// Where the host places the window.
    pub display_position: DisplayPosition,
    /// Background image. Empty for none.
    pub background_image_file: String,
    /// Tile the background image instead of stretching it.
    pub background_image_tile: bool,
    /// Whether the host shows a menu bar.
    pub menu_visible: bool,
    /// Whether the host shows a status bar.
    pub status_bar_visible: bool,
    /// Non-empty locks the page. See [`MenuPage::is_locked`].
    pub lock_password: String,
    /// Window background.
    pub back_color: RgbColor,
    /// Button face.
    pub button_color: RgbColor,
    /// Button text.
    pub text_color: RgbColor,
    /// Text of the highlighted button.
    pub highlight_text_color: RgbColor,
    /// The item treated as "escape". Always a valid index into `items` when set.
    pub cancel_button: Option<usize>,
    /// The item grid in row-major order. May be longer than `rows * columns`.
    pub items: Vec<MenuItem>,
    /// Where this page is stored.
    pub file_name: PathBuf,
    /// Set by every edit and cleared by a successful save.
    pub is_changed: bool,
}

impl Default for MenuPage {
    fn default() -> Self {
        Self::new(PathBuf::new())
    }
}

impl MenuPage {
    /// Creates the default page: a 10x2 grid of empty items, stored at `file_name`.
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        let mut page = Self {
            title: String::new(),
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            current_x: 0,
            current_y: 0,
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_bold: true,
            font_italic: false,
            font_underline: false,
            display_position: DisplayPosition::RootMenu,
            background_image_file: String::new(),
            background_image_tile: false,
            menu_visible: true,
            status_bar_visible: true,
            lock_password: String::new(),
            back_color: DEFAULT_BACK_COLOR,
            button_color: DEFAULT_BUTTON_COLOR,
            text_color: DEFAULT_TEXT_COLOR,
            highlight_text_color: DEFAULT_HIGHLIGHT_TEXT_COLOR,
            cancel_button: None,
            items: Vec::new(),
            file_name: file_name.into(),
            is_changed: false,
        };
        page.ensure_item_count(page.capacity());
        page
    }

    /// Number of grid slots (`rows * columns`).
    pub fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// A locked page is execution-only. Derived from the password, never stored on its own.
    pub fn is_locked(&self) -> bool {
        !self.lock_password.is_empty()
    }

    /// The file this page is stored in.
    pub fn file_path(&self) -> &Path {
        &self.file_name
    }

    /// Appends default items until the list holds at least `count` entries.
    pub fn ensure_item_count(&mut self, count: usize) {
        if self.items.len() < count {
            self.items.resize_with(count, MenuItem::default);
        }
    }

    /// The item at `index`, if the list reaches that far.
    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    /// Stores `item` at `index`, growing the list if needed. Returns the replaced item.
    pub fn set_item(&mut self, index: usize, item: MenuItem) -> Result<MenuItem, PageError> {
        let slot = self.slot_mut(index)?;
        let old = std::mem::replace(slot, item);
        self.is_changed = true;
        Ok(old)
    }

    /// Removes the item at `index`, leaving a default item in its slot (cut).
    pub fn take_item(&mut self, index: usize) -> Result<MenuItem, PageError> {
        self.set_item(index, MenuItem::default())
    }

    /// Resets the item at `index` to its default (delete).
    pub fn clear_item(&mut self, index: usize) -> Result<(), PageError> {
        self.take_item(index).map(|_| ())
    }

    /// Flips the hidden flag of the item at `index` and returns the new value.
    pub fn toggle_hidden(&mut self, index: usize) -> Result<bool, PageError> {
        let item = self.slot_mut(index)?;
        item.hidden = !item.hidden;
        let hidden = item.hidden;
        self.is_changed = true;
        Ok(hidden)
    }

    /// Makes the item at `index` the escape button, or clears it if it already is.
    pub fn toggle_cancel_button(&mut self, index: usize) -> Result<(), PageError> {
        self.slot_mut(index)?;
        self.cancel_button = if self.cancel_button == Some(index) {
            None
        } else {
            Some(index)
        };
        self.is_changed = true;
        Ok(())
    }

    /// Changes the grid size. Items are appended as needed and never dropped.
    ///
    /// A grid of more than [`MAX_ITEM_SLOTS`] slots is refused and leaves the page as it was.
    pub fn resize(&mut self, rows: usize, columns: usize) -> Result<(), PageError> {
        match rows.checked_mul(columns) {
            Some(slots) if slots <= MAX_ITEM_SLOTS => {}
            _ => return Err(PageError::GridTooLarge { rows, columns }),
        }
        self.rows = rows;
        self.columns = columns;
        self.ensure_item_count(self.capacity());
        self.is_changed = true;
        Ok(())
    }

    /// The item at `index`, growing the list up to it. Fails past [`MAX_ITEM_SLOTS`].
    fn slot_mut(&mut self, index: usize) -> Result<&mut MenuItem, PageError> {
        if index >= MAX_ITEM_SLOTS {
            return Err(PageError::SlotOutOfRange(index));
        }
        self.ensure_item_count(index + 1);
        self.items
            .get_mut(index)
            .ok_or(PageError::SlotOutOfRange(index))
    }

    /// Sets (or with an empty string, removes) the lock password.
    pub fn set_lock_password(&mut self, password: impl Into<String>) {
        self.lock_password = password.into();
        self.is_changed = true;
    }

    /// Records the window position.
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.current_x = x;
        self.current_y = y;
        self.is_changed = true;
    }
}

// --- NAVIGATION MODELS ---

/// A parent menu remembered while a child menu is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistoryEntry {
    /// The parent menu file.
    pub file_name: PathBuf,
    /// The item that opened the child menu.
    pub selected_index: usize,
}

// --- MENU FILE MODELS ---
// These mirror the on-disk document. Every field is optional so that a partial
// file still loads; missing values keep the page defaults.

/// A whole menu file.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct MenuDocument {
    /// Format version, see [`crate::constants::MENU_FORMAT_VERSION`].
    pub version: Option<String>,
    /// Title and items.
    #[serde(rename = "EnvironmentTitle")]
    pub environment_title: Option<EnvironmentTitleSection>,
    /// Layout and appearance.
    #[serde(rename = "ExecuteEnvironment")]
    pub execute_environment: Option<ExecuteEnvironmentSection>,
    /// Last window position.
    #[serde(rename = "Current")]
    pub current: Option<CurrentSection>,
}

/// The `EnvironmentTitle` table.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct EnvironmentTitleSection {
    /// Page title.
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// The stored items.
    #[serde(rename = "Items")]
    pub items: Option<ItemsSection>,
}

/// The `Items` table.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ItemsSection {
    /// Only non-default items are written.
    #[serde(rename = "Item", default)]
    pub item: Vec<ItemEntry>,
}

/// The stored `index` of an item. Hand-edited files sometimes quote it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ItemIndex {
    /// A plain integer.
    Number(i64),
    /// A quoted number.
    Text(String),
}

impl ItemIndex {
    /// The 1-based position, if it is a number at all.
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One stored item.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ItemEntry {
    /// 1-based slot.
    pub index: Option<ItemIndex>,
    /// Caption.
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// Note.
    #[serde(rename = "Comment")]
    pub comment: Option<String>,
    /// Command line or menu file.
    #[serde(rename = "Command")]
    pub command: Option<String>,
    /// Flag code, see [`crate::core::flag`].
    #[serde(rename = "Flag")]
    pub flag: Option<String>,
}

/// The `ExecuteEnvironment` table. Colors are packed `0x00BBGGRR`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ExecuteEnvironmentSection {
    /// Grid rows.
    pub rows: Option<i64>,
    /// Grid columns.
    pub cols: Option<i64>,
    /// Window width.
    pub width: Option<i32>,
    /// Window height.
    pub height: Option<i32>,
    /// Button font.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<f32>,
    /// Bold.
    pub font_bold: Option<bool>,
    /// Italic.
    pub font_italic: Option<bool>,
    /// Underline.
    pub font_underline: Option<bool>,
    /// 1 root menu, 2 current menu, 3 screen center.
    pub disp_position: Option<i64>,
    /// Background image.
    #[serde(rename = "BGFile")]
    pub bg_file: Option<String>,
    /// Tile the background image.
    #[serde(rename = "BGTile")]
    pub bg_tile: Option<bool>,
    /// Menu bar visibility.
    pub menu_visible: Option<bool>,
    /// Status bar visibility.
    pub status_bar_visible: Option<bool>,
    /// Window background.
    pub back_color: Option<i64>,
    /// Button face.
    pub button_color: Option<i64>,
    /// Button text.
    pub text_color: Option<i64>,
    /// Highlighted text.
    #[serde(rename = "HighLightTextColor")]
    pub highlight_text_color: Option<i64>,
    /// 1-based escape item.
    pub cancel_button: Option<i64>,
    /// Lock password.
    pub lock_password: Option<String>,
}

/// The `Current` table.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentSection {
    /// Window position.
    pub current_x: Option<i32>,
    /// See `current_x`.
    pub current_y: Option<i32>,
}

// --- LAUNCHER CONFIG MODELS ---

/// The deserialized `config.toml` of the launcher. Every key is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Menu opened when no file is given on the command line.
    /// `~` and environment variables are expanded.
    pub default_menu: Option<String>,
    /// Program that opens documents with their associated application.
    pub opener: Option<String>,
}
