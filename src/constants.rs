// src/constants.rs

//! Format, layout and configuration constants shared across the crate.

/// Version string written into the root of every saved menu document.
pub const MENU_FORMAT_VERSION: &str = "3.0.0.0";

/// Default number of button rows in a new menu page.
pub const DEFAULT_ROWS: usize = 10;

/// Default number of button columns in a new menu page.
pub const DEFAULT_COLUMNS: usize = 2;

/// Default window width, passed through untouched to the host.
pub const DEFAULT_WIDTH: i32 = 559;

/// Default window height, passed through untouched to the host.
pub const DEFAULT_HEIGHT: i32 = 406;

/// Default button font.
pub const DEFAULT_FONT_NAME: &str = "ＭＳ Ｐゴシック";
/// Default button font size, in points.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Upper bound on the item slots of one page (`rows * columns`, and any item index).
/// Keeps a corrupt file or a mistyped size from allocating without limit.
pub const MAX_ITEM_SLOTS: usize = 1 << 16;

/// The flag code of an item with every field at its default value.
pub const DEFAULT_FLAG_CODE: &str = "---";

/// The name of the directory holding himenu configuration (in the system config dir).
pub const CONFIG_DIR_NAME: &str = "himenu";

/// The name of the launcher configuration file (inside the config dir).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "HIMENU_CONFIG_DIR";
