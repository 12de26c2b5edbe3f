// src/core/mod.rs

//! The menu engine: models on disk, command-line resolution, navigation and the
//! session that ties them together.

/// Packed color values.
pub mod color;
/// The launcher's own `config.toml`.
pub mod config;
/// The three-character item flag code.
pub mod flag;
/// Reading and writing menu files.
pub mod menu_store;
/// The stack of parent menus.
pub mod navigation;
/// Splitting a command line into program, directory and options.
pub mod path_resolver;
/// Configuration directory lookup and path templates.
pub mod paths;
/// Navigation and launching over one menu hierarchy.
pub mod session;
