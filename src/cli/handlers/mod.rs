// src/cli/handlers/mod.rs

//! One module per CLI action.

/// Helpers shared by the handlers.
pub mod commons;
/// `cursor`: stores the window position of a menu.
pub mod cursor;
/// `edit`: changes one item.
pub mod edit;
/// `exec`: launches one item without the interactive loop.
pub mod exec;
/// `new`: creates an empty menu file.
pub mod new;
/// `_resolve`: shows how a command line is split.
pub mod resolve;
/// `run`: the interactive menu loop.
pub mod run;
/// `settings`: page-level settings.
pub mod settings;
/// `show`: lists a menu.
pub mod show;
