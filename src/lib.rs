// src/lib.rs

//! # himenu
//!
//! A hierarchical, file-backed menu launcher. Each menu is a TOML file holding a
//! grid of items; an item launches a program, opens a child menu or goes back.
//!
//! The library is the engine (models, store, resolver, navigation and launching);
//! the `himenu` binary is a thin terminal host over it.

/// The terminal host.
pub mod cli;
pub mod constants;
/// The non-visual menu engine.
pub mod core;
pub mod models;
/// Process spawning and launch coordination.
pub mod system;
