// src/system/mod.rs

//! # System Interaction Layer
//!
//! The boundary between the menu engine and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: Spawns external programs detached from the launcher, falling
//!   back to the platform's default-application opener for documents.
//! - **`launcher`**: Turns a menu item's command line into a spawn request, entering
//!   the command's directory for the duration of the launch.

/// Detached process spawning.
pub mod executor;
/// The launch lock and working-directory handling around a spawn.
pub mod launcher;
