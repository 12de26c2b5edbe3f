// src/core/navigation.rs

//! The history of parent menus.

use crate::models::NavigationHistoryEntry;
use std::path::PathBuf;

/// LIFO history of the parent menus above the one currently shown.
///
/// An empty stack means the current menu is the root menu.
#[derive(Debug, Clone, Default)]
pub struct NavigationStack {
    entries: Vec<NavigationHistoryEntry>,
}

impl NavigationStack {
    /// An empty stack, at the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers the menu being left and the item that was selected in it.
    pub fn push(&mut self, file_name: impl Into<PathBuf>, selected_index: usize) {
        self.entries.push(NavigationHistoryEntry {
            file_name: file_name.into(),
            selected_index,
        });
    }

    /// Removes and returns the most recent parent.
    pub fn pop(&mut self) -> Option<NavigationHistoryEntry> {
        self.entries.pop()
    }

    /// The most recent parent, left in place.
    pub fn peek(&self) -> Option<&NavigationHistoryEntry> {
        self.entries.last()
    }

    /// Forgets every parent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// How many menus deep the current menu is.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// True when no parent is remembered.
    pub fn is_root(&self) -> bool {
        self.entries.is_empty()
    }
}
