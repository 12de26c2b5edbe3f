// src/core/session.rs

//! # Session
//!
//! The navigation layer between a host (the CLI, or any UI) and the engine. A
//! session owns the page being shown, the history of parent menus and the launch
//! coordinator, and turns a selected item into a launch or a menu change.
//!
//! Pages are owned values: moving to another menu saves the outgoing page if it
//! is dirty, drops it, and loads the next one fresh from its file.

use crate::{
    core::{menu_store, navigation::NavigationStack},
    models::{ItemAfter, ItemAttribute, MenuPage},
    system::{
        executor::{ShellSpawner, Spawner},
        launcher::{LaunchCoordinator, LaunchOutcome},
    },
};
use std::path::PathBuf;

/// What the host should do after a selection has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Keep showing the session's current menu.
    Continue,
    /// Terminate the launcher.
    Exit,
    /// Minimize the launcher window. Hosts without a window may ignore it.
    Minimize,
}

impl From<ItemAfter> for HostAction {
    fn from(after: ItemAfter) -> Self {
        match after {
            ItemAfter::Continue => Self::Continue,
            ItemAfter::End => Self::Exit,
            ItemAfter::Minimize => Self::Minimize,
        }
    }
}

/// The result of handling one selection or escape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Set when the item launched (or tried to launch) an application.
    pub launch: Option<LaunchOutcome>,
    /// What the host should do next.
    pub host_action: HostAction,
}

impl SelectionOutcome {
    fn continue_() -> Self {
        Self {
            launch: None,
            host_action: HostAction::Continue,
        }
    }
}

/// One user's walk through a menu hierarchy.
#[derive(Debug)]
pub struct Session<S: Spawner = ShellSpawner> {
    page: MenuPage,
    history: NavigationStack,
    launcher: LaunchCoordinator<S>,
    selected_index: usize,
}

impl Session<ShellSpawner> {
    /// Starts a session on the menu stored at `file_name`. An empty name or a
    /// missing file starts on an empty default page.
    pub fn open(file_name: impl Into<PathBuf>, spawner: ShellSpawner) -> Self {
        let page = menu_store::load(file_name.into());
        Self::with_launcher(page, LaunchCoordinator::new(spawner))
    }
}

impl<S: Spawner> Session<S> {
    /// Starts a session on an already loaded page, at the root.
    pub fn with_launcher(page: MenuPage, launcher: LaunchCoordinator<S>) -> Self {
        Self {
            page,
            history: NavigationStack::new(),
            launcher,
            selected_index: 0,
        }
    }

    /// The page being shown.
    pub fn page(&self) -> &MenuPage {
        &self.page
    }

    /// Mutable access for edit operations. Edits mark the page dirty, and a dirty
    /// page is saved before the session leaves it.
    pub fn page_mut(&mut self) -> &mut MenuPage {
        &mut self.page
    }

    /// The parent menus above the current one.
    pub fn history(&self) -> &NavigationStack {
        &self.history
    }

    /// The coordinator used for `ExecApplication` items.
    pub fn launcher(&self) -> &LaunchCoordinator<S> {
        &self.launcher
    }

    /// The item highlighted in the current menu.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Moves the highlight. Indexes past the item list are ignored.
    pub fn set_selected_index(&mut self, index: usize) {
        if index < self.page.items.len() {
            self.selected_index = index;
        }
    }

    /// Handles a selection of the item at `index`.
    ///
    /// - `ExecApplication` launches the item's command.
    /// - `OpenNextMenu` remembers the current menu and opens the one named by the
    ///   command.
    /// - `BackPrevMenu` returns to the parent menu and its selection; at the root
    ///   it does nothing.
    ///
    /// The item's after-action is reported in every case, including failed
    /// launches. Returns `None` if there is no item at `index`.
    pub fn select(&mut self, index: usize) -> Option<SelectionOutcome> {
        let item = self.page.item(index)?.clone();
        self.selected_index = index;
        log::debug!(
            "Selected item {} ('{}', {:?}) in '{}'.",
            index + 1,
            item.title,
            item.attribute,
            self.page.file_name.display()
        );

        let launch = match item.attribute {
            ItemAttribute::ExecApplication => Some(self.launcher.launch(&item)),
            ItemAttribute::OpenNextMenu => {
                self.descend(index, PathBuf::from(&item.command));
                None
            }
            ItemAttribute::BackPrevMenu => {
                self.ascend();
                None
            }
        };

        Some(SelectionOutcome {
            launch,
            host_action: item.after.into(),
        })
    }

    /// Handles the escape key: selects the page's cancel button if it has one,
    /// otherwise goes back one menu. At the root without a cancel button the host
    /// is asked to exit.
    pub fn cancel(&mut self) -> SelectionOutcome {
        if let Some(index) = self.page.cancel_button {
            return self.select(index).unwrap_or_else(SelectionOutcome::continue_);
        }
        if self.history.is_root() {
            return SelectionOutcome {
                launch: None,
                host_action: HostAction::Exit,
            };
        }
        self.ascend();
        SelectionOutcome::continue_()
    }

    /// Returns to the parent menu and its selection. Returns `false`, leaving the
    /// session as it was, at the root.
    pub fn back(&mut self) -> bool {
        if self.history.is_root() {
            return false;
        }
        self.ascend();
        true
    }

    /// Replaces the current menu with another root menu, forgetting the history.
    pub fn open_menu(&mut self, file_name: impl Into<PathBuf>) {
        self.persist_if_changed();
        self.history.clear();
        self.page = menu_store::load(file_name.into());
        self.selected_index = 0;
    }

    /// Saves the current page if it has unsaved changes. Returns `false` only if a
    /// save was needed and failed.
    pub fn persist_if_changed(&mut self) -> bool {
        if !self.page.is_changed {
            return true;
        }
        menu_store::save(&mut self.page)
    }

    fn descend(&mut self, index: usize, child: PathBuf) {
        self.persist_if_changed();
        self.history.push(self.page.file_name.clone(), index);
        self.page = menu_store::load(child);
        self.selected_index = 0;
        log::debug!(
            "Opened child menu '{}' (depth {}).",
            self.page.file_name.display(),
            self.history.count()
        );
    }

    fn ascend(&mut self) {
        self.persist_if_changed();
        let Some(parent) = self.history.pop() else {
            log::debug!("Back requested at the root menu; nothing to do.");
            return;
        };
        self.page = menu_store::load(&parent.file_name);
        self.selected_index = 0;
        self.set_selected_index(parent.selected_index);
    }
}
