// src/cli/handlers/run.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::{Select, theme::ColorfulTheme};

use super::commons;
use crate::{
    core::session::{HostAction, Session},
    models::MenuPage,
    system::executor::Spawner,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Opens a menu and launches items interactively. Esc goes back."
)]
struct RunArgs {
    /// Menu file to open. Defaults to `default_menu` from config.toml.
    menu: Option<String>,
}

/// The main handler for the `run` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let run_args = RunArgs::try_parse_from(&args)?;
    let menu = commons::resolve_menu(run_args.menu.as_deref())?;
    let spawner = commons::spawner_from_config()?;

    let mut session = Session::open(menu.unwrap_or_default(), spawner);
    let theme = ColorfulTheme::default();

    loop {
        let entries = menu_entries(session.page());
        if entries.is_empty() {
            if leave_empty_menu(&mut session) {
                continue;
            }
            break;
        }

        let default = entries
            .iter()
            .position(|(index, _)| *index == session.selected_index())
            .unwrap_or(0);
        let labels: Vec<&str> = entries.iter().map(|(_, label)| label.as_str()).collect();

        let choice = Select::with_theme(&theme)
            .with_prompt(prompt(&session))
            .items(&labels)
            .default(default)
            .interact_opt()?;

        let outcome = match choice.and_then(|pos| entries.get(pos)) {
            Some((index, _)) => match session.select(*index) {
                Some(outcome) => outcome,
                None => continue,
            },
            None => session.cancel(),
        };

        if let Some(launch) = &outcome.launch {
            commons::print_launch_outcome(launch);
        }
        match outcome.host_action {
            HostAction::Continue => {}
            HostAction::Minimize => log::debug!("Minimize requested; no window to minimize."),
            HostAction::Exit => break,
        }
    }

    if !session.persist_if_changed() {
        eprintln!(
            "{} Unsaved changes to '{}' were lost.",
            "Warning:".yellow().bold(),
            session.page().file_name.display()
        );
    }
    Ok(())
}

/// `(slot, label)` for every item offered in this menu. Empty buttons are never
/// offered. Hidden items are left out only on a locked page and are marked otherwise.
fn menu_entries(page: &MenuPage) -> Vec<(usize, String)> {
    page.items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_default() && !(page.is_locked() && item.hidden))
        .map(|(index, item)| {
            let mut label = commons::item_label(index, item, page.cancel_button == Some(index));
            if item.hidden {
                label.push_str(" (hidden)");
            }
            (index, label)
        })
        .collect()
}

/// A menu with nothing to offer goes back to its parent. Returns `false` at the
/// root, where the loop ends.
fn leave_empty_menu<S: Spawner>(session: &mut Session<S>) -> bool {
    println!("Menu '{}' has no items.", session.page().file_name.display());
    session.back()
}

fn prompt<S: Spawner>(session: &Session<S>) -> String {
    let page = session.page();
    let title = if page.title.is_empty() {
        page.file_name.display().to_string()
    } else {
        page.title.clone()
    };
    let depth = session.history().count();
    if depth == 0 {
        title
    } else {
        format!("{} {}", title, format!("(depth {depth})").dimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::menu_store,
        models::{ItemAttribute, MenuItem},
        system::launcher::{LaunchCoordinator, tests::RecordingSpawner},
    };
    use std::path::Path;

    fn open_session(root: &Path) -> Session<RecordingSpawner> {
        Session::with_launcher(
            menu_store::load(root),
            LaunchCoordinator::new(RecordingSpawner::default()),
        )
    }

    fn titled(title: &str, hidden: bool) -> MenuItem {
        MenuItem {
            title: title.to_string(),
            hidden,
            ..Default::default()
        }
    }

    #[test]
    fn test_hidden_items_are_shown_on_unlocked_pages() {
        // --- Setup ---
        let mut page = MenuPage::new("m.toml");
        page.set_item(0, titled("Shown", false)).unwrap();
        page.set_item(2, titled("Secret", true)).unwrap();

        // --- Execute ---
        let entries = menu_entries(&page);

        // --- Assert ---
        let slots: Vec<usize> = entries.iter().map(|(index, _)| *index).collect();
        assert_eq!(slots, vec![0, 2]);
        assert!(!entries[0].1.contains("(hidden)"));
        assert!(entries[1].1.ends_with("Secret (hidden)"));
    }

    #[test]
    fn test_hidden_items_are_left_out_on_locked_pages() {
        // --- Setup ---
        let mut page = MenuPage::new("m.toml");
        page.set_item(0, titled("Shown", false)).unwrap();
        page.set_item(2, titled("Secret", true)).unwrap();
        page.set_lock_password("secret");

        // --- Execute ---
        let slots: Vec<usize> = menu_entries(&page).iter().map(|(index, _)| *index).collect();

        // --- Assert ---
        assert_eq!(slots, vec![0]);
    }

    #[test]
    fn test_empty_submenu_goes_back_and_empty_root_ends() {
        // --- Setup ---
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root.toml");
        let mut page = MenuPage::new(&root);
        page.set_item(
            0,
            MenuItem {
                title: "Nowhere".to_string(),
                command: dir.path().join("missing.toml").display().to_string(),
                attribute: ItemAttribute::OpenNextMenu,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(menu_store::save(&mut page));
        let mut session = open_session(&root);
        session.select(0).unwrap();
        assert!(menu_entries(session.page()).is_empty());

        // --- Execute & Assert ---
        assert!(leave_empty_menu(&mut session));
        assert_eq!(session.page().file_name, root);
        assert!(session.history().is_root());
        assert_eq!(menu_entries(session.page()).len(), 1);

        let mut empty_root = open_session(&dir.path().join("empty.toml"));
        assert!(!leave_empty_menu(&mut empty_root));
    }
}
