// src/cli/handlers/exec.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use super::commons;
use crate::{
    core::session::{HostAction, Session},
    system::launcher::{LaunchCoordinator, LaunchResult},
};

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    about = "Selects one item of a menu, as if it had been clicked."
)]
struct ExecArgs {
    /// Menu file containing the item.
    menu: PathBuf,
    /// 1-based item index.
    index: String,
}

/// The main handler for the `exec` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let exec_args = ExecArgs::try_parse_from(&args)?;
    let index = commons::parse_index(&exec_args.index)?;
    let page = commons::load_existing(&exec_args.menu)?;
    let spawner = commons::spawner_from_config()?;

    let mut session = Session::with_launcher(page, LaunchCoordinator::new(spawner));
    let outcome = session.select(index).ok_or_else(|| {
        anyhow!(
            "Menu '{}' has no item {}.",
            exec_args.menu.display(),
            exec_args.index
        )
    })?;

    if let Some(launch) = &outcome.launch {
        match launch.result {
            LaunchResult::Success => println!("{} Launched.", "✔".green()),
            LaunchResult::PathChangeError => {
                return Err(anyhow!(
                    "Could not change to directory '{}'.",
                    launch.message
                ));
            }
            LaunchResult::LaunchError => {
                return Err(anyhow!("Could not launch '{}'.", launch.message));
            }
        }
    } else {
        println!(
            "{} Now at '{}' (depth {}).",
            "→".cyan(),
            session.page().file_name.display(),
            session.history().count()
        );
    }

    if outcome.host_action != HostAction::Continue {
        log::info!("After-action: {:?}", outcome.host_action);
    }
    Ok(())
}
