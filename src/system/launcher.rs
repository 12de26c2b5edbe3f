// src/system/launcher.rs

//! # Launch Coordinator
//!
//! Turns a menu item's command line into a running program.
//!
//! The command's directory is entered before spawning so that programs relying on
//! their current directory find their files. The process working directory is
//! global state, so every launch in the process is serialized behind one lock,
//! and the original directory is put back by a scope guard on every exit path.

use crate::{
    core::path_resolver,
    models::{ItemAfter, ItemAttribute, MenuItem},
    system::executor::{ExecutionError, ShellSpawner, SpawnRequest, Spawner},
};
use lazy_static::lazy_static;
use scopeguard::ScopeGuard;
use std::{
    env,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use thiserror::Error;

lazy_static! {
    static ref LAUNCH_LOCK: Mutex<()> = Mutex::new(());
}

/// The coarse result reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchResult {
    /// The program was started.
    Success,
    /// The command's directory could not be entered. Nothing was started.
    PathChangeError,
    /// The program could not be started, or the launch failed unexpectedly.
    LaunchError,
}

/// What happened to one launch, as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Success or the kind of failure.
    pub result: LaunchResult,
    /// The directory for `PathChangeError`, the file name or cause for `LaunchError`.
    pub message: String,
    /// The item's after-action. Carried even when the launch failed.
    pub after_action: ItemAfter,
}

/// The detailed cause of a failed launch.
#[derive(Error, Debug)]
pub enum LaunchFailure {
    /// The command's directory could not be entered.
    #[error("Could not change the working directory to '{directory}': {source}")]
    PathChange {
        /// The directory part of the command.
        directory: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The spawner could not start the program.
    #[error("Could not launch '{file_name}': {source}")]
    Spawn {
        /// The file name part of the command.
        file_name: String,
        /// The spawner's error.
        #[source]
        source: ExecutionError,
    },
    /// The item opens a menu or goes back instead.
    #[error("Menu item '{0}' does not launch an application.")]
    NotAnApplication(String),
    /// The command line could not be split or another unexpected failure.
    #[error("{0}")]
    Unexpected(String),
}

impl LaunchFailure {
    /// The coarse result this failure maps to.
    pub fn result(&self) -> LaunchResult {
        match self {
            Self::PathChange { .. } => LaunchResult::PathChangeError,
            Self::Spawn { .. } | Self::NotAnApplication(_) | Self::Unexpected(_) => {
                LaunchResult::LaunchError
            }
        }
    }

    /// The short payload shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::PathChange { directory, .. } => directory.clone(),
            Self::Spawn { file_name, .. } => file_name.clone(),
            Self::NotAnApplication(_) | Self::Unexpected(_) => self.to_string(),
        }
    }
}

/// Restores the launcher's working directory when dropped.
type DirectoryGuard = ScopeGuard<PathBuf, fn(PathBuf)>;

/// Serializes launches and runs each one from its command's directory.
#[derive(Debug, Clone, Default)]
pub struct LaunchCoordinator<S: Spawner = ShellSpawner> {
    spawner: S,
}

impl<S: Spawner> LaunchCoordinator<S> {
    /// A coordinator that starts programs with `spawner`.
    pub fn new(spawner: S) -> Self {
        Self { spawner }
    }

    /// The spawner in use.
    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Launches the program of an `ExecApplication` item. Never fails: problems are
    /// reported in the outcome, together with the item's after-action.
    pub fn launch(&self, item: &MenuItem) -> LaunchOutcome {
        let after_action = item.after;

        let attempt = if item.attribute != ItemAttribute::ExecApplication {
            Err(LaunchFailure::NotAnApplication(item.title.clone()))
        } else if item.command.is_empty() {
            return LaunchOutcome {
                result: LaunchResult::Success,
                message: String::new(),
                after_action,
            };
        } else {
            self.try_launch(&item.command)
        };

        match attempt {
            Ok(()) => LaunchOutcome {
                result: LaunchResult::Success,
                message: String::new(),
                after_action,
            },
            Err(failure) => {
                log::warn!("Launch of '{}' failed: {}", item.command, failure);
                LaunchOutcome {
                    result: failure.result(),
                    message: failure.message(),
                    after_action,
                }
            }
        }
    }

    /// Launches a raw command line.
    ///
    /// # Logic:
    /// 1. Remember the current directory.
    /// 2. Split the command into path token and options, and the token into
    ///    directory and file name.
    /// 3. Enter the directory if it is set and differs (ignoring case) from the
    ///    current one. Failing here returns before anything is started.
    /// 4. Spawn the file name with the trimmed options, in the directory part of
    ///    the file name itself.
    /// 5. Restore the original directory if step 3 changed it, whatever happened.
    pub fn try_launch(&self, command_line: &str) -> Result<(), LaunchFailure> {
        let _lock = LAUNCH_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let original_dir =
            env::current_dir().map_err(|e| LaunchFailure::Unexpected(e.to_string()))?;

        let path_token = path_resolver::path_token(command_line);
        let (directory, file_name) = path_resolver::split_path_and_file(&path_token);
        let (_, options) = path_resolver::split_command_and_options(command_line)
            .map_err(|e| LaunchFailure::Unexpected(e.to_string()))?;

        let _restore = if !directory.is_empty() && !same_directory(&directory, &original_dir) {
            Some(enter_directory(&directory, original_dir)?)
        } else {
            None
        };

        let spawn_dir = Path::new(&file_name)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());
        let request = SpawnRequest {
            program: &file_name,
            arguments: options.trim_end(),
            working_dir: spawn_dir,
        };

        self.spawner
            .spawn(&request)
            .map_err(|source| LaunchFailure::Spawn {
                file_name: file_name.clone(),
                source,
            })
    }
}

fn same_directory(directory: &str, current: &Path) -> bool {
    directory.to_lowercase() == current.to_string_lossy().to_lowercase()
}

fn enter_directory(directory: &str, original: PathBuf) -> Result<DirectoryGuard, LaunchFailure> {
    env::set_current_dir(directory).map_err(|source| LaunchFailure::PathChange {
        directory: directory.to_string(),
        source,
    })?;
    log::debug!(
        "Entered '{}' (was '{}').",
        directory,
        original.display()
    );
    Ok(scopeguard::guard(original, restore_directory as fn(PathBuf)))
}

fn restore_directory(original: PathBuf) {
    if let Err(e) = env::set_current_dir(&original) {
        log::error!(
            "Failed to restore the working directory to '{}': {}",
            original.display(),
            e
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    /// Held by every test that changes or asserts on the process working directory.
    pub(crate) static CWD_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct RecordedSpawn {
        pub(crate) program: String,
        pub(crate) arguments: String,
        pub(crate) working_dir: Option<PathBuf>,
        pub(crate) cwd_at_spawn: PathBuf,
    }

    /// Records spawn requests instead of starting processes.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSpawner {
        pub(crate) calls: RefCell<Vec<RecordedSpawn>>,
        pub(crate) fail: bool,
    }

    impl Spawner for RecordingSpawner {
        fn spawn(&self, request: &SpawnRequest<'_>) -> Result<(), ExecutionError> {
            self.calls.borrow_mut().push(RecordedSpawn {
                program: request.program.to_string(),
                arguments: request.arguments.to_string(),
                working_dir: request.working_dir.map(Path::to_path_buf),
                cwd_at_spawn: env::current_dir().unwrap(),
            });
            if self.fail {
                Err(ExecutionError::NotFound(request.program.to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn exec_item(command: &str, after: ItemAfter) -> MenuItem {
        MenuItem {
            title: "test".to_string(),
            command: command.to_string(),
            after,
            ..Default::default()
        }
    }

    fn canonical(path: &Path) -> PathBuf {
        dunce::canonicalize(path).unwrap()
    }

    /// Runs `body` with the working directory set to a fresh temp dir that holds a
    /// `tools` subdirectory, then puts the test process back where it was.
    fn in_scratch_dir(body: impl FnOnce(&Path)) {
        let _lock = CWD_TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("tools")).unwrap();
        let previous = env::current_dir().unwrap();
        let _back = scopeguard::guard(previous, |p| {
            let _ = env::set_current_dir(p);
        });
        env::set_current_dir(dir.path()).unwrap();
        body(&canonical(dir.path()));
    }

    #[test]
    fn test_empty_command_is_a_successful_no_op() {
        let coordinator = LaunchCoordinator::new(RecordingSpawner::default());
        let outcome = coordinator.launch(&exec_item("", ItemAfter::End));

        assert_eq!(outcome.result, LaunchResult::Success);
        assert_eq!(outcome.after_action, ItemAfter::End);
        assert!(coordinator.spawner().calls.borrow().is_empty());
    }

    #[test]
    fn test_success_restores_working_directory() {
        in_scratch_dir(|scratch| {
            let coordinator = LaunchCoordinator::new(RecordingSpawner::default());

            let outcome = coordinator.launch(&exec_item(r"tools\app.exe -x -y", ItemAfter::Continue));

            assert_eq!(outcome.result, LaunchResult::Success);
            assert_eq!(canonical(&env::current_dir().unwrap()), scratch);

            let calls = coordinator.spawner().calls.borrow();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].program, "app.exe");
            assert_eq!(calls[0].arguments, "-x -y");
            assert_eq!(calls[0].working_dir, None);
            assert_eq!(canonical(&calls[0].cwd_at_spawn), scratch.join("tools"));
        });
    }

    #[test]
    fn test_spawn_failure_restores_working_directory() {
        in_scratch_dir(|scratch| {
            // --- Setup ---
            let coordinator = LaunchCoordinator::new(RecordingSpawner {
                fail: true,
                ..Default::default()
            });

            // --- Execute ---
            let outcome = coordinator.launch(&exec_item(r"tools\missing.exe", ItemAfter::Minimize));

            // --- Assert ---
            assert_eq!(outcome.result, LaunchResult::LaunchError);
            assert_eq!(outcome.message, "missing.exe");
            assert_eq!(outcome.after_action, ItemAfter::Minimize);
            assert_eq!(canonical(&env::current_dir().unwrap()), scratch);
        });
    }

    #[test]
    fn test_missing_directory_is_a_path_change_error() {
        in_scratch_dir(|scratch| {
            // --- Setup ---
            let coordinator = LaunchCoordinator::new(RecordingSpawner::default());

            // --- Execute ---
            let outcome = coordinator.launch(&exec_item(r"nowhere\app.exe", ItemAfter::End));

            // --- Assert ---
            assert_eq!(outcome.result, LaunchResult::PathChangeError);
            assert_eq!(outcome.message, "nowhere");
            assert_eq!(outcome.after_action, ItemAfter::End);
            assert!(coordinator.spawner().calls.borrow().is_empty());
            assert_eq!(canonical(&env::current_dir().unwrap()), scratch);
        });
    }

    #[test]
    fn test_unreachable_program_is_a_launch_error() {
        in_scratch_dir(|scratch| {
            // --- Setup ---
            let coordinator = LaunchCoordinator::new(ShellSpawner::default());

            // --- Execute ---
            let outcome = coordinator.launch(&exec_item(
                r"tools\himenu-no-such-program-91ab --flag",
                ItemAfter::Continue,
            ));

            // --- Assert ---
            assert_eq!(outcome.result, LaunchResult::LaunchError);
            assert_eq!(outcome.message, "himenu-no-such-program-91ab");
            assert_eq!(canonical(&env::current_dir().unwrap()), scratch);
        });
    }

    #[test]
    fn test_lost_option_split_fails_before_spawning() {
        // --- Setup ---
        let coordinator = LaunchCoordinator::new(RecordingSpawner::default());

        // --- Execute ---
        let outcome = coordinator.launch(&exec_item("app.exe/quiet", ItemAfter::Continue));

        // --- Assert ---
        assert_eq!(outcome.result, LaunchResult::LaunchError);
        assert!(outcome.message.contains("app.exe/quiet"));
        assert!(coordinator.spawner().calls.borrow().is_empty());
    }

    #[test]
    fn test_bare_program_keeps_directory_and_trims_arguments() {
        // --- Setup ---
        let _lock = CWD_TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let before = env::current_dir().unwrap();
        let coordinator = LaunchCoordinator::new(RecordingSpawner::default());

        // --- Execute ---
        let outcome = coordinator.launch(&exec_item(r#""viewer" a.txt  b.txt"#, ItemAfter::Continue));

        // --- Assert ---
        assert_eq!(outcome.result, LaunchResult::Success);
        let calls = coordinator.spawner().calls.borrow();
        assert_eq!(calls[0].program, "viewer");
        assert_eq!(calls[0].arguments, "a.txt  b.txt");
        assert_eq!(calls[0].cwd_at_spawn, before);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_non_application_item_is_refused() {
        // --- Setup ---
        let coordinator = LaunchCoordinator::new(RecordingSpawner::default());
        let item = MenuItem {
            title: "Sub".to_string(),
            command: "sub.toml".to_string(),
            attribute: ItemAttribute::OpenNextMenu,
            after: ItemAfter::End,
            ..Default::default()
        };

        // --- Execute ---
        let outcome = coordinator.launch(&item);

        // --- Assert ---
        assert_eq!(outcome.result, LaunchResult::LaunchError);
        assert_eq!(outcome.after_action, ItemAfter::End);
        assert!(coordinator.spawner().calls.borrow().is_empty());
    }

    #[test]
    fn test_same_directory_ignores_case() {
        assert!(same_directory(r"C:\Tools", Path::new(r"c:\tools")));
        assert!(!same_directory(r"C:\Tools", Path::new(r"C:\Other")));
    }
}
