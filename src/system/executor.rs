// src/system/executor.rs

//! Detached process spawning with a default-application fallback.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Stdio};
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Why a program could not be started.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The option string has unbalanced quotes.
    #[error("Arguments could not be parsed: {0}")]
    ArgumentParse(String),
    /// The program name is blank.
    #[error("No program specified to launch.")]
    EmptyProgram,
    /// Neither a file nor a program on `PATH`.
    #[error("'{0}' was not found.")]
    NotFound(String),
    /// The OS refused to start the program.
    #[error("'{0}' could not be launched: {1}")]
    SpawnFailed(String, std::io::Error),
}

/// Everything needed to start one external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest<'a> {
    /// Program or document to open.
    pub program: &'a str,
    /// Raw option string; split into arguments by the spawner.
    pub arguments: &'a str,
    /// Directory the child starts in. `None` inherits the launcher's.
    pub working_dir: Option<&'a Path>,
}

/// Starts external programs without waiting for them.
pub trait Spawner {
    /// Starts the requested program and returns once it is running.
    fn spawn(&self, request: &SpawnRequest<'_>) -> Result<(), ExecutionError>;
}

/// Starts programs the way a desktop shell does: executables run directly, any
/// other existing file is handed to the platform's default-application opener.
#[derive(Debug, Clone, Default)]
pub struct ShellSpawner {
    opener: Option<String>,
}

impl ShellSpawner {
    /// `opener` replaces the platform default (`cmd /C start`, `open`, `xdg-open`).
    pub fn new(opener: Option<String>) -> Self {
        Self { opener }
    }

    fn open_with_default_handler(
        &self,
        target: &Path,
        args: &[String],
        working_dir: Option<&Path>,
    ) -> Result<(), ExecutionError> {
        let mut command = match &self.opener {
            Some(opener) => StdCommand::new(opener),
            None if cfg!(target_os = "windows") => {
                let mut cmd = StdCommand::new("cmd");
                // The empty string is the window title `start` expects before the target.
                cmd.args(["/C", "start", ""]);
                cmd
            }
            None if cfg!(target_os = "macos") => StdCommand::new("open"),
            None => StdCommand::new("xdg-open"),
        };
        command.arg(target);
        if self.opener.is_none() && cfg!(target_os = "macos") && !args.is_empty() {
            command.arg("--args");
        }
        command.args(args);
        if let Some(dir) = working_dir {
            command.current_dir(dunce::simplified(dir));
        }

        log::debug!("Handing '{}' to the default handler.", target.display());
        detach(&mut command)
            .map(|_reaper| ())
            .map_err(|e| ExecutionError::SpawnFailed(target.display().to_string(), e))
    }
}

impl Spawner for ShellSpawner {
    fn spawn(&self, request: &SpawnRequest<'_>) -> Result<(), ExecutionError> {
        let program = request.program.trim();
        if program.is_empty() {
            return Err(ExecutionError::EmptyProgram);
        }

        let arguments = request.arguments.trim();
        let args = if arguments.is_empty() {
            Vec::new()
        } else {
            shlex::split(arguments)
                .ok_or_else(|| ExecutionError::ArgumentParse(arguments.to_string()))?
        };

        // A bare name is searched on PATH by the OS, so an existing file in the
        // current directory is addressed explicitly.
        let local = PathBuf::from(program);
        let target = if local.is_file() && local.components().count() == 1 {
            Path::new(".").join(&local)
        } else {
            local
        };

        let mut command = StdCommand::new(&target);
        command.args(&args);
        if let Some(dir) = request.working_dir {
            command.current_dir(dunce::simplified(dir));
        }

        // Direct spawn first. A file that exists but cannot be executed (a document,
        // a script without the executable bit) goes to the default handler instead.
        match detach(&mut command) {
            Ok(_reaper) => {
                log::debug!("Launched '{}' with {:?}.", target.display(), args);
                Ok(())
            }
            Err(e)
                if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied)
                    && target.exists() =>
            {
                log::debug!(
                    "'{}' is not directly executable ({}). Retrying with the default handler.",
                    target.display(),
                    e
                );
                self.open_with_default_handler(&target, &args, request.working_dir)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ExecutionError::NotFound(program.to_string()))
            }
            Err(e) => Err(ExecutionError::SpawnFailed(program.to_string(), e)),
        }
    }
}

/// Spawns without waiting for the child or keeping its standard handles.
///
/// The child is waited on by a background thread so that it is reaped when it
/// exits. Returns that thread's handle, or `None` if no thread could be started,
/// in which case the child is left to the OS.
fn detach(command: &mut StdCommand) -> std::io::Result<Option<JoinHandle<()>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let pid = child.id();
    let reaper = thread::Builder::new()
        .name("himenu-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => log::debug!("Child {} exited with {}.", pid, status),
            Err(e) => log::debug!("Could not wait for child {}: {}", pid, e),
        });
    match reaper {
        Ok(handle) => Ok(Some(handle)),
        Err(e) => {
            log::warn!("Child {} will not be reaped: {}", pid, e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_program_is_rejected() {
        let spawner = ShellSpawner::default();
        let request = SpawnRequest {
            program: "   ",
            arguments: "",
            working_dir: None,
        };
        assert!(matches!(
            spawner.spawn(&request),
            Err(ExecutionError::EmptyProgram)
        ));
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let spawner = ShellSpawner::default();
        let request = SpawnRequest {
            program: "himenu-test-no-such-program-4f1c",
            arguments: "-x",
            working_dir: None,
        };
        assert!(matches!(
            spawner.spawn(&request),
            Err(ExecutionError::NotFound(_))
        ));
    }

    #[test]
    fn test_unbalanced_quotes_fail_before_spawning() {
        let spawner = ShellSpawner::default();
        let request = SpawnRequest {
            program: "himenu-test-no-such-program-4f1c",
            arguments: "\"unterminated",
            working_dir: None,
        };
        assert!(matches!(
            spawner.spawn(&request),
            Err(ExecutionError::ArgumentParse(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_launches_program_from_path() {
        let spawner = ShellSpawner::default();
        let request = SpawnRequest {
            program: "true",
            arguments: "ignored 'quoted arg'",
            working_dir: Some(Path::new("/")),
        };
        assert!(spawner.spawn(&request).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_detached_child_is_reaped() {
        // --- Setup ---
        let mut command = StdCommand::new("true");

        // --- Execute ---
        let reaper = detach(&mut command).unwrap().unwrap();

        // --- Assert ---
        // The reaper only finishes once `wait` has collected the exit status.
        assert!(reaper.join().is_ok());
    }
}
