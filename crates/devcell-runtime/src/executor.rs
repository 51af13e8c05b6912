use crate::command::RuntimeCommand;
use crate::{describe_exit, RuntimeError};
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Outcome of one command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// `None` when the process was killed by a signal, or could not be
    /// spawned on a tolerant invocation.
    pub exit_code: Option<i32>,
}

impl ExecutionResult {
    pub fn success(self) -> bool {
        self.exit_code == Some(0)
    }
}

pub trait CommandExecutor {
    /// Run `command` to completion.
    ///
    /// With `tolerate_failure` unset, a non-zero exit is returned as
    /// [`RuntimeError::CommandFailed`]. With it set, the result is returned
    /// whatever the exit status.
    fn execute(
        &self,
        command: &RuntimeCommand,
        working_dir: Option<&Path>,
        tolerate_failure: bool,
    ) -> Result<ExecutionResult, RuntimeError>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn execute(
        &self,
        command: &RuntimeCommand,
        working_dir: Option<&Path>,
        tolerate_failure: bool,
    ) -> Result<ExecutionResult, RuntimeError> {
        (**self).execute(command, working_dir, tolerate_failure)
    }
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for Box<T> {
    fn execute(
        &self,
        command: &RuntimeCommand,
        working_dir: Option<&Path>,
        tolerate_failure: bool,
    ) -> Result<ExecutionResult, RuntimeError> {
        (**self).execute(command, working_dir, tolerate_failure)
    }
}

/// Runs commands as child processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(
        &self,
        command: &RuntimeCommand,
        working_dir: Option<&Path>,
        tolerate_failure: bool,
    ) -> Result<ExecutionResult, RuntimeError> {
        debug!("executing: {command}");
        let mut cmd = Command::new(command.program());
        cmd.args(command.get_args());
        if let Some(dir) = working_dir {
            debug!("working directory: {}", dir.display());
            cmd.current_dir(dir);
        }

        let status = match cmd.status() {
            Ok(status) => status,
            Err(e) if tolerate_failure => {
                warn!("could not run {command}: {e}");
                return Ok(ExecutionResult { exit_code: None });
            }
            Err(e) => {
                return Err(RuntimeError::Spawn {
                    command: command.clone(),
                    source: e,
                })
            }
        };

        let result = ExecutionResult {
            exit_code: status.code(),
        };
        debug!("command completed with {}", describe_exit(result.exit_code));

        if !result.success() && !tolerate_failure {
            return Err(RuntimeError::CommandFailed {
                command: command.clone(),
                exit_code: result.exit_code,
            });
        }
        Ok(result)
    }
}

/// Prints each command instead of running it and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl DryRunExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for DryRunExecutor {
    fn execute(
        &self,
        command: &RuntimeCommand,
        working_dir: Option<&Path>,
        _tolerate_failure: bool,
    ) -> Result<ExecutionResult, RuntimeError> {
        match working_dir {
            Some(dir) => println!("[dry-run] (cd {}) {command}", dir.display()),
            None => println!("[dry-run] {command}"),
        }
        Ok(ExecutionResult { exit_code: Some(0) })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> RuntimeCommand {
        RuntimeCommand::new("sh").args(["-c", script])
    }

    #[test]
    fn zero_exit_is_success() {
        let result = ProcessExecutor::new().execute(&sh("exit 0"), None, false).unwrap();
        assert!(result.success());
        assert_eq!(result.exit_code, Some(0));
    }

    #[test]
    fn non_zero_exit_fails_when_not_tolerated() {
        let err = ProcessExecutor::new()
            .execute(&sh("exit 3"), None, false)
            .unwrap_err();
        match err {
            RuntimeError::CommandFailed { command, exit_code } => {
                assert_eq!(exit_code, Some(3));
                assert_eq!(command.program(), "sh");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_zero_exit_is_returned_when_tolerated() {
        let result = ProcessExecutor::new().execute(&sh("exit 7"), None, true).unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code, Some(7));
    }

    #[test]
    fn working_directory_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        ProcessExecutor::new()
            .execute(&sh("touch marker"), Some(dir.path()), false)
            .unwrap();
        assert!(dir.path().join("marker").exists());
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let cmd = RuntimeCommand::new("devcell-definitely-not-installed").arg("rm");
        let err = ProcessExecutor::new().execute(&cmd, None, false).unwrap_err();
        assert!(matches!(err, RuntimeError::Spawn { .. }));
    }

    #[test]
    fn missing_program_is_swallowed_when_tolerated() {
        let cmd = RuntimeCommand::new("devcell-definitely-not-installed").arg("rm");
        let result = ProcessExecutor::new().execute(&cmd, None, true).unwrap();
        assert_eq!(result.exit_code, None);
    }

    #[test]
    fn arguments_are_not_shell_interpreted() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = RuntimeCommand::new("touch").arg("a; touch b");
        ProcessExecutor::new()
            .execute(&cmd, Some(dir.path()), false)
            .unwrap();
        assert!(dir.path().join("a; touch b").exists());
        assert!(!dir.path().join("b").exists());
    }

    #[test]
    fn dry_run_never_spawns() {
        let cmd = RuntimeCommand::new("devcell-definitely-not-installed").arg("build");
        let result = DryRunExecutor::new().execute(&cmd, None, false).unwrap();
        assert!(result.success());
    }

    #[test]
    fn executor_works_through_references() {
        let exec = ProcessExecutor::new();
        let by_ref: &dyn CommandExecutor = &exec;
        assert!(by_ref.execute(&sh("true"), None, false).unwrap().success());
        let boxed: Box<dyn CommandExecutor> = Box::new(exec);
        assert!(boxed.execute(&sh("true"), None, false).unwrap().success());
    }
}
