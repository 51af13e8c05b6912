use crate::command::RuntimeCommand;
use crate::executor::{CommandExecutor, ExecutionResult};
use crate::RuntimeError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// A single call captured by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: RuntimeCommand,
    pub working_dir: Option<PathBuf>,
    pub tolerate_failure: bool,
}

/// In-memory executor that records calls and answers with scripted exit codes.
///
/// Exit codes are keyed by runtime subcommand (`build`, `run`, `rm`, ...);
/// anything unscripted exits 0.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    invocations: Mutex<Vec<Invocation>>,
    exit_codes: Mutex<HashMap<String, i32>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exit_code(self, subcommand: &str, code: i32) -> Self {
        self.set_exit_code(subcommand, code);
        self
    }

    pub fn set_exit_code(&self, subcommand: &str, code: i32) {
        self.exit_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(subcommand.to_owned(), code);
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn commands(&self) -> Vec<RuntimeCommand> {
        self.invocations()
            .into_iter()
            .map(|inv| inv.command)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(
        &self,
        command: &RuntimeCommand,
        working_dir: Option<&Path>,
        tolerate_failure: bool,
    ) -> Result<ExecutionResult, RuntimeError> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Invocation {
                command: command.clone(),
                working_dir: working_dir.map(Path::to_path_buf),
                tolerate_failure,
            });

        let code = command
            .subcommand()
            .and_then(|sub| {
                self.exit_codes
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(sub)
                    .copied()
            })
            .unwrap_or(0);

        if code != 0 && !tolerate_failure {
            return Err(RuntimeError::CommandFailed {
                command: command.clone(),
                exit_code: Some(code),
            });
        }
        Ok(ExecutionResult {
            exit_code: Some(code),
        })
    }
}
