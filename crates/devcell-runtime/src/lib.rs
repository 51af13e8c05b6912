//! Execution layer for devcell.
//!
//! Commands for the container runtime are modelled as argument vectors
//! (`RuntimeCommand`) and run through the `CommandExecutor` trait. The crate
//! ships a process-backed executor, a dry-run executor that only reports what
//! it would run, a recording executor for tests, and a `PATH` check for the
//! runtime binary itself.

pub mod command;
pub mod executor;
pub mod mock;
pub mod prereq;

pub use command::RuntimeCommand;
pub use executor::{CommandExecutor, DryRunExecutor, ExecutionResult, ProcessExecutor};
pub use mock::{Invocation, RecordingExecutor};
pub use prereq::{check_runtime, format_missing, MissingPrereq};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("command failed ({}): {command}", describe_exit(*exit_code))]
    CommandFailed {
        command: RuntimeCommand,
        exit_code: Option<i32>,
    },
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: RuntimeCommand,
        #[source]
        source: std::io::Error,
    },
}

/// Human-readable form of a process exit code.
pub fn describe_exit(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_owned(),
    }
}
