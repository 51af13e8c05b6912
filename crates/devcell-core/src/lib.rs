//! Lifecycle management for devcell environments.
//!
//! This crate ties a validated `EnvConfig` to a `ProjectLayout` and a
//! `CommandExecutor`: it composes the runtime invocations for image build,
//! container start, and container removal, runs them, and classifies failures
//! into `LifecycleError`. No state is kept between calls; the container
//! runtime is the only source of truth.

pub mod compose;
pub mod layout;
pub mod lifecycle;

pub use compose::{build_command, remove_command, run_command, KEEPALIVE_COMMAND};
pub use layout::{ProjectLayout, DESCRIPTOR_FILE};
pub use lifecycle::Lifecycle;

use devcell_runtime::{describe_exit, RuntimeCommand, RuntimeError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("build descriptor not found: {}", path.display())]
    DescriptorNotFound { path: PathBuf },
    #[error("image build failed ({}): {command}", describe_exit(*exit_code))]
    BuildFailed {
        command: RuntimeCommand,
        exit_code: Option<i32>,
    },
    #[error("container start failed ({}): {command}", describe_exit(*exit_code))]
    StartFailed {
        command: RuntimeCommand,
        exit_code: Option<i32>,
    },
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}
