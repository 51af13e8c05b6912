use crate::compose::{build_command, remove_command, run_command};
use crate::layout::ProjectLayout;
use crate::LifecycleError;
use devcell_config::EnvConfig;
use devcell_runtime::{CommandExecutor, ProcessExecutor, RuntimeError};
use tracing::{debug, info};

/// Build, start and stop operations for one configured environment.
///
/// Every operation composes its commands fresh from the configuration and
/// runs them through the executor; nothing is cached between calls, so the
/// operations can be repeated or reordered freely.
pub struct Lifecycle<E = ProcessExecutor> {
    config: EnvConfig,
    layout: ProjectLayout,
    executor: E,
}

impl<E: CommandExecutor> Lifecycle<E> {
    pub fn new(config: EnvConfig, layout: ProjectLayout, executor: E) -> Self {
        debug!("script directory: {}", layout.script_dir().display());
        debug!("project root: {}", layout.project_root().display());
        Self {
            config,
            layout,
            executor,
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Build the image tagged `image_name` from the descriptor directory.
    ///
    /// The descriptor is checked before the runtime is invoked, so a missing
    /// `Dockerfile` never costs a runtime call.
    pub fn build_image(&self) -> Result<(), LifecycleError> {
        let image = self.config.image_name();
        info!("building image {image}");

        let descriptor = self.layout.descriptor_path(&self.config);
        if !descriptor.is_file() {
            return Err(LifecycleError::DescriptorNotFound { path: descriptor });
        }

        let command = build_command(&self.config, &self.layout);
        let descriptor_dir = self.layout.descriptor_dir(&self.config);
        match self.executor.execute(&command, Some(&descriptor_dir), false) {
            Ok(_) => {}
            Err(RuntimeError::CommandFailed { command, exit_code }) => {
                return Err(LifecycleError::BuildFailed { command, exit_code });
            }
            Err(e) => return Err(e.into()),
        }

        info!("built image {image}");
        Ok(())
    }

    /// Replace any container called `container_name` with a fresh one.
    pub fn start_container(&self) -> Result<(), LifecycleError> {
        let container = self.config.container_name();
        info!("starting container {container}");

        debug!("removing existing container if present");
        self.remove_tolerant();

        let command = run_command(&self.config, &self.layout);
        match self.executor.execute(&command, None, false) {
            Ok(_) => {}
            Err(RuntimeError::CommandFailed { command, exit_code }) => {
                return Err(LifecycleError::StartFailed { command, exit_code });
            }
            Err(e) => return Err(e.into()),
        }

        info!("started container {container}");
        Ok(())
    }

    /// Ensure no container called `container_name` exists.
    ///
    /// Removal failures are ignored: a container that was never started is
    /// already stopped.
    pub fn stop_container(&self) {
        let container = self.config.container_name();
        info!("stopping container {container}");
        self.remove_tolerant();
        info!("container {container} stopped");
    }

    /// Build the image, then start the container. Stops at the first failure
    /// without undoing earlier steps.
    pub fn setup_environment(&self) -> Result<(), LifecycleError> {
        info!("setting up environment");
        self.build_image()?;
        self.start_container()?;
        info!("environment setup complete");
        Ok(())
    }

    fn remove_tolerant(&self) {
        let command = remove_command(&self.config);
        match self.executor.execute(&command, None, true) {
            Ok(result) if !result.success() => {
                debug!("ignoring removal exit status: {result:?}");
            }
            Ok(_) => {}
            Err(e) => debug!("ignoring removal failure: {e}"),
        }
    }
}
