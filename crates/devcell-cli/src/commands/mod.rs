use console::Style;
use devcell_config::LogLevel;
use devcell_core::{Lifecycle, LifecycleError};
use devcell_runtime::CommandExecutor;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Lifecycle steps selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Operations {
    pub stop: bool,
    pub build: bool,
    pub start: bool,
}

impl Operations {
    pub fn from_flags(build: bool, start: bool, stop: bool, up: bool) -> Self {
        Self {
            stop,
            build: build || up,
            start: start || up,
        }
    }

    pub fn is_empty(self) -> bool {
        !(self.stop || self.build || self.start)
    }
}

/// `EnvFilter` directive: `--verbose` wins over the configured level.
pub fn log_directive(verbose: bool, configured: LogLevel) -> &'static str {
    if verbose {
        "debug"
    } else {
        configured.filter_directive()
    }
}

pub fn status_ok(msg: &str) {
    eprintln!("{} {msg}", Style::new().green().apply_to("✓"));
}

pub fn status_fail(msg: &str) {
    eprintln!("{} {msg}", Style::new().red().apply_to("✗"));
}

/// Run the selected steps in order: stop, build, start.
pub fn run<E: CommandExecutor>(
    lifecycle: &Lifecycle<E>,
    ops: Operations,
) -> Result<u8, LifecycleError> {
    let config = lifecycle.config();

    if ops.stop {
        lifecycle.stop_container();
        status_ok(&format!("container {} removed", config.container_name()));
    }

    match (ops.build, ops.start) {
        (true, true) => {
            lifecycle
                .setup_environment()
                .inspect_err(|_| status_fail("environment setup failed"))?;
            status_ok(&format!(
                "environment ready: {} running {}",
                config.container_name(),
                config.image_name()
            ));
        }
        (true, false) => {
            lifecycle
                .build_image()
                .inspect_err(|_| status_fail("image build failed"))?;
            status_ok(&format!("built image {}", config.image_name()));
        }
        (false, true) => {
            lifecycle
                .start_container()
                .inspect_err(|_| status_fail("container start failed"))?;
            status_ok(&format!("started container {}", config.container_name()));
        }
        (false, false) => {}
    }

    Ok(EXIT_SUCCESS)
}
