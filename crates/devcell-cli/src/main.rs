mod commands;

use clap::{CommandFactory, Parser};
use commands::{Operations, EXIT_CONFIG_ERROR, EXIT_FAILURE};
use devcell_config::{default_path, ConfigOverrides};
use devcell_core::{Lifecycle, ProjectLayout};
use devcell_runtime::{CommandExecutor, DryRunExecutor, ProcessExecutor};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "devcell",
    version,
    about = "Build and run a containerized development environment",
    after_help = "Examples:
  devcell --build                       Build the image
  devcell --start                       Start (or replace) the container
  devcell --up                          Build the image and start the container
  devcell --stop                        Stop and remove the container
  devcell --build --image astra:dev     Build with a custom tag
  devcell --config custom.json --up     Use a custom configuration file"
)]
struct Cli {
    /// Build the image.
    #[arg(long, default_value_t = false)]
    build: bool,

    /// Start the container, replacing any existing one.
    #[arg(long, default_value_t = false)]
    start: bool,

    /// Stop and remove the container.
    #[arg(long, default_value_t = false)]
    stop: bool,

    /// Build the image and start the container.
    #[arg(long, default_value_t = false)]
    up: bool,

    /// Path to the configuration file (default: <script-dir>/config.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image tag, overriding `image_name` from the configuration.
    #[arg(long)]
    image: Option<String>,

    /// Network mode, overriding `network_mode` from the configuration.
    #[arg(long, value_parser = ["host", "bridge"])]
    network: Option<String>,

    /// Container runtime executable, overriding `runtime` from the configuration.
    #[arg(long)]
    runtime: Option<String>,

    /// Directory holding the build descriptor; its parent is mounted into the container.
    #[arg(long, env = "DEVCELL_SCRIPT_DIR", default_value = ".")]
    script_dir: PathBuf,

    /// Print runtime commands instead of executing them.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let ops = Operations::from_flags(cli.build, cli.start, cli.stop, cli.up);
    if ops.is_empty() {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::from(EXIT_FAILURE);
    }

    let layout = match ProjectLayout::discover(&cli.script_dir) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!(
                "error: script directory {}: {e}",
                cli.script_dir.display()
            );
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let config = match devcell_config::load(
        cli.config.as_deref(),
        &default_path(layout.script_dir()),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DEVCELL_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(commands::log_directive(
                    cli.verbose,
                    config.log_level(),
                ))
            }),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = config.with_overrides(&ConfigOverrides {
        image_name: cli.image,
        network_mode: cli.network,
        runtime: cli.runtime,
    });

    info!("devcell initialized");
    info!("image: {}", config.image_name());
    info!("container: {}", config.container_name());
    info!("network: {}", config.network_mode());

    if !cli.dry_run && std::env::var("DEVCELL_SKIP_PREREQS").as_deref() != Ok("1") {
        if let Some(missing) = devcell_runtime::check_runtime(config.runtime()) {
            eprintln!("error: {}", devcell_runtime::format_missing(&[missing]));
            return ExitCode::from(EXIT_FAILURE);
        }
    }

    let executor: Box<dyn CommandExecutor> = if cli.dry_run {
        Box::new(DryRunExecutor::new())
    } else {
        Box::new(ProcessExecutor::new())
    };
    let lifecycle = Lifecycle::new(config, layout, executor);

    match commands::run(&lifecycle, ops) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
