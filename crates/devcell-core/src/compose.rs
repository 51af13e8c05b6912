use crate::layout::ProjectLayout;
use devcell_config::EnvConfig;
use devcell_runtime::RuntimeCommand;

/// Foreground process that keeps a detached container alive for `exec` sessions.
pub const KEEPALIVE_COMMAND: [&str; 3] = ["tail", "-f", "/dev/null"];

/// `<runtime> build [--network=<mode>] -t <image> -f <dockerfile_path> <project_root>`
///
/// `-f` carries `dockerfile_path` (a directory) as written, and the build runs
/// from the descriptor directory. Docker resolves `-f` as a file relative to
/// that directory, so a real engine needs `-f Dockerfile` there instead.
pub fn build_command(config: &EnvConfig, layout: &ProjectLayout) -> RuntimeCommand {
    let mut cmd = RuntimeCommand::new(config.runtime()).arg("build");
    if !config.network_mode().is_empty() {
        cmd = cmd.arg(format!("--network={}", config.network_mode()));
    }
    cmd.args(["-t", config.image_name()])
        .args(["-f", config.dockerfile_path()])
        .arg(layout.project_root().to_string_lossy())
}

/// `<runtime> rm -f <container_name>`
pub fn remove_command(config: &EnvConfig) -> RuntimeCommand {
    RuntimeCommand::new(config.runtime()).args(["rm", "-f", config.container_name()])
}

/// `<runtime> run -d --name <container> --network <mode> -v <root>:<workdir> <image> tail -f /dev/null`
pub fn run_command(config: &EnvConfig, layout: &ProjectLayout) -> RuntimeCommand {
    let mut cmd = RuntimeCommand::new(config.runtime())
        .args(["run", "-d"])
        .args(["--name", config.container_name()]);
    if !config.network_mode().is_empty() {
        cmd = cmd.args(["--network", config.network_mode()]);
    }
    let volume = format!(
        "{}:{}",
        layout.project_root().display(),
        config.container_workdir()
    );
    cmd.args(["-v".to_owned(), volume])
        .arg(config.image_name())
        .args(KEEPALIVE_COMMAND)
}
