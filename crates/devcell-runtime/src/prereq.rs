use std::fmt;
use std::path::Path;

/// A missing prerequisite with actionable install instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPrereq {
    pub name: String,
    pub purpose: &'static str,
    pub install_hint: String,
}

impl fmt::Display for MissingPrereq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  - {}: {} (install: {})",
            self.name, self.purpose, self.install_hint
        )
    }
}

/// True if `name` resolves to an executable, either as a path or via `PATH`.
pub fn command_exists(name: &str) -> bool {
    which::which(name).is_ok()
}

fn install_hint(runtime: &str) -> String {
    let base = Path::new(runtime)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(runtime);
    match base {
        "docker" => "see https://docs.docker.com/engine/install/ | apt install docker.io | dnf install moby-engine".to_owned(),
        "podman" => {
            "zypper install podman | apt install podman | dnf install podman | pacman -S podman"
                .to_owned()
        }
        other => format!("make sure '{other}' is installed and on PATH"),
    }
}

/// Check that the configured container runtime can be found.
pub fn check_runtime(runtime: &str) -> Option<MissingPrereq> {
    if command_exists(runtime) {
        None
    } else {
        Some(MissingPrereq {
            name: runtime.to_owned(),
            purpose: "building images and managing containers",
            install_hint: install_hint(runtime),
        })
    }
}

/// Format a list of missing prerequisites into a user-friendly error message.
pub fn format_missing(missing: &[MissingPrereq]) -> String {
    use std::fmt::Write as _;
    let mut msg = String::from("missing prerequisites:\n");
    for m in missing {
        let _ = writeln!(msg, "{m}");
    }
    msg.push_str("\ndevcell needs a container runtime to build and start environments.");
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_prereq_display() {
        let m = MissingPrereq {
            name: "docker".to_owned(),
            purpose: "building images",
            install_hint: "apt install docker.io".to_owned(),
        };
        let s = format!("{m}");
        assert!(s.contains("docker"));
        assert!(s.contains("building images"));
        assert!(s.contains("apt install docker.io"));
    }

    #[test]
    fn unknown_runtime_is_reported() {
        let missing = check_runtime("devcell-definitely-not-installed").unwrap();
        assert_eq!(missing.name, "devcell-definitely-not-installed");
        assert!(missing.install_hint.contains("on PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn shell_is_found() {
        assert!(command_exists("sh"));
        assert!(check_runtime("sh").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn explicit_path_is_checked_directly() {
        assert!(command_exists("/bin/sh"));
        let dir = tempfile::tempdir().unwrap();
        assert!(!command_exists(&dir.path().join("absent").to_string_lossy()));
    }

    #[test]
    fn hints_follow_runtime_name() {
        assert!(install_hint("podman").contains("podman"));
        assert!(install_hint("/usr/bin/docker").contains("docker"));
    }

    #[test]
    fn format_missing_produces_readable_output() {
        let items = vec![check_runtime("devcell-definitely-not-installed").unwrap()];
        let output = format_missing(&items);
        assert!(output.contains("missing prerequisites:"));
        assert!(output.contains("devcell-definitely-not-installed"));
    }
}
