use devcell_config::EnvConfig;
use std::path::{Path, PathBuf};

/// Name of the build descriptor expected inside the descriptor directory.
pub const DESCRIPTOR_FILE: &str = "Dockerfile";

/// Host-side directories an environment is built from.
///
/// `script_dir` holds the build descriptor and the default configuration
/// document; its parent, `project_root`, is the build context and the tree
/// bind-mounted into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    script_dir: PathBuf,
    project_root: PathBuf,
}

impl ProjectLayout {
    pub fn new(script_dir: impl Into<PathBuf>) -> Self {
        let script_dir: PathBuf = script_dir.into();
        let project_root = script_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| script_dir.clone(), Path::to_path_buf);
        Self {
            script_dir,
            project_root,
        }
    }

    /// Like [`ProjectLayout::new`], but resolves `script_dir` to an absolute,
    /// symlink-free path first. Fails if the directory does not exist.
    pub fn discover(script_dir: &Path) -> std::io::Result<Self> {
        Ok(Self::new(std::fs::canonicalize(script_dir)?))
    }

    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Directory that must contain the build descriptor.
    pub fn descriptor_dir(&self, config: &EnvConfig) -> PathBuf {
        self.script_dir.join(config.dockerfile_path())
    }

    pub fn descriptor_path(&self, config: &EnvConfig) -> PathBuf {
        self.descriptor_dir(config).join(DESCRIPTOR_FILE)
    }
}
