//! Scaffolding settings resolved from flags, environment and defaults

use super::package_manager::PackageManager;
use crate::kind::ProjectKind;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the templates directory
pub const TEMPLATE_DIR_ENV: &str = "WOLFOX_TEMPLATE_DIR";

/// Environment variable overriding the package manager
pub const PACKAGE_MANAGER_ENV: &str = "WOLFOX_PACKAGE_MANAGER";

/// Environment variable overriding the subprocess timeout, in seconds (0 disables it)
pub const COMMAND_TIMEOUT_ENV: &str = "WOLFOX_COMMAND_TIMEOUT";

/// Default subprocess timeout (10 minutes, dependency installs can be slow)
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

/// Templates next to the installed executable, falling back to the ones in the source tree
pub fn default_template_root() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    template_root_near(exe_dir.as_deref()).unwrap_or_else(bundled_template_root)
}

/// `<exe_dir>/templates`, if it exists
pub fn template_root_near(exe_dir: Option<&Path>) -> Option<PathBuf> {
    exe_dir
        .map(|dir| dir.join("templates"))
        .filter(|root| root.is_dir())
}

/// Templates in the workspace this crate was built from
pub fn bundled_template_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("templates")
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub template_dir: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub package_manager: Option<PackageManager>,
    /// Timeout in seconds, 0 disables it
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
}

/// Everything a project builder needs besides the project request itself
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding one template root per project kind
    pub template_root: PathBuf,
    /// Directory in which the project folders are created
    pub base_dir: PathBuf,
    pub package_manager: PackageManager,
    /// Upper bound for each external command, `None` waits forever
    pub command_timeout: Option<Duration>,
    /// Show progress and inherit external command output
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_root: default_template_root(),
            base_dir: PathBuf::from("."),
            package_manager: PackageManager::default(),
            command_timeout: Some(DEFAULT_COMMAND_TIMEOUT),
            verbose: false,
        }
    }
}

impl Settings {
    /// Resolve settings from overrides and the process environment
    pub fn resolve(overrides: SettingsOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve settings using `env` to look up environment variables
    pub fn resolve_with<F>(overrides: SettingsOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let template_root = overrides
            .template_dir
            .or_else(|| env(TEMPLATE_DIR_ENV).map(PathBuf::from))
            .unwrap_or(defaults.template_root);

        let base_dir = match overrides.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let package_manager = match overrides.package_manager {
            Some(pm) => pm,
            None => match env(PACKAGE_MANAGER_ENV) {
                Some(value) => value
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!("Invalid {}: {}", PACKAGE_MANAGER_ENV, e))?,
                None => defaults.package_manager,
            },
        };

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => Some(secs),
            None => env(COMMAND_TIMEOUT_ENV)
                .map(|value| {
                    value.trim().parse::<u64>().with_context(|| {
                        format!(
                            "Invalid {}: '{}' is not a number of seconds",
                            COMMAND_TIMEOUT_ENV, value
                        )
                    })
                })
                .transpose()?,
        };
        let command_timeout = match timeout_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.command_timeout,
        };

        Ok(Self {
            template_root,
            base_dir,
            package_manager,
            command_timeout,
            verbose: overrides.verbose,
        })
    }

    /// Template root of a project kind
    pub fn template_dir(&self, kind: ProjectKind) -> PathBuf {
        self.template_root.join(kind.template_dir_name())
    }

    /// Folder a project of `kind` named `name` is created in
    pub fn project_dir(&self, kind: ProjectKind, name: &str) -> PathBuf {
        self.base_dir.join(kind.folder_name(name))
    }
}
