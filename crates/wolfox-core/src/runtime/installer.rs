//! Package manager invocation: manifest initialization and dependency installation

use super::command::CommandRunner;
use crate::config::PackageManager;
use crate::error::Result;
use crate::kind::DependencySet;
use std::path::Path;
use tracing::info;

/// Installs dependencies into a project folder through a package manager
pub struct DependencyInstaller<'a, R: CommandRunner> {
    runner: &'a R,
    package_manager: PackageManager,
}

impl<'a, R: CommandRunner> DependencyInstaller<'a, R> {
    pub fn new(runner: &'a R, package_manager: PackageManager) -> Self {
        Self {
            runner,
            package_manager,
        }
    }

    /// Create a default manifest in `project_dir`
    pub async fn init_manifest(&self, project_dir: &Path) -> Result<()> {
        let command = self.package_manager.init_command();
        info!("Running {}", command);
        self.runner.run(&command, project_dir).await
    }

    /// Add the runtime dependencies, then the development dependencies.
    ///
    /// Each list is passed in a single invocation. A failing invocation is
    /// returned as is, without retrying.
    pub async fn install_dependencies(&self, set: &DependencySet, project_dir: &Path) -> Result<()> {
        for command in self.package_manager.install_commands(set) {
            info!("Running {}", command);
            self.runner.run(&command, project_dir).await?;
        }
        Ok(())
    }
}
