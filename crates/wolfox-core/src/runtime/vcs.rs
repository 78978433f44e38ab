//! Version control initialization

use super::command::{CommandRunner, ExternalCommand};
use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Version control program
pub const VCS_PROGRAM: &str = "git";

/// `git init`
pub fn init_command() -> ExternalCommand {
    ExternalCommand::new(VCS_PROGRAM).arg("init")
}

/// Initialize an empty repository in `project_dir`
pub async fn init_repository<R: CommandRunner>(runner: &R, project_dir: &Path) -> Result<()> {
    info!("Initializing git repository in {}", project_dir.display());
    runner.run(&init_command(), project_dir).await
}
