//! Project builder: populates one backend or frontend folder
//!
//! Steps run in a fixed order and each one must succeed before the next:
//! create folder, copy `src`, copy `config` (frontend), `git init`,
//! initialize the manifest, install dependencies, fix the manifest, copy
//! static config files. A failure stops the remaining steps of this builder only.

use crate::config::Settings;
use crate::error::{Result, ScaffoldError};
use crate::folder::{create_folder, with_folder, FolderStatus};
use crate::kind::ProjectKind;
use crate::runtime::{vcs, CommandRunner, DependencyInstaller};
use crate::templates::{copy_static_file, copy_template_subtree, fix_manifest, TemplateSubtree};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// One step of a project build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    CreateFolder,
    CopySubtree(TemplateSubtree),
    InitRepository,
    InitManifest,
    InstallDependencies,
    FixManifest,
    CopyStaticFile(&'static str),
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStep::CreateFolder => write!(f, "creating the project folder"),
            BuildStep::CopySubtree(subtree) => write!(f, "copying the {} template", subtree),
            BuildStep::InitRepository => write!(f, "initializing the git repository"),
            BuildStep::InitManifest => write!(f, "initializing package.json"),
            BuildStep::InstallDependencies => write!(f, "installing dependencies"),
            BuildStep::FixManifest => write!(f, "updating package.json"),
            BuildStep::CopyStaticFile(name) => write!(f, "copying {}", name),
        }
    }
}

/// How a project build ended
#[derive(Debug)]
pub enum BuildOutcome {
    Completed {
        kind: ProjectKind,
        path: PathBuf,
    },
    /// The folder already existed and was left untouched
    Skipped {
        kind: ProjectKind,
        path: PathBuf,
    },
    Failed {
        kind: ProjectKind,
        path: PathBuf,
        step: BuildStep,
        error: ScaffoldError,
    },
}

impl BuildOutcome {
    pub fn kind(&self) -> ProjectKind {
        match self {
            BuildOutcome::Completed { kind, .. }
            | BuildOutcome::Skipped { kind, .. }
            | BuildOutcome::Failed { kind, .. } => *kind,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            BuildOutcome::Completed { path, .. }
            | BuildOutcome::Skipped { path, .. }
            | BuildOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, BuildOutcome::Failed { .. })
    }
}

/// A failed step and the error it produced
type StepResult<T> = std::result::Result<T, (BuildStep, ScaffoldError)>;

fn at<T>(step: BuildStep, result: Result<T>) -> StepResult<T> {
    result.map_err(|e| (step, e))
}

/// Builds projects of one kind
pub struct ProjectBuilder<'a, R: CommandRunner> {
    kind: ProjectKind,
    settings: &'a Settings,
    runner: &'a R,
}

impl<'a, R: CommandRunner> ProjectBuilder<'a, R> {
    pub fn new(kind: ProjectKind, settings: &'a Settings, runner: &'a R) -> Self {
        Self {
            kind,
            settings,
            runner,
        }
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// Create and populate the folder for project `name`
    pub async fn build(&self, name: &str, overwrite: bool) -> BuildOutcome {
        let kind = self.kind;
        let path = self.settings.project_dir(kind, name);
        info!("Creating {} project in {}", kind, path.display());

        match create_folder(&path, overwrite).await {
            Ok(FolderStatus::Created) => {}
            Ok(FolderStatus::AlreadyExists) => return BuildOutcome::Skipped { kind, path },
            Err(error) => {
                return BuildOutcome::Failed {
                    kind,
                    path,
                    step: BuildStep::CreateFolder,
                    error,
                }
            }
        }

        match with_folder(&path, |dir| async move { self.populate(&dir).await }).await {
            Ok(()) => {
                info!("{} project ready", kind);
                BuildOutcome::Completed { kind, path }
            }
            Err((step, error)) => BuildOutcome::Failed {
                kind,
                path,
                step,
                error,
            },
        }
    }

    async fn populate(&self, dir: &Path) -> StepResult<()> {
        let template_root = self.settings.template_dir(self.kind);

        let mut subtrees = vec![TemplateSubtree::Src];
        if self.kind.has_config_tree() {
            subtrees.push(TemplateSubtree::Config);
        }
        for subtree in subtrees {
            info!("Copying {} template", subtree);
            let step = BuildStep::CopySubtree(subtree);
            at(step, copy_template_subtree(subtree, &template_root, dir).await)?;
        }

        at(
            BuildStep::InitRepository,
            vcs::init_repository(self.runner, dir).await,
        )?;

        let installer = DependencyInstaller::new(self.runner, self.settings.package_manager);
        at(BuildStep::InitManifest, installer.init_manifest(dir).await)?;
        at(
            BuildStep::InstallDependencies,
            installer
                .install_dependencies(self.kind.dependencies(), dir)
                .await,
        )?;
        at(BuildStep::FixManifest, fix_manifest(&template_root, dir).await)?;

        for &file_name in self.kind.static_files() {
            info!("Copying {}", file_name);
            at(
                BuildStep::CopyStaticFile(file_name),
                copy_static_file(&template_root, file_name, dir).await,
            )?;
        }

        Ok(())
    }
}
