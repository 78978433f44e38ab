//! Request validation and dispatch to the project builders

use crate::builder::{BuildOutcome, ProjectBuilder};
use crate::config::Settings;
use crate::error::{Result, ScaffoldError};
use crate::kind::ProjectKind;
use crate::runtime::{CommandRunner, SystemRunner};
use tracing::info;

/// What the user asked for on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRequest {
    pub name: String,
    pub backend_only: bool,
    pub frontend_only: bool,
    pub overwrite: bool,
    /// Inherit the output of git and the package manager, see [`system_runner`]
    pub verbose: bool,
}

impl ProjectRequest {
    /// Reject requests that cannot be dispatched
    pub fn validate(&self) -> Result<()> {
        if self.backend_only && self.frontend_only {
            return Err(ScaffoldError::Argument(
                "--backend-only and --frontend-only cannot be used together".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(ScaffoldError::Argument(
                "the project name must not be empty".to_string(),
            ));
        }
        if self.name.contains(&['/', '\\'][..]) || self.name == "." || self.name == ".." {
            return Err(ScaffoldError::Argument(format!(
                "'{}' is not a valid project name",
                self.name
            )));
        }
        Ok(())
    }

    /// Kinds to build, in build order
    pub fn kinds(&self) -> Vec<ProjectKind> {
        ProjectKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ProjectKind::Backend => !self.frontend_only,
                ProjectKind::Frontend => !self.backend_only,
            })
            .collect()
    }

    /// Folder names this request creates
    pub fn folder_names(&self) -> Vec<String> {
        self.kinds()
            .iter()
            .map(|kind| kind.folder_name(&self.name))
            .collect()
    }
}

/// Question asked before overwriting existing folders
pub fn overwrite_question(request: &ProjectRequest) -> String {
    format!(
        "You're about to overwrite your folders {} if they exist. Are you sure you want to do it?",
        request.folder_names().join(" and ")
    )
}

/// Runner for real child processes; output is shown when either the request or the settings ask for it
pub fn system_runner(request: &ProjectRequest, settings: &Settings) -> SystemRunner {
    SystemRunner::new(
        request.verbose || settings.verbose,
        settings.command_timeout,
    )
}

/// Asks the user to confirm destructive operations
pub trait Prompter {
    /// Returns `true` only on an explicit yes
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Answers yes to everything, for non-interactive use
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

/// How a whole run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The user refused to overwrite; nothing was touched
    Declined,
    /// Every requested builder ran, in order
    Finished(Vec<BuildOutcome>),
}

impl RunOutcome {
    pub fn has_failures(&self) -> bool {
        match self {
            RunOutcome::Declined => false,
            RunOutcome::Finished(outcomes) => outcomes.iter().any(BuildOutcome::is_failure),
        }
    }
}

/// Validate `request`, confirm overwriting if asked, then run the builders one after the other.
///
/// Builder failures are reported in the outcome, not as an error: a failed
/// backend does not prevent the frontend from being built.
pub async fn run<R, P>(
    request: &ProjectRequest,
    settings: &Settings,
    runner: &R,
    prompter: &P,
) -> Result<RunOutcome>
where
    R: CommandRunner,
    P: Prompter,
{
    request.validate()?;

    if request.overwrite && !prompter.confirm(&overwrite_question(request))? {
        info!("Overwrite declined");
        return Ok(RunOutcome::Declined);
    }

    let mut outcomes = Vec::new();
    for kind in request.kinds() {
        let builder = ProjectBuilder::new(kind, settings, runner);
        outcomes.push(builder.build(&request.name, request.overwrite).await);
    }

    Ok(RunOutcome::Finished(outcomes))
}
