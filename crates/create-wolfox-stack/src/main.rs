//! create-wolfox-stack - scaffolds Wolfox backend and frontend projects

mod message;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wolfox_core::runtime::check_tools;
use wolfox_core::{
    driver, AssumeYes, BuildOutcome, ConfirmPrompter, PackageManager, ProjectRequest, RunOutcome,
    ScaffoldError, Settings, SettingsOverrides,
};

/// Exit code for conflicting arguments, as clap uses for usage errors
const USAGE_EXIT_CODE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "create-wolfox-stack")]
#[command(about = "Create a Wolfox backend and frontend project pair")]
#[command(version)]
pub struct Args {
    /// Project name; folders <name>-back and <name>-front are created
    pub name: String,

    /// Build only the backend project
    #[arg(short = 'b', long = "backend-only")]
    pub backend_only: bool,

    /// Build only the frontend project
    #[arg(short = 'f', long = "frontend-only")]
    pub frontend_only: bool,

    /// Overwrite any existing folder (asks for confirmation)
    #[arg(long)]
    pub overwrite: bool,

    /// Answer yes to the overwrite confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Show progress and the output of git and the package manager
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory in which the project folders are created
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates [default: `templates/` next to the executable,
    /// else the source checkout this binary was built from]
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Package manager used to install dependencies
    #[arg(long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Timeout in seconds for each external command, 0 to wait forever
    #[arg(long = "timeout")]
    pub timeout: Option<u64>,
}

impl Args {
    fn request(&self) -> ProjectRequest {
        ProjectRequest {
            name: self.name.clone(),
            backend_only: self.backend_only,
            frontend_only: self.frontend_only,
            overwrite: self.overwrite,
            verbose: self.verbose,
        }
    }

    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            template_dir: self.template_dir.clone(),
            base_dir: self.directory.clone(),
            package_manager: self.package_manager,
            timeout_secs: self.timeout,
            verbose: self.verbose,
        }
    }
}

/// Initialize tracing; RUST_LOG takes precedence over --verbose
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,wolfox_core=info,create_wolfox_stack=info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn check_environment(settings: &Settings) {
    for tool in check_tools(settings.package_manager) {
        if let Some(warning) = tool.warning() {
            message::warning(&warning);
        } else if settings.verbose {
            message::info(&format!("Found {}", tool));
        }
    }
}

/// Print one line per project; returns true when every project succeeded or was skipped
fn report(outcomes: &[BuildOutcome]) -> bool {
    let mut ok = true;
    for outcome in outcomes {
        let folder = outcome
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| outcome.path().display().to_string());
        match outcome {
            BuildOutcome::Completed { kind, .. } => {
                message::info(&format!("Created {} project in {}", kind, folder));
            }
            BuildOutcome::Skipped { .. } => {
                message::warning(&format!(
                    "Folder {} already exists. Skipping generation.",
                    folder
                ));
            }
            BuildOutcome::Failed {
                kind, step, error, ..
            } => {
                ok = false;
                message::error(&format!(
                    "Failed to create {} project in {} while {}: {}",
                    kind, folder, step, error
                ));
            }
        }
    }
    ok
}

async fn run(args: Args) -> Result<ExitCode> {
    let request = args.request();
    if let Err(ScaffoldError::Argument(reason)) = request.validate() {
        message::error(&reason);
        Args::command().write_help(&mut std::io::stderr())?;
        return Ok(ExitCode::from(USAGE_EXIT_CODE));
    }

    let settings = Settings::resolve(args.overrides())?;
    debug!(?settings, "Resolved settings");
    check_environment(&settings);

    let runner = driver::system_runner(&request, &settings);
    let outcome = if args.yes {
        driver::run(&request, &settings, &runner, &AssumeYes).await?
    } else {
        driver::run(&request, &settings, &runner, &ConfirmPrompter).await?
    };

    // Ensure cursor is visible after the prompt
    let _ = console::Term::stderr().show_cursor();

    match outcome {
        RunOutcome::Declined => Ok(ExitCode::SUCCESS),
        RunOutcome::Finished(outcomes) => {
            if report(&outcomes) {
                message::congrats(&format!("Your {} stack is ready. Happy coding!", request.name));
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    run(args).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_short_flags() {
        let args = Args::try_parse_from(["create-wolfox-stack", "demo", "-b", "-v"]).unwrap();
        let request = args.request();
        assert_eq!(request.name, "demo");
        assert!(request.backend_only);
        assert!(!request.frontend_only);
        assert!(request.verbose);
        assert!(!request.overwrite);
    }

    #[test]
    fn test_parse_long_flags_and_settings() {
        let args = Args::try_parse_from([
            "create-wolfox-stack",
            "demo",
            "--frontend-only",
            "--overwrite",
            "--package-manager",
            "npm",
            "--timeout",
            "0",
            "--directory",
            "/work",
        ])
        .unwrap();
        assert!(args.request().frontend_only);
        assert!(args.request().overwrite);

        let overrides = args.overrides();
        assert_eq!(overrides.package_manager, Some(PackageManager::Npm));
        assert_eq!(overrides.timeout_secs, Some(0));
        assert_eq!(overrides.base_dir, Some(PathBuf::from("/work")));
    }

    #[test]
    fn test_both_exclusivity_flags_parse_but_fail_validation() {
        let args = Args::try_parse_from(["create-wolfox-stack", "demo", "-b", "-f"]).unwrap();
        assert!(matches!(
            args.request().validate(),
            Err(ScaffoldError::Argument(_))
        ));
    }

    #[test]
    fn test_name_is_required() {
        assert!(Args::try_parse_from(["create-wolfox-stack", "-b"]).is_err());
    }
}
