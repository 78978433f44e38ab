//! External command execution
//!
//! Every program this crate launches (version control, package manager) goes
//! through the [`CommandRunner`] trait so that project builders can be tested
//! without the real tools installed.

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args_slice(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs external commands to completion
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `command` inside `cwd`, failing unless it exits with status zero
    async fn run(&self, command: &ExternalCommand, cwd: &Path) -> Result<()>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    /// Inherit stdout/stderr instead of capturing them
    pub inherit_output: bool,
    /// Kill the child once this much time has passed
    pub timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new(inherit_output: bool, timeout: Option<Duration>) -> Self {
        Self {
            inherit_output,
            timeout,
        }
    }

    async fn run_to_end(&self, command: &ExternalCommand, cwd: &Path) -> Result<()> {
        let mut cmd = TokioCommand::new(command.program());
        cmd.args(command.args_slice())
            .current_dir(cwd)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let spawn_error = |source| ScaffoldError::Spawn {
            command: command.to_string(),
            source,
        };

        let (status, stderr) = if self.inherit_output {
            let status = cmd
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await
                .map_err(spawn_error)?;
            (status, String::new())
        } else {
            let output = cmd
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .map_err(spawn_error)?;
            (
                output.status,
                String::from_utf8_lossy(&output.stderr).into_owned(),
            )
        };

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::Subprocess {
                command: command.to_string(),
                code: status.code(),
                stderr,
            })
        }
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ExternalCommand, cwd: &Path) -> Result<()> {
        debug!(command = %command, cwd = %cwd.display(), "Running external command");

        match self.timeout {
            // Dropping the timed-out future drops the child, which kills it
            Some(limit) => match timeout(limit, self.run_to_end(command, cwd)).await {
                Ok(result) => result,
                Err(_) => Err(ScaffoldError::Timeout {
                    command: command.to_string(),
                    timeout: limit,
                }),
            },
            None => self.run_to_end(command, cwd).await,
        }
    }
}
