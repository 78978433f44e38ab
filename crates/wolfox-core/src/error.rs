//! Error types for wolfox-core

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using wolfox-core's error type
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Scaffolding error types
///
/// Everything except [`ScaffoldError::Argument`] and [`ScaffoldError::Prompt`] is
/// fatal to a single project builder only; the sibling builder still runs.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Conflicting or invalid command-line arguments
    #[error("Invalid arguments: {0}")]
    Argument(String),

    /// The overwrite confirmation could not be read
    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),

    /// Folder creation failed for a reason other than the folder already existing
    #[error("Failed to create folder {}: {source}", .path.display())]
    FolderCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template subtree or static file does not exist
    #[error("Template entry not found: {}", .path.display())]
    TemplateMissing { path: PathBuf },

    /// Generic filesystem failure
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generated or template manifest is not valid JSON
    #[error("Failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An external program could not be launched
    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An external program exited unsuccessfully
    #[error("`{command}` failed with exit code {}{}", format_code(.code), format_stderr(.stderr))]
    Subprocess {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external program ran longer than the configured timeout and was killed
    #[error("`{command}` timed out after {} seconds", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },
}

impl ScaffoldError {
    /// Build an [`ScaffoldError::Io`] error for the given action and path
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Build a [`ScaffoldError::Io`] mapper, for use with `map_err`
    pub fn io_with(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::io(action, path, source)
    }
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{}", trimmed)
    }
}
