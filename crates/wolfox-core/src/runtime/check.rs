//! Tool detection for git and the package manager

use super::vcs::VCS_PROGRAM;
use crate::config::PackageManager;
use colored::Colorize;
use semver::Version;
use std::fmt;
use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<Version>,
    pub available: bool,
    /// Oldest version known to support the flags we pass
    pub minimum: Version,
}

impl ToolInfo {
    /// True when the tool is installed but reports a version below `minimum`
    pub fn is_outdated(&self) -> bool {
        self.version.as_ref().is_some_and(|v| v < &self.minimum)
    }

    /// Warning to show the user, if any
    pub fn warning(&self) -> Option<String> {
        if !self.available {
            Some(format!(
                "{} is not installed or not in PATH; projects that need it will fail",
                self.name
            ))
        } else if self.is_outdated() {
            Some(format!(
                "{} {} is older than the supported minimum {}",
                self.name,
                self.version.as_ref().map(ToString::to_string).unwrap_or_default(),
                self.minimum
            ))
        } else {
            None
        }
    }
}

impl fmt::Display for ToolInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.version, self.available) {
            (Some(version), true) => write!(f, "{} ({})", self.name, version),
            (None, true) => write!(f, "{} (unknown version)", self.name),
            (_, false) => write!(f, "{} ({})", self.name, "not installed".red()),
        }
    }
}

/// Minimum supported version of a tool
pub fn minimum_version(program: &str) -> Version {
    match program {
        "yarn" => Version::new(1, 0, 0),
        "npm" => Version::new(6, 0, 0),
        _ => Version::new(2, 0, 0),
    }
}

/// Extract a semantic version from `--version` output.
///
/// Accepts outputs such as `1.22.19`, `v10.2.4` or `git version 2.43.0.windows.1`,
/// padding missing minor/patch components with zero.
pub fn parse_version_output(output: &str) -> Option<Version> {
    output
        .split_whitespace()
        .map(|token| token.trim_start_matches('v'))
        .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))
        .and_then(|token| {
            let mut parts = token
                .split('.')
                .take(3)
                .map(|p| p.chars().take_while(char::is_ascii_digit).collect::<String>());
            let major = parts.next()?.parse().ok()?;
            let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
            let patch = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
            Some(Version::new(major, minor, patch))
        })
}

/// Check whether `program` is available and which version it reports
pub fn check_tool(program: &'static str) -> ToolInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => ToolInfo {
            name: program,
            version: parse_version_output(&String::from_utf8_lossy(&out.stdout)),
            available: true,
            minimum: minimum_version(program),
        },
        _ => ToolInfo {
            name: program,
            version: None,
            available: false,
            minimum: minimum_version(program),
        },
    }
}

/// Check git and the configured package manager
pub fn check_tools(package_manager: PackageManager) -> Vec<ToolInfo> {
    vec![check_tool(VCS_PROGRAM), check_tool(package_manager.program())]
}
