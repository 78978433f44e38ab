//! External tools: process execution, package manager, version control
//!
//! This module provides:
//! - The [`CommandRunner`] seam and its real implementation
//! - Dependency installation through the configured package manager
//! - Repository initialization
//! - Tool availability checks run before scaffolding

pub mod check;
pub mod command;
pub mod installer;
pub mod vcs;

pub use check::{check_tools, ToolInfo};
pub use command::{CommandRunner, ExternalCommand, SystemRunner};
pub use installer::DependencyInstaller;
