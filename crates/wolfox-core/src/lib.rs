//! Wolfox Core - scaffolding for Wolfox backend and frontend projects
//!
//! A Wolfox stack is two sibling projects, `<name>-back` and `<name>-front`.
//! Each is created from a static template root, put under git, given its
//! dependencies through a package manager and a merged `package.json`.
//!
//! # Architecture
//!
//! - **Core operations** - [`folder`], [`templates`] and [`runtime`] hold the
//!   filesystem and subprocess steps, each taking its target folder explicitly
//! - **Orchestration** - [`builder::ProjectBuilder`] runs the steps for one
//!   [`ProjectKind`]; [`driver::run`] validates a [`ProjectRequest`] and
//!   dispatches to the builders
//! - **Prompts** - optional cliclack confirmation (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based overwrite prompt
//!
//! # Example Usage
//!
//! ```ignore
//! use wolfox_core::{driver, AssumeYes, ProjectRequest, Settings};
//!
//! let request = ProjectRequest { name: "demo".into(), ..Default::default() };
//! let settings = Settings::default();
//! let runner = wolfox_core::system_runner(&request, &settings);
//! let outcome = driver::run(&request, &settings, &runner, &AssumeYes).await?;
//! ```

pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod folder;
pub mod kind;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use builder::{BuildOutcome, BuildStep, ProjectBuilder};
pub use config::{PackageManager, Settings, SettingsOverrides};
pub use driver::{run, system_runner, AssumeYes, ProjectRequest, Prompter, RunOutcome};
pub use error::{Result, ScaffoldError};
pub use folder::{create_folder, with_folder, FolderStatus};
pub use kind::{DependencySet, ProjectKind};
pub use runtime::{CommandRunner, ExternalCommand, SystemRunner};

#[cfg(feature = "tui")]
pub use tui::ConfirmPrompter;
