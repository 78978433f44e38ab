//! Runtime configuration
//!
//! Settings come from command-line flags first, then environment variables,
//! then built-in defaults.

pub mod package_manager;
pub mod settings;

pub use package_manager::PackageManager;
pub use settings::{Settings, SettingsOverrides};
