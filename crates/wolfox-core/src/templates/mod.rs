//! Template materialization
//!
//! This module provides:
//! - Whole-subtree copying (`src`, `config`) from a template root
//! - Static configuration file copying
//! - Merging of the generated and template package manifests

pub mod copier;
pub mod manifest;

pub use copier::{copy_static_file, copy_template_subtree, TemplateSubtree};
pub use manifest::{fix_manifest, ManifestObject, ProjectManifest};
