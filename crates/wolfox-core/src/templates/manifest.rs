//! Package manifest merging
//!
//! The package manager writes a manifest carrying the project identity and the
//! installed dependencies. The template ships its own manifest carrying the
//! scripts. The final manifest combines both.

use crate::error::{Result, ScaffoldError};
use crate::kind::MANIFEST_FILE;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// A manifest as read from disk, keys in file order
pub type ManifestObject = Map<String, Value>;

/// The manifest written back to the project. Field order is the output key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    pub private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Value>,
    #[serde(
        rename = "devDependencies",
        skip_serializing_if = "Option::is_none"
    )]
    pub dev_dependencies: Option<Value>,
}

impl ProjectManifest {
    /// Identity and dependencies from `generated`, scripts from `template`, always private.
    ///
    /// Keys missing from their source are omitted; keys present with a `null`
    /// value are kept as `null`.
    pub fn merge(mut generated: ManifestObject, mut template: ManifestObject) -> Self {
        Self {
            name: generated.remove("name"),
            version: generated.remove("version"),
            author: generated.remove("author"),
            private: true,
            scripts: template.remove("scripts"),
            dependencies: generated.remove("dependencies"),
            dev_dependencies: generated.remove("devDependencies"),
        }
    }

    /// Pretty-printed JSON with two-space indentation and a trailing newline
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| {
            ScaffoldError::io("serialize manifest", MANIFEST_FILE, e.into())
        })?;
        json.push('\n');
        Ok(json)
    }
}

async fn read_manifest(path: &Path) -> Result<ManifestObject> {
    let content = fs::read_to_string(path)
        .await
        .map_err(ScaffoldError::io_with("read", path))?;
    serde_json::from_str(&content).map_err(|source| ScaffoldError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrite `project_dir/package.json`, taking its scripts from `template_root/package.json`
pub async fn fix_manifest(template_root: &Path, project_dir: &Path) -> Result<ProjectManifest> {
    let generated_path = project_dir.join(MANIFEST_FILE);
    let template_path = template_root.join(MANIFEST_FILE);

    let generated = read_manifest(&generated_path).await?;
    let template = read_manifest(&template_path).await?;

    let manifest = ProjectManifest::merge(generated, template);
    fs::write(&generated_path, manifest.to_pretty_json()?)
        .await
        .map_err(ScaffoldError::io_with("write", &generated_path))?;
    info!("Updated {}", generated_path.display());

    Ok(manifest)
}
