//! Template file copying

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Subtrees of a template root that are copied as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSubtree {
    Src,
    Config,
}

impl TemplateSubtree {
    pub fn dir_name(&self) -> &'static str {
        match self {
            TemplateSubtree::Src => "src",
            TemplateSubtree::Config => "config",
        }
    }
}

impl fmt::Display for TemplateSubtree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Copy `template_root/<subtree>` to `target_dir/<subtree>`, byte for byte.
///
/// Returns the copied file paths, relative to the subtree.
pub async fn copy_template_subtree(
    subtree: TemplateSubtree,
    template_root: &Path,
    target_dir: &Path,
) -> Result<Vec<String>> {
    let source = template_root.join(subtree.dir_name());
    if !source.is_dir() {
        return Err(ScaffoldError::TemplateMissing { path: source });
    }
    let destination = target_dir.join(subtree.dir_name());

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(&source).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&source).to_path_buf();
            ScaffoldError::io("walk", path, e.into())
        })?;
        let relative = entry
            .path()
            .strip_prefix(&source)
            .unwrap_or(entry.path());
        let target_path = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .map_err(ScaffoldError::io_with("create directory", &target_path))?;
            continue;
        }

        fs::copy(entry.path(), &target_path)
            .await
            .map_err(ScaffoldError::io_with("copy file to", &target_path))?;
        debug!("Copied {}", target_path.display());

        copied_files.push(relative.to_string_lossy().replace('\\', "/"));
    }

    Ok(copied_files)
}

/// Copy the text file `template_root/<file_name>` verbatim into `target_dir`
pub async fn copy_static_file(template_root: &Path, file_name: &str, target_dir: &Path) -> Result<()> {
    let source = template_root.join(file_name);
    let content = match fs::read_to_string(&source).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ScaffoldError::TemplateMissing { path: source })
        }
        Err(e) => return Err(ScaffoldError::io("read", source, e)),
    };

    let target_path = target_dir.join(file_name);
    fs::write(&target_path, content)
        .await
        .map_err(ScaffoldError::io_with("write", &target_path))?;
    debug!("Wrote {}", target_path.display());

    Ok(())
}
