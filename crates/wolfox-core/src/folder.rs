//! Project folder creation and scoped entry
//!
//! Folders are never entered by changing the process working directory.
//! [`with_folder`] hands the folder path to the action instead, and every
//! step receives that path explicitly.

use crate::error::{Result, ScaffoldError};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Result of [`create_folder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    /// A new, empty folder was created
    Created,
    /// Something already exists at the path; the caller should skip it
    AlreadyExists,
}

/// Create `path` as a new directory, deleting whatever is there first when `overwrite` is set.
///
/// Deletion is best effort: a missing path is ignored and any other failure is
/// only logged, leaving creation to report `AlreadyExists` if stale contents
/// remain. Creation failures other than "already exists" are errors.
pub async fn create_folder(path: &Path, overwrite: bool) -> Result<FolderStatus> {
    if overwrite {
        match fs::remove_dir_all(path).await {
            Ok(()) => debug!("Removed existing folder {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove {}: {}", path.display(), e),
        }
    }

    match fs::create_dir(path).await {
        Ok(()) => {
            debug!("Created folder {}", path.display());
            Ok(FolderStatus::Created)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(FolderStatus::AlreadyExists),
        Err(source) => Err(ScaffoldError::FolderCreate {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Logs leaving the folder however the scoped action ends
struct FolderScope {
    path: PathBuf,
}

impl FolderScope {
    fn enter(path: &Path) -> Self {
        debug!("Entering {}", path.display());
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl Drop for FolderScope {
    fn drop(&mut self) {
        debug!("Leaving {}", self.path.display());
    }
}

/// Run `action` with `path` as its working folder.
///
/// The action receives its own copy of the path. The process working
/// directory is left alone.
pub async fn with_folder<F, Fut, T>(path: &Path, action: F) -> T
where
    F: FnOnce(PathBuf) -> Fut,
    Fut: Future<Output = T>,
{
    let _scope = FolderScope::enter(path);
    action(path.to_path_buf()).await
}
