//! Per-invocation scratch directory.

use std::io;
use std::path::{Path, PathBuf};

use camino::Utf8Path;
use tempfile::{Builder, TempDir};
use thiserror::Error;
use tracing::debug;

const WORKSPACE_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::workspace");
const WORKSPACE_PREFIX: &str = "sluice-";

/// Failures while creating or removing a workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The directory could not be created.
    #[error("failed to create workspace under '{}': {source}", root.display())]
    Create {
        /// Parent directory.
        root: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The directory could not be removed.
    #[error("failed to remove workspace '{}': {source}", path.display())]
    Release {
        /// Workspace directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A directory that exists for the duration of one invocation.
///
/// Call [`ScopedWorkspace::release`] to remove it and observe failures.
/// Dropping the value removes it too, silently.
#[derive(Debug)]
pub struct ScopedWorkspace {
    dir: TempDir,
}

impl ScopedWorkspace {
    /// Creates a fresh directory under `root`, or the system temp directory.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Create`] when the directory cannot be made.
    pub fn acquire(root: Option<&Utf8Path>) -> Result<Self, WorkspaceError> {
        let mut builder = Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let parent = root.map_or_else(std::env::temp_dir, |dir| dir.as_std_path().to_path_buf());
        let dir = builder
            .tempdir_in(&parent)
            .map_err(|source| WorkspaceError::Create {
                root: parent,
                source,
            })?;
        debug!(target: WORKSPACE_TARGET, path = %dir.path().display(), "acquired workspace");
        Ok(Self { dir })
    }

    /// Returns the workspace directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Removes the directory and everything in it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Release`] when removal fails.
    pub fn release(self) -> Result<(), WorkspaceError> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| WorkspaceError::Release {
                path: path.clone(),
                source,
            })?;
        debug!(target: WORKSPACE_TARGET, path = %path.display(), "released workspace");
        Ok(())
    }
}
