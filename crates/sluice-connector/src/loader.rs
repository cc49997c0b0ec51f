//! JSON file loaders backing the default `read_*` connector methods.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use strum::Display;
use thiserror::Error;
use tracing::debug;

/// Tracing target for input loading.
pub(crate) const LOADER_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::loader");

/// Which invocation input a file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum InputKind {
    /// The connector configuration (`--config`).
    Config,
    /// The configured catalog (`--catalog`).
    Catalog,
    /// The state checkpoint (`--state`).
    State,
}

/// Failures while loading an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {kind} file '{path}': {source}")]
    Read {
        /// Input the file was meant to provide.
        kind: InputKind,
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was read but its content is not the expected JSON document.
    #[error("failed to parse {kind} file '{path}': {source}")]
    Parse {
        /// Input the file was meant to provide.
        kind: InputKind,
        /// Path that was parsed.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns which input failed to load.
    #[must_use]
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Read { kind, .. } | Self::Parse { kind, .. } => *kind,
        }
    }

    /// Returns the offending path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path.as_path(),
        }
    }
}

/// Reads `path` and deserializes it as a JSON document.
///
/// # Errors
///
/// Returns [`LoadError::Read`] when the file cannot be read and
/// [`LoadError::Parse`] when it does not deserialize into `T`.
pub fn load_json<T>(kind: InputKind, path: &Utf8Path) -> Result<T, LoadError>
where
    T: DeserializeOwned,
{
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    debug!(target: LOADER_TARGET, %kind, %path, bytes = text.len(), "loaded input file");
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}
