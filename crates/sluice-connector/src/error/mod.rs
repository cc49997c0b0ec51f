//! Errors raised from inside connector operations.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error type connectors use to attach an underlying cause.
pub type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Failures raised by `configure`, `check`, `discover` or `read`.
///
/// The entrypoint never recovers from these; they end the output stream and
/// the process exits non-zero.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The operation is not provided by this connector.
    #[error("connector does not implement '{operation}'")]
    Unimplemented {
        /// Operation that was invoked.
        operation: &'static str,
    },

    /// The operation failed.
    #[error("{message}")]
    Failed {
        /// Human-readable failure description.
        message: String,
        /// Optional underlying cause.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Writing into the invocation workspace failed.
    #[error("failed to write workspace file '{}': {source}", path.display())]
    Workspace {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConnectorError {
    /// Creates a failure with a message and no underlying cause.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a failure that wraps an underlying cause.
    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self::Failed {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates the error reported by operations a connector does not provide.
    #[must_use]
    pub const fn unimplemented(operation: &'static str) -> Self {
        Self::Unimplemented { operation }
    }
}
