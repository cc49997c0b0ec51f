//! Connection check results.

use serde::{Deserialize, Serialize};

/// Outcome of a connector's `check` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The configuration can be used to connect.
    Succeeded,
    /// The configuration was rejected or the source was unreachable.
    Failed,
}

/// Payload of a `CONNECTION_STATUS` message.
///
/// # Example
///
/// ```
/// use sluice_protocol::{ConnectionStatus, Status};
///
/// let status = ConnectionStatus::failed("bad credentials");
/// assert_eq!(status.status(), Status::Failed);
/// assert_eq!(status.message(), Some("bad credentials"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ConnectionStatus {
    /// Creates a status without a diagnostic message.
    #[must_use]
    pub const fn new(status: Status) -> Self {
        Self {
            status,
            message: None,
        }
    }

    /// Creates a successful status.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self::new(Status::Succeeded)
    }

    /// Creates a failed status carrying a diagnostic message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(Status::Failed).with_message(message)
    }

    /// Attaches a diagnostic message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the check outcome.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the diagnostic message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` when the check succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, Status::Succeeded)
    }
}
