//! Payloads produced while reading: records, state checkpoints and logs.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Payload of a `RECORD` message.
///
/// # Example
///
/// ```
/// use sluice_protocol::RecordMessage;
///
/// let record = RecordMessage::new("users", serde_json::json!({"id": 1}), 1_700_000_000_000);
/// assert_eq!(record.stream(), "users");
/// assert_eq!(record.emitted_at(), 1_700_000_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMessage {
    stream: String,
    data: serde_json::Value,
    emitted_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

impl RecordMessage {
    /// Creates a record with an explicit emission time in epoch milliseconds.
    #[must_use]
    pub fn new(stream: impl Into<String>, data: serde_json::Value, emitted_at: i64) -> Self {
        Self {
            stream: stream.into(),
            data,
            emitted_at,
            namespace: None,
        }
    }

    /// Creates a record stamped with the current wall-clock time.
    #[must_use]
    pub fn now(stream: impl Into<String>, data: serde_json::Value) -> Self {
        Self::new(stream, data, epoch_millis())
    }

    /// Places the record in a namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Returns the stream the record belongs to.
    #[must_use]
    pub const fn stream(&self) -> &str {
        self.stream.as_str()
    }

    /// Returns the record body.
    #[must_use]
    pub const fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Returns the emission time in epoch milliseconds.
    #[must_use]
    pub const fn emitted_at(&self) -> i64 {
        self.emitted_at
    }

    /// Returns the namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

/// Payload of a `STATE` message: an opaque checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    data: serde_json::Value,
}

impl StateMessage {
    /// Wraps checkpoint data.
    #[must_use]
    pub const fn new(data: serde_json::Value) -> Self {
        Self { data }
    }

    /// Returns the checkpoint data.
    #[must_use]
    pub const fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

/// Severity of a connector log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Unrecoverable failure.
    Fatal,
    /// Operation failure.
    Error,
    /// Suspicious but non-fatal condition.
    Warn,
    /// Progress information.
    Info,
    /// Diagnostic detail.
    Debug,
    /// Fine-grained tracing.
    Trace,
}

/// Payload of a `LOG` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    level: LogLevel,
    message: String,
}

impl LogMessage {
    /// Creates a log message.
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Returns the severity.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns the message text.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
