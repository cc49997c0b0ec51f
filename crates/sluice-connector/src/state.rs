//! Checkpoint state handed to `read`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State checkpoint a connector resumes from.
///
/// A missing `--state` argument, an empty object and a JSON `null` all yield
/// the same empty state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Map<String, Value>>", into = "Map<String, Value>")]
pub struct ConnectorState {
    entries: Map<String, Value>,
}

impl ConnectorState {
    /// Wraps an existing state object.
    #[must_use]
    pub const fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` when no checkpoint has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the state, returning it as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}

impl From<Option<Map<String, Value>>> for ConnectorState {
    fn from(entries: Option<Map<String, Value>>) -> Self {
        Self::new(entries.unwrap_or_default())
    }
}

impl From<ConnectorState> for Map<String, Value> {
    fn from(state: ConnectorState) -> Self {
        state.entries
    }
}
