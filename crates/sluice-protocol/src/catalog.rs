//! Stream catalogs produced by `discover` and consumed by `read`.

use serde::{Deserialize, Serialize};

/// How a stream is read from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Every read returns the complete stream.
    FullRefresh,
    /// Reads resume from the last checkpointed state.
    Incremental,
}

/// How records are written to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationSyncMode {
    /// New records are appended.
    Append,
    /// Existing data is replaced.
    Overwrite,
    /// Records are appended and deduplicated by primary key.
    AppendDedup,
}

/// One readable stream advertised by a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    name: String,
    json_schema: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supported_sync_modes: Option<Vec<SyncMode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_defined_cursor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_cursor_field: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_defined_primary_key: Option<Vec<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

impl Stream {
    /// Creates a stream with a name and a record schema.
    #[must_use]
    pub fn new(name: impl Into<String>, json_schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            json_schema,
            supported_sync_modes: None,
            source_defined_cursor: None,
            default_cursor_field: None,
            source_defined_primary_key: None,
            namespace: None,
        }
    }

    /// Declares the sync modes this stream supports.
    #[must_use]
    pub fn with_sync_modes(mut self, modes: Vec<SyncMode>) -> Self {
        self.supported_sync_modes = Some(modes);
        self
    }

    /// Declares the cursor the source uses for incremental reads.
    #[must_use]
    pub fn with_source_defined_cursor(mut self, cursor_field: Vec<String>) -> Self {
        self.source_defined_cursor = Some(true);
        self.default_cursor_field = Some(cursor_field);
        self
    }

    /// Declares the primary key chosen by the source.
    #[must_use]
    pub fn with_primary_key(mut self, key: Vec<Vec<String>>) -> Self {
        self.source_defined_primary_key = Some(key);
        self
    }

    /// Places the stream in a namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Returns the stream name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the record schema.
    #[must_use]
    pub const fn json_schema(&self) -> &serde_json::Value {
        &self.json_schema
    }

    /// Returns the namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the supported sync modes, if declared.
    #[must_use]
    pub fn supported_sync_modes(&self) -> Option<&[SyncMode]> {
        self.supported_sync_modes.as_deref()
    }
}

/// Payload of a `CATALOG` message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    streams: Vec<Stream>,
}

impl Catalog {
    /// Creates a catalog from its streams.
    #[must_use]
    pub const fn new(streams: Vec<Stream>) -> Self {
        Self { streams }
    }

    /// Returns the advertised streams.
    #[must_use]
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }
}

/// A stream selected for reading, with the chosen sync behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredStream {
    stream: Stream,
    sync_mode: SyncMode,
    destination_sync_mode: DestinationSyncMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cursor_field: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_key: Option<Vec<Vec<String>>>,
}

impl ConfiguredStream {
    /// Selects a stream with the given sync modes.
    #[must_use]
    pub const fn new(
        stream: Stream,
        sync_mode: SyncMode,
        destination_sync_mode: DestinationSyncMode,
    ) -> Self {
        Self {
            stream,
            sync_mode,
            destination_sync_mode,
            cursor_field: None,
            primary_key: None,
        }
    }

    /// Overrides the cursor used for incremental reads.
    #[must_use]
    pub fn with_cursor_field(mut self, cursor_field: Vec<String>) -> Self {
        self.cursor_field = Some(cursor_field);
        self
    }

    /// Overrides the primary key used for deduplication.
    #[must_use]
    pub fn with_primary_key(mut self, key: Vec<Vec<String>>) -> Self {
        self.primary_key = Some(key);
        self
    }

    /// Returns the underlying stream.
    #[must_use]
    pub const fn stream(&self) -> &Stream {
        &self.stream
    }

    /// Returns the source sync mode.
    #[must_use]
    pub const fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }

    /// Returns the destination sync mode.
    #[must_use]
    pub const fn destination_sync_mode(&self) -> DestinationSyncMode {
        self.destination_sync_mode
    }

    /// Returns the cursor override, if any.
    #[must_use]
    pub fn cursor_field(&self) -> Option<&[String]> {
        self.cursor_field.as_deref()
    }
}

/// Catalog passed to `read`, naming the streams to produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    streams: Vec<ConfiguredStream>,
}

impl ConfiguredCatalog {
    /// Creates a configured catalog from its selected streams.
    #[must_use]
    pub const fn new(streams: Vec<ConfiguredStream>) -> Self {
        Self { streams }
    }

    /// Returns the selected streams.
    #[must_use]
    pub fn streams(&self) -> &[ConfiguredStream] {
        &self.streams
    }
}
