//! Connector specification payload.

use serde::{Deserialize, Serialize};

use crate::catalog::DestinationSyncMode;

/// Payload of a `SPEC` message.
///
/// Describes the configuration a connector accepts as a JSON schema document
/// together with optional capability flags. The schema itself is opaque to
/// the entrypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorSpecification {
    connection_specification: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    documentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    changelog_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supports_incremental: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supports_normalization: Option<bool>,
    #[serde(
        default,
        rename = "supportsDBT",
        skip_serializing_if = "Option::is_none"
    )]
    supports_dbt: Option<bool>,
    #[serde(
        default,
        rename = "supported_destination_sync_modes",
        skip_serializing_if = "Option::is_none"
    )]
    supported_destination_sync_modes: Option<Vec<DestinationSyncMode>>,
}

impl ConnectorSpecification {
    /// Creates a specification from a connection schema.
    #[must_use]
    pub const fn new(connection_specification: serde_json::Value) -> Self {
        Self {
            connection_specification,
            documentation_url: None,
            changelog_url: None,
            supports_incremental: None,
            supports_normalization: None,
            supports_dbt: None,
            supported_destination_sync_modes: None,
        }
    }

    /// Attaches a documentation URL.
    #[must_use]
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Attaches a changelog URL.
    #[must_use]
    pub fn with_changelog_url(mut self, url: impl Into<String>) -> Self {
        self.changelog_url = Some(url.into());
        self
    }

    /// Declares whether the connector supports incremental reads.
    #[must_use]
    pub const fn with_incremental(mut self, supported: bool) -> Self {
        self.supports_incremental = Some(supported);
        self
    }

    /// Declares whether destination output can be normalised.
    #[must_use]
    pub const fn with_normalization(mut self, supported: bool) -> Self {
        self.supports_normalization = Some(supported);
        self
    }

    /// Declares whether dbt transformations are supported.
    #[must_use]
    pub const fn with_dbt(mut self, supported: bool) -> Self {
        self.supports_dbt = Some(supported);
        self
    }

    /// Declares the destination sync modes a destination connector supports.
    #[must_use]
    pub fn with_destination_sync_modes(mut self, modes: Vec<DestinationSyncMode>) -> Self {
        self.supported_destination_sync_modes = Some(modes);
        self
    }

    /// Returns the connection schema document.
    #[must_use]
    pub const fn connection_specification(&self) -> &serde_json::Value {
        &self.connection_specification
    }

    /// Returns the documentation URL, if any.
    #[must_use]
    pub fn documentation_url(&self) -> Option<&str> {
        self.documentation_url.as_deref()
    }

    /// Returns whether incremental reads are supported, if declared.
    #[must_use]
    pub const fn supports_incremental(&self) -> Option<bool> {
        self.supports_incremental
    }
}
