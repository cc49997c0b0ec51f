//! Named connector factories.
//!
//! A binary registers the connectors it ships with under stable names; the
//! operator selects one at runtime. Duplicate and blank names are rejected.
//! Resolving without a name yields the [`UnimplementedConnector`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::connector::{Connector, UnimplementedConnector};

/// Builds a fresh connector instance.
pub type ConnectorFactory = fn() -> Box<dyn Connector>;

/// Failures while registering or selecting a connector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A connector name was empty or whitespace.
    #[error("connector name must not be empty")]
    EmptyName,
    /// Another connector already uses the name.
    #[error("connector '{name}' is already registered")]
    Duplicate {
        /// Name that was registered twice.
        name: String,
    },
    /// No connector is registered under the requested name.
    #[error("unknown connector '{name}' (available: {})", available.join(", "))]
    Unknown {
        /// Name that was requested.
        name: String,
        /// Registered names, sorted.
        available: Vec<String>,
    },
}

/// Registry of connector factories keyed by name.
///
/// # Example
///
/// ```
/// use sluice_connector::{Connector, ConnectorRegistry, UnimplementedConnector};
///
/// fn noop() -> Box<dyn Connector> {
///     Box::new(UnimplementedConnector)
/// }
///
/// let mut registry = ConnectorRegistry::new();
/// registry
///     .register("noop", noop)
///     .expect("registration succeeds");
/// assert!(registry.get("noop").is_some());
/// assert!(registry.instantiate("noop").is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectorRegistry {
    factories: BTreeMap<String, ConnectorFactory>,
}

impl ConnectorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] for blank names and
    /// [`RegistryError::Duplicate`] when the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: ConnectorFactory,
    ) -> Result<(), RegistryError> {
        let key = name.into();
        if key.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.factories.contains_key(&key) {
            return Err(RegistryError::Duplicate { name: key });
        }
        self.factories.insert(key, factory);
        Ok(())
    }

    /// Looks up a factory by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ConnectorFactory> {
        self.factories.get(name).copied()
    }

    /// Builds the connector registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] when nothing is registered under
    /// `name`.
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Connector>, RegistryError> {
        self.get(name)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::Unknown {
                name: name.to_owned(),
                available: self.names().map(str::to_owned).collect(),
            })
    }

    /// Builds the selected connector, or the unimplemented one when no name
    /// is given.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] when a name is given but not
    /// registered.
    pub fn resolve(&self, name: Option<&str>) -> Result<Box<dyn Connector>, RegistryError> {
        name.map_or_else(
            || Ok(Box::new(UnimplementedConnector) as Box<dyn Connector>),
            |selected| self.instantiate(selected),
        )
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Returns the number of registered connectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` when no connectors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
