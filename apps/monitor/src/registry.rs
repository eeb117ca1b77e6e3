use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};
use crate::validation::{self, RegistrationCheck};

/// Store key holding the serialized registry
pub const REGISTRY_KEY: &str = "serverList";

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Registration rejected: {}", describe(.0))]
    Invalid(RegistrationCheck),

    #[error("No server named '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn describe(check: &RegistrationCheck) -> String {
    [&check.name, &check.host]
        .into_iter()
        .filter_map(|field| field.error.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A registered server. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    #[serde(rename = "serverName")]
    pub name: String,
    #[serde(rename = "serverHost")]
    pub host: String,
}

impl ServerRecord {
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self { name: name.into(), host: host.into() }
    }
}

/// Ordered list of servers: insertion order is display and probe order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRegistry {
    servers: Vec<ServerRecord>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the registry from the store. A missing key is an empty registry.
    pub async fn load(store: &dyn KeyValueStore) -> Result<Self, StorageError> {
        let servers = match store.get(REGISTRY_KEY).await? {
            Some(raw) => serde_json::from_str::<Vec<ServerRecord>>(&raw)?,
            None => Vec::new(),
        };
        tracing::debug!(count = servers.len(), "Loaded host registry");
        Ok(Self { servers })
    }

    pub fn servers(&self) -> &[ServerRecord] {
        &self.servers
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&ServerRecord> {
        self.servers.get(index)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, record: ServerRecord) {
        self.servers.push(record);
    }

    /// Validate, append and persist a new server.
    ///
    /// The in-memory registry only changes once the store write succeeded.
    pub async fn register(
        &mut self,
        store: &dyn KeyValueStore,
        name: &str,
        host: &str,
    ) -> Result<ServerRecord, RegistrationError> {
        let check = validation::validate_registration(name, host, &self.servers);
        if !check.is_valid() {
            tracing::debug!(name, host, "Registration rejected");
            return Err(RegistrationError::Invalid(check));
        }

        let record = ServerRecord::new(name, host);
        let mut servers = self.servers.clone();
        servers.push(record.clone());
        persist(store, &servers).await?;
        self.servers = servers;

        tracing::info!(name, host, index = self.servers.len() - 1, "Registered server");
        Ok(record)
    }

    /// Remove a server by name and persist the shortened registry
    pub async fn remove(
        &mut self,
        store: &dyn KeyValueStore,
        name: &str,
    ) -> Result<ServerRecord, RegistrationError> {
        let index = self
            .servers
            .iter()
            .position(|server| server.name == name)
            .ok_or_else(|| RegistrationError::NotFound(name.to_string()))?;

        let mut servers = self.servers.clone();
        let removed = servers.remove(index);
        persist(store, &servers).await?;
        self.servers = servers;

        tracing::info!(name, index, "Removed server");
        Ok(removed)
    }
}

/// Write the full registry under [`REGISTRY_KEY`]
async fn persist(store: &dyn KeyValueStore, servers: &[ServerRecord]) -> Result<(), StorageError> {
    let raw = serde_json::to_string(servers)?;
    store.set(REGISTRY_KEY, raw).await
}
