//! In-memory server registry guarded by a reader/writer lock.

use crate::server_registry::{
    config::RegistryConfig,
    domain::{ServerIdentifier, ServerPatch, ServerRecord, ServerType},
    ports::{ServerRegistry, ServerRegistryError, ServerRegistryResult},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory server registry.
///
/// Clones share the same catalog. Readers run concurrently; `add`, `remove`
/// and `update` are exclusive, and `update` keeps the write lock across
/// validation and application so readers never see a half-applied patch.
#[derive(Debug, Clone)]
pub struct InMemoryServerRegistry<C: Clock + Send + Sync> {
    servers: Arc<RwLock<HashMap<ServerIdentifier, ServerRecord>>>,
    config: RegistryConfig,
    clock: C,
}

impl<C: Clock + Send + Sync> InMemoryServerRegistry<C> {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_config(RegistryConfig::default(), clock)
    }

    /// Creates an empty registry with an explicit configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig, clock: C) -> Self {
        Self {
            servers: Arc::new(RwLock::new(HashMap::new())),
            config,
            clock,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> RegistryConfig {
        self.config
    }

    // Every write validates before it mutates, so a poisoned map is still
    // consistent and can be used as is.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<ServerIdentifier, ServerRecord>> {
        self.servers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ServerIdentifier, ServerRecord>> {
        self.servers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock + Send + Sync> ServerRegistry for InMemoryServerRegistry<C> {
    fn add(&self, record: ServerRecord) {
        let mut servers = self.write();
        servers.insert(record.identifier().clone(), record);
    }

    fn get(&self, identifier: &ServerIdentifier) -> Option<ServerRecord> {
        self.read().get(identifier).cloned()
    }

    fn remove(&self, identifier: &ServerIdentifier) -> Option<ServerRecord> {
        self.write().remove(identifier)
    }

    fn list(&self) -> Vec<ServerRecord> {
        self.read().values().cloned().collect()
    }

    fn update(
        &self,
        identifier: &ServerIdentifier,
        patch: &ServerPatch,
    ) -> ServerRegistryResult<ServerRecord> {
        let mut servers = self.write();
        let record = servers
            .get_mut(identifier)
            .ok_or_else(|| ServerRegistryError::NotFound(identifier.clone()))?;

        let validated = patch.validate()?;
        record.apply_patch(validated, self.config.transition_policy, &self.clock)?;
        Ok(record.clone())
    }

    fn find(&self, server_type: ServerType, players_needed: i64) -> Vec<ServerRecord> {
        let mut matches: Vec<ServerRecord> = self
            .read()
            .values()
            .filter(|record| record.matches(server_type, players_needed))
            .cloned()
            .collect();
        self.config.match_order.sort(&mut matches);
        matches
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
