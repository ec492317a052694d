//! Service layer for provisioning, tracking and matching server instances.

use crate::server_registry::{
    domain::{
        NewServerRecord, ServerIdentifier, ServerImage, ServerPatch, ServerRecord,
        ServerRegistryDomainError, ServerType,
    },
    ports::{
        ProvisionSpec, ProvisionerError, ServerProvisioner, ServerRegistry, ServerRegistryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for provisioning a new server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionServerRequest {
    image: String,
    server_type: ServerType,
    configuration: Option<String>,
}

impl ProvisionServerRequest {
    /// Creates a request for `image` serving `server_type`.
    #[must_use]
    pub fn new(image: impl Into<String>, server_type: ServerType) -> Self {
        Self {
            image: image.into(),
            server_type,
            configuration: None,
        }
    }

    /// Sets the opaque configuration handed to the instance.
    #[must_use]
    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }
}

/// Service-level errors for matchmaking operations.
#[derive(Debug, Error)]
pub enum MatchmakingServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ServerRegistryDomainError),
    /// Registry operation failed.
    #[error(transparent)]
    Registry(#[from] ServerRegistryError),
    /// Provisioner operation failed.
    #[error(transparent)]
    Provisioner(#[from] ProvisionerError),
    /// No server exists with the given identifier.
    #[error("server {0} not found")]
    NotFound(ServerIdentifier),
}

/// Result type for matchmaking service operations.
pub type MatchmakingServiceResult<T> = Result<T, MatchmakingServiceError>;

/// Orchestrates the provisioner and the server registry.
#[derive(Clone)]
pub struct MatchmakingService<R, P, C>
where
    R: ServerRegistry,
    P: ServerProvisioner,
    C: Clock + Send + Sync,
{
    registry: Arc<R>,
    provisioner: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> MatchmakingService<R, P, C>
where
    R: ServerRegistry,
    P: ServerProvisioner,
    C: Clock + Send + Sync,
{
    /// Creates a new matchmaking service.
    #[must_use]
    pub const fn new(registry: Arc<R>, provisioner: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            registry,
            provisioner,
            clock,
        }
    }

    /// Provisions an instance and registers it in the `startup` state.
    ///
    /// # Errors
    ///
    /// Returns [`ServerRegistryDomainError::EmptyImage`] when the image is
    /// blank, or provisioner errors when the instance cannot be created.
    pub async fn provision(
        &self,
        request: ProvisionServerRequest,
    ) -> MatchmakingServiceResult<ServerRecord> {
        let ProvisionServerRequest {
            image,
            server_type,
            configuration,
        } = request;

        let server_image = ServerImage::new(image)?;
        let spec = ProvisionSpec {
            image: server_image.as_str().to_owned(),
            server_type,
            configuration,
        };
        let instance = self.provisioner.provision(&spec).await.inspect_err(|err| {
            warn!(image = %spec.image, %server_type, error = %err, "provisioning failed");
        })?;

        let identifier = ServerIdentifier::from_instance_id(&instance.instance_id)?;
        let record = ServerRecord::new(
            NewServerRecord {
                identifier,
                image: server_image,
                server_type,
                container: instance.container,
                network: instance.network,
            },
            &*self.clock,
        );
        self.registry.add(record.clone());
        info!(
            identifier = %record.identifier(),
            image = record.image(),
            %server_type,
            "server instance registered"
        );
        Ok(record)
    }

    /// Returns the current record for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchmakingServiceError::NotFound`] when no record exists,
    /// or a domain error when the identifier is blank.
    pub fn get(&self, identifier: &str) -> MatchmakingServiceResult<ServerRecord> {
        let server_identifier = ServerIdentifier::new(identifier)?;
        self.registry
            .get(&server_identifier)
            .ok_or(MatchmakingServiceError::NotFound(server_identifier))
    }

    /// Returns every registered server.
    #[must_use]
    pub fn list(&self) -> Vec<ServerRecord> {
        self.registry.list()
    }

    /// Applies a status report to a registered server.
    ///
    /// # Errors
    ///
    /// Returns [`MatchmakingServiceError::Registry`] when the record does not
    /// exist or a patch field is malformed, in which case nothing changes.
    pub fn update(
        &self,
        identifier: &str,
        patch: &ServerPatch,
    ) -> MatchmakingServiceResult<ServerRecord> {
        let server_identifier = ServerIdentifier::new(identifier)?;
        let updated = self
            .registry
            .update(&server_identifier, patch)
            .inspect_err(|err| {
                warn!(identifier = %server_identifier, error = %err, "server patch rejected");
            })?;
        debug!(
            identifier = %updated.identifier(),
            state = %updated.state(),
            players = updated.players().len(),
            players_max = updated.players_max(),
            "server patch applied"
        );
        Ok(updated)
    }

    /// Returns `free` servers of `server_type` with room for
    /// `players_needed` more players.
    #[must_use]
    pub fn find(&self, server_type: ServerType, players_needed: i64) -> Vec<ServerRecord> {
        let matches = self.registry.find(server_type, players_needed);
        debug!(
            %server_type,
            players_needed,
            matches = matches.len(),
            "matching query evaluated"
        );
        matches
    }

    /// Releases the instance and removes its record.
    ///
    /// Returns `Ok(None)` without contacting the provisioner when the record
    /// is already gone.
    ///
    /// The lookup, release and removal are separate registry calls, not one
    /// atomic step. The returned record is whatever `remove` took out of the
    /// registry after the release: `None` when a concurrent caller removed it
    /// first, or the latest record when one was re-added under the same
    /// identifier in between. Release is keyed by identifier, so that record
    /// refers to the instance that was just released.
    ///
    /// # Errors
    ///
    /// Returns provisioner errors when the instance cannot be released; the
    /// record is kept in that case.
    pub async fn decommission(
        &self,
        identifier: &str,
    ) -> MatchmakingServiceResult<Option<ServerRecord>> {
        let server_identifier = ServerIdentifier::new(identifier)?;
        if self.registry.get(&server_identifier).is_none() {
            return Ok(None);
        }

        self.provisioner.release(&server_identifier).await?;
        let Some(removed) = self.registry.remove(&server_identifier) else {
            debug!(
                identifier = %server_identifier,
                "server record already removed during release"
            );
            return Ok(None);
        };
        info!(
            identifier = %removed.identifier(),
            image = removed.image(),
            server_type = %removed.server_type(),
            "server instance decommissioned"
        );
        Ok(Some(removed))
    }
}
