//! In-memory provisioner for tests and local runs.

use crate::server_registry::{
    domain::ServerIdentifier,
    ports::{
        ProvisionSpec, ProvisionedInstance, ProvisionerError, ProvisionerResult, ServerProvisioner,
    },
};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory provisioner.
///
/// Hands out random instance ids and synthetic container metadata without
/// starting any process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvisioner {
    state: Arc<RwLock<InMemoryProvisionerState>>,
}

#[derive(Debug, Default)]
struct InMemoryProvisionerState {
    running: HashMap<ServerIdentifier, ProvisionSpec>,
    failing_images: HashMap<String, String>,
    released: Vec<ServerIdentifier>,
}

impl InMemoryProvisioner {
    /// Creates a provisioner with no running instances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later request for `image` fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn fail_image(
        &self,
        image: impl Into<String>,
        reason: impl Into<String>,
    ) -> ProvisionerResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| ProvisionerError::runtime(std::io::Error::other(err.to_string())))?;
        state.failing_images.insert(image.into(), reason.into());
        Ok(())
    }

    /// Returns whether the instance behind `identifier` is running.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn is_running(&self, identifier: &ServerIdentifier) -> ProvisionerResult<bool> {
        let state = self
            .state
            .read()
            .map_err(|err| ProvisionerError::runtime(std::io::Error::other(err.to_string())))?;
        Ok(state.running.contains_key(identifier))
    }

    /// Returns the identifiers released so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn released(&self) -> ProvisionerResult<Vec<ServerIdentifier>> {
        let state = self
            .state
            .read()
            .map_err(|err| ProvisionerError::runtime(std::io::Error::other(err.to_string())))?;
        Ok(state.released.clone())
    }
}

#[async_trait]
impl ServerProvisioner for InMemoryProvisioner {
    async fn provision(&self, spec: &ProvisionSpec) -> ProvisionerResult<ProvisionedInstance> {
        let mut state = self
            .state
            .write()
            .map_err(|err| ProvisionerError::runtime(std::io::Error::other(err.to_string())))?;

        if let Some(reason) = state.failing_images.get(&spec.image) {
            return Err(ProvisionerError::ProvisionFailed {
                image: spec.image.clone(),
                reason: reason.clone(),
            });
        }

        let instance_id = Uuid::new_v4().simple().to_string();
        let identifier =
            ServerIdentifier::from_instance_id(&instance_id).map_err(ProvisionerError::runtime)?;
        let configuration = spec.configuration.as_deref().unwrap_or_default();
        let container = json!({
            "Id": instance_id,
            "Image": spec.image,
            "Env": [
                format!("SERVER_CONFIGURATION={configuration}"),
                format!("SERVER_IMAGE={}", spec.image),
                format!("SERVER_TYPE={}", spec.server_type),
            ],
            "State": {"Status": "running"},
        });
        let network = json!({
            "NetworkID": "bridge",
            "EndpointID": identifier.as_str(),
        });

        state.running.insert(identifier, spec.clone());
        Ok(ProvisionedInstance {
            instance_id,
            container,
            network,
        })
    }

    async fn release(&self, identifier: &ServerIdentifier) -> ProvisionerResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| ProvisionerError::runtime(std::io::Error::other(err.to_string())))?;
        if state.running.remove(identifier).is_some() {
            state.released.push(identifier.clone());
        }
        Ok(())
    }
}
