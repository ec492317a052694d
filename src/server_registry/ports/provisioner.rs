//! Provisioning port for creating and releasing server instances.

use crate::server_registry::domain::{ServerIdentifier, ServerType};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for provisioning operations.
pub type ProvisionerResult<T> = Result<T, ProvisionerError>;

/// What to launch for a new server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionSpec {
    /// Software image to run.
    pub image: String,
    /// Game mode the instance will serve.
    pub server_type: ServerType,
    /// Opaque configuration handed to the instance.
    pub configuration: Option<String>,
}

/// Metadata reported by the provisioner for a started instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedInstance {
    /// Full identifier assigned by the provisioner.
    pub instance_id: String,
    /// Opaque container metadata, stored verbatim.
    pub container: Value,
    /// Opaque network metadata, stored verbatim.
    pub network: Value,
}

/// External collaborator that starts and releases server instances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerProvisioner: Send + Sync {
    /// Creates and starts an instance.
    async fn provision(&self, spec: &ProvisionSpec) -> ProvisionerResult<ProvisionedInstance>;

    /// Releases the instance behind a registered server.
    async fn release(&self, identifier: &ServerIdentifier) -> ProvisionerResult<()>;
}

/// Errors returned by provisioner adapters.
#[derive(Debug, Clone, Error)]
pub enum ProvisionerError {
    /// The instance could not be created or started.
    #[error("failed to provision image '{image}': {reason}")]
    ProvisionFailed {
        /// Requested image.
        image: String,
        /// Reason string.
        reason: String,
    },

    /// Generic runtime failure.
    #[error("provisioner runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProvisionerError {
    /// Wraps a runtime error from the provisioner adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
