//! Port contracts for the server registry and its provisioning collaborator.

mod provisioner;
mod registry;

#[cfg(test)]
pub use provisioner::MockServerProvisioner;
pub use provisioner::{
    ProvisionSpec, ProvisionedInstance, ProvisionerError, ProvisionerResult, ServerProvisioner,
};
pub use registry::{ServerRegistry, ServerRegistryError, ServerRegistryResult};
