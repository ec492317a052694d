//! In-memory adapters for the server registry and provisioning ports.

mod provisioner;
mod registry;

pub use provisioner::InMemoryProvisioner;
pub use registry::InMemoryServerRegistry;
