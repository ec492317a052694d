//! Server registry for a fleet of ephemeral game-server instances.
//!
//! This module tracks every instance the provisioner reports, the lifecycle
//! state each one is in, and answers which `free` instance of a given type
//! can take more players. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Registry behaviour knobs in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
