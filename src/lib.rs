//! Matchmaking: a registry of ephemeral game-server instances.
//!
//! This crate keeps an in-memory catalog of the game servers a provisioning
//! system has started, tracks the lifecycle state and player capacity each
//! instance reports, and answers which running instance can take more players
//! of a given type.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Server records, lifecycle states and patch validation
//! - **Ports**: Abstract trait interfaces for the registry and provisioner
//! - **Adapters**: Concrete implementations of ports (in-memory)
//!
//! # Modules
//!
//! - [`server_registry`]: Server records, the concurrent registry, and the
//!   matching query

pub mod server_registry;
