//! Adapter implementations for the server registry ports.

pub mod memory;
