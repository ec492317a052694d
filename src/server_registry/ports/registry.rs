//! Registry port for the in-process catalog of server records.

use crate::server_registry::domain::{
    PatchValidationError, ServerIdentifier, ServerPatch, ServerRecord, ServerType,
};
use thiserror::Error;

/// Result type for server registry operations.
pub type ServerRegistryResult<T> = Result<T, ServerRegistryError>;

/// Concurrency-safe catalog of server records keyed by identifier.
///
/// Every operation is a short in-memory step and is atomic on its own.
/// Results are independent copies; stored records only change through
/// [`ServerRegistry::add`] and [`ServerRegistry::update`].
pub trait ServerRegistry: Send + Sync {
    /// Inserts a record, silently replacing any record with the same
    /// identifier.
    fn add(&self, record: ServerRecord);

    /// Returns a copy of the record, or `None` when it does not exist.
    fn get(&self, identifier: &ServerIdentifier) -> Option<ServerRecord>;

    /// Removes a record if present and returns it.
    ///
    /// Removing an absent identifier is a no-op.
    fn remove(&self, identifier: &ServerIdentifier) -> Option<ServerRecord>;

    /// Returns copies of all records in unspecified order.
    fn list(&self) -> Vec<ServerRecord>;

    /// Validates and applies a partial update as a single step.
    ///
    /// # Errors
    ///
    /// Returns [`ServerRegistryError::NotFound`] when the record does not
    /// exist or [`ServerRegistryError::Validation`] when any provided field
    /// is malformed. No field is changed when an error is returned.
    fn update(
        &self,
        identifier: &ServerIdentifier,
        patch: &ServerPatch,
    ) -> ServerRegistryResult<ServerRecord>;

    /// Returns copies of every `free` record of `server_type` with at least
    /// `players_needed` free slots.
    fn find(&self, server_type: ServerType, players_needed: i64) -> Vec<ServerRecord>;

    /// Returns the number of stored records.
    fn len(&self) -> usize;

    /// Returns `true` when no records are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors returned by server registry implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServerRegistryError {
    /// The server was not found.
    #[error("server not found: {0}")]
    NotFound(ServerIdentifier),

    /// A patch field was malformed.
    #[error(transparent)]
    Validation(#[from] PatchValidationError),
}
