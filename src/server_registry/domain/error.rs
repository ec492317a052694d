//! Error types for server record validation and parsing.

use std::fmt;
use thiserror::Error;

/// Errors returned while constructing server registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServerRegistryDomainError {
    /// The server identifier is empty after trimming.
    #[error("server identifier must not be empty")]
    EmptyIdentifier,

    /// The server image is empty after trimming.
    #[error("server image must not be empty")]
    EmptyImage,
}

/// Error returned while parsing a lifecycle state from its canonical name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown server state: {0}")]
pub struct ParseServerStateError(pub String);

/// Error returned when a lifecycle state ordinal is outside `0..=3`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("server state ordinal {0} is out of range (expected 0-3)")]
pub struct InvalidServerStateOrdinal(pub i64);

/// Patch field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchField {
    /// The `players` list.
    Players,
    /// The `players_max` capacity.
    PlayersMax,
    /// The lifecycle `state`.
    State,
    /// The free-form `extras` map.
    Extras,
}

impl PatchField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::PlayersMax => "players_max",
            Self::State => "state",
            Self::Extras => "extras",
        }
    }
}

impl fmt::Display for PatchField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A patch field could not be interpreted as its expected shape.
///
/// No field of the patch has been applied when this error is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct PatchValidationError {
    field: PatchField,
    reason: String,
}

impl PatchValidationError {
    /// Creates a validation error for `field`.
    #[must_use]
    pub fn new(field: PatchField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the offending field.
    #[must_use]
    pub const fn field(&self) -> PatchField {
        self.field
    }

    /// Returns a human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
