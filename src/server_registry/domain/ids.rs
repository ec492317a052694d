//! Identifier and classification types for managed server instances.

use super::ServerRegistryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters kept from a provisioned instance id.
const SHORT_INSTANCE_ID_LENGTH: usize = 12;

/// Unique identifier of a server record.
///
/// Assigned once when the record is created and never changed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServerIdentifier(String);

impl ServerIdentifier {
    /// Creates a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServerRegistryDomainError::EmptyIdentifier`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ServerRegistryDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ServerRegistryDomainError::EmptyIdentifier);
        }
        Ok(Self(normalized))
    }

    /// Derives the short identifier of a provisioned instance.
    ///
    /// Keeps the first twelve characters of the instance id, matching the
    /// short form container runtimes print.
    ///
    /// # Errors
    ///
    /// Returns [`ServerRegistryDomainError::EmptyIdentifier`] when the
    /// instance id is empty after trimming.
    pub fn from_instance_id(instance_id: &str) -> Result<Self, ServerRegistryDomainError> {
        let short: String = instance_id
            .trim()
            .chars()
            .take(SHORT_INSTANCE_ID_LENGTH)
            .collect();
        Self::new(short)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServerIdentifier {
    type Error = ServerRegistryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServerIdentifier> for String {
    fn from(identifier: ServerIdentifier) -> Self {
        identifier.0
    }
}

impl AsRef<str> for ServerIdentifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ServerIdentifier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Software image a server instance runs, such as `thrones/skywars`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServerImage(String);

impl ServerImage {
    /// Creates a validated image name.
    ///
    /// # Errors
    ///
    /// Returns [`ServerRegistryDomainError::EmptyImage`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ServerRegistryDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ServerRegistryDomainError::EmptyImage);
        }
        Ok(Self(normalized))
    }

    /// Returns the image name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServerImage {
    type Error = ServerRegistryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServerImage> for String {
    fn from(image: ServerImage) -> Self {
        image.0
    }
}

impl fmt::Display for ServerImage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Game mode or variant served by an instance.
///
/// Used as an exact-match key by the matching query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerType(i32);

impl ServerType {
    /// Wraps a raw server type.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for ServerType {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
