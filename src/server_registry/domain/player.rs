//! Connected player value object.

use serde::{Deserialize, Serialize};

/// A player currently connected to a server instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    username: String,
    xuid: String,
}

impl Player {
    /// Creates a player entry.
    #[must_use]
    pub fn new(username: impl Into<String>, xuid: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            xuid: xuid.into(),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the Xbox user id.
    #[must_use]
    pub fn xuid(&self) -> &str {
        &self.xuid
    }
}
