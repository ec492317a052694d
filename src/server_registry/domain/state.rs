//! Lifecycle state of a managed server instance.

use super::{InvalidServerStateOrdinal, ParseServerStateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a server record.
///
/// Serialized as its ordinal (`0..=3`) to stay wire compatible with existing
/// deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum ServerState {
    /// Instance exists but is not ready for players.
    Startup,
    /// Instance accepts players. The only state eligible for matching.
    Free,
    /// Instance is full or deliberately excluded from new matches.
    Busy,
    /// Instance is winding down and is usually removed next.
    Shutdown,
}

/// Rule set applied when a patch changes the lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionPolicy {
    /// Any state may be written from any other state.
    #[default]
    Permissive,
    /// Leaving `shutdown` or returning to `startup` is rejected.
    Strict,
}

impl ServerState {
    /// All states in ordinal order.
    pub const ALL: [Self; 4] = [Self::Startup, Self::Free, Self::Busy, Self::Shutdown];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Free => "free",
            Self::Busy => "busy",
            Self::Shutdown => "shutdown",
        }
    }

    /// Returns the wire ordinal.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Startup => 0,
            Self::Free => 1,
            Self::Busy => 2,
            Self::Shutdown => 3,
        }
    }

    /// Returns whether a record in this state may be matched.
    #[must_use]
    pub const fn accepts_players(self) -> bool {
        matches!(self, Self::Free)
    }

    /// Returns whether moving to `target` is allowed under `policy`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self, policy: TransitionPolicy) -> bool {
        match policy {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => !matches!(
                (self, target),
                (Self::Shutdown, Self::Startup | Self::Free | Self::Busy)
                    | (Self::Free | Self::Busy, Self::Startup)
            ),
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServerState {
    type Error = ParseServerStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "startup" => Ok(Self::Startup),
            "free" => Ok(Self::Free),
            "busy" => Ok(Self::Busy),
            "shutdown" => Ok(Self::Shutdown),
            _ => Err(ParseServerStateError(value.to_owned())),
        }
    }
}

impl TryFrom<i64> for ServerState {
    type Error = InvalidServerStateOrdinal;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Startup),
            1 => Ok(Self::Free),
            2 => Ok(Self::Busy),
            3 => Ok(Self::Shutdown),
            _ => Err(InvalidServerStateOrdinal(value)),
        }
    }
}

impl From<ServerState> for u8 {
    fn from(state: ServerState) -> Self {
        state.ordinal()
    }
}
