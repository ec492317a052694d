//! Server record aggregate root.

use super::{
    PatchField, PatchValidationError, Player, ServerIdentifier, ServerImage, ServerState,
    ServerType, TransitionPolicy, ValidatedServerPatch,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameter object describing a freshly provisioned instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServerRecord {
    /// Unique record identifier.
    pub identifier: ServerIdentifier,
    /// Software image the instance runs.
    pub image: ServerImage,
    /// Game mode served by the instance.
    pub server_type: ServerType,
    /// Opaque container metadata from the provisioner.
    pub container: Value,
    /// Opaque network metadata from the provisioner.
    pub network: Value,
}

/// One managed game-server instance.
///
/// `players` is not required to fit within `players_max`: the registry does
/// not check cross-field relationships, keeping the two consistent is up to
/// whoever reports player changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    identifier: ServerIdentifier,
    image: ServerImage,
    players_max: u32,
    state: ServerState,
    #[serde(rename = "type")]
    server_type: ServerType,
    container: Value,
    network: Value,
    extras: Map<String, Value>,
    players: Vec<Player>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ServerRecord {
    /// Creates a record in the `startup` state with no capacity, no players
    /// and empty metadata.
    #[must_use]
    pub fn new(data: NewServerRecord, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            identifier: data.identifier,
            image: data.image,
            players_max: 0,
            state: ServerState::Startup,
            server_type: data.server_type,
            container: data.container,
            network: data.network,
            extras: Map::new(),
            players: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Sets the lifecycle state.
    #[must_use]
    pub const fn with_state(mut self, state: ServerState) -> Self {
        self.state = state;
        self
    }

    /// Sets the player capacity.
    #[must_use]
    pub const fn with_players_max(mut self, players_max: u32) -> Self {
        self.players_max = players_max;
        self
    }

    /// Replaces the connected players.
    #[must_use]
    pub fn with_players(mut self, players: impl IntoIterator<Item = Player>) -> Self {
        self.players = players.into_iter().collect();
        self
    }

    /// Replaces the free-form metadata.
    #[must_use]
    pub fn with_extras(mut self, extras: Map<String, Value>) -> Self {
        self.extras = extras;
        self
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn identifier(&self) -> &ServerIdentifier {
        &self.identifier
    }

    /// Returns the image name.
    #[must_use]
    pub fn image(&self) -> &str {
        self.image.as_str()
    }

    /// Returns the server type.
    #[must_use]
    pub const fn server_type(&self) -> ServerType {
        self.server_type
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ServerState {
        self.state
    }

    /// Returns the player capacity.
    #[must_use]
    pub const fn players_max(&self) -> u32 {
        self.players_max
    }

    /// Returns the connected players.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the free-form metadata.
    #[must_use]
    pub const fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }

    /// Returns the opaque container metadata.
    #[must_use]
    pub const fn container(&self) -> &Value {
        &self.container
    }

    /// Returns the opaque network metadata.
    #[must_use]
    pub const fn network(&self) -> &Value {
        &self.network
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the last applied patch.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns how many more players fit, negative when over capacity.
    #[must_use]
    pub fn remaining_capacity(&self) -> i64 {
        let connected = i64::try_from(self.players.len()).unwrap_or(i64::MAX);
        i64::from(self.players_max).saturating_sub(connected)
    }

    /// Returns whether this record can take `players_needed` players of
    /// `server_type` right now.
    #[must_use]
    pub fn matches(&self, server_type: ServerType, players_needed: i64) -> bool {
        self.server_type == server_type
            && self.state.accepts_players()
            && self.remaining_capacity() >= players_needed
    }

    /// Applies every field of a validated patch.
    ///
    /// # Errors
    ///
    /// Returns a [`PatchValidationError`] on [`PatchField::State`] when the
    /// state change is not allowed under `policy`. The record is left
    /// untouched in that case.
    pub fn apply_patch(
        &mut self,
        patch: ValidatedServerPatch,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<(), PatchValidationError> {
        let ValidatedServerPatch {
            players,
            players_max,
            state,
            extras,
        } = patch;

        if let Some(target) = state
            && !self.state.can_transition_to(target, policy)
        {
            return Err(PatchValidationError::new(
                PatchField::State,
                format!("transition {} -> {target} is not allowed", self.state),
            ));
        }

        let timestamp = clock.utc();
        if let Some(replacement) = players {
            self.players = replacement;
        }
        if let Some(capacity) = players_max {
            self.players_max = capacity;
        }
        if let Some(target) = state {
            self.state = target;
        }
        if let Some(replacement) = extras {
            self.extras = replacement;
        }
        self.updated_at = timestamp;
        Ok(())
    }
}
