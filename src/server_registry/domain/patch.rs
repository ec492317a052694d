//! Partial updates to the mutable fields of a server record.
//!
//! A [`ServerPatch`] holds field values exactly as a transport decoded them.
//! [`ServerPatch::validate`] interprets every provided field up front and
//! yields a [`ValidatedServerPatch`], so a patch is either applied in full or
//! not at all.

use super::{PatchField, PatchValidationError, Player, ServerState};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw, unvalidated partial update of a server record.
///
/// Absent (or `null`) fields leave the stored value untouched. Integer
/// fields accept JSON numbers or decimal strings; `players` and `extras`
/// accept JSON values or strings holding encoded JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    players: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    players_max: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extras: Option<Value>,
}

impl ServerPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the connected players.
    #[must_use]
    pub fn with_players(self, players: impl IntoIterator<Item = Player>) -> Self {
        let encoded = players
            .into_iter()
            .map(|player| {
                let mut entry = Map::new();
                entry.insert("username".to_owned(), Value::from(player.username()));
                entry.insert("xuid".to_owned(), Value::from(player.xuid()));
                Value::Object(entry)
            })
            .collect();
        self.with_raw_field(PatchField::Players, Value::Array(encoded))
    }

    /// Sets the player capacity.
    #[must_use]
    pub fn with_players_max(self, players_max: u32) -> Self {
        self.with_raw_field(PatchField::PlayersMax, Value::from(players_max))
    }

    /// Sets the lifecycle state.
    #[must_use]
    pub fn with_state(self, state: ServerState) -> Self {
        self.with_raw_field(PatchField::State, Value::from(state.ordinal()))
    }

    /// Replaces the free-form metadata.
    #[must_use]
    pub fn with_extras(self, extras: Map<String, Value>) -> Self {
        self.with_raw_field(PatchField::Extras, Value::Object(extras))
    }

    /// Sets a field to an arbitrary, not yet validated value.
    ///
    /// A `null` value clears the field, leaving the stored value untouched
    /// when the patch is applied.
    #[must_use]
    pub fn with_raw_field(mut self, field: PatchField, value: Value) -> Self {
        let slot = match field {
            PatchField::Players => &mut self.players,
            PatchField::PlayersMax => &mut self.players_max,
            PatchField::State => &mut self.state,
            PatchField::Extras => &mut self.extras,
        };
        *slot = (!value.is_null()).then_some(value);
        self
    }

    /// Returns `true` when no field is provided.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.players.is_none()
            && self.players_max.is_none()
            && self.state.is_none()
            && self.extras.is_none()
    }

    /// Interprets every provided field.
    ///
    /// # Errors
    ///
    /// Returns [`PatchValidationError`] naming the first field, in the order
    /// `players`, `players_max`, `state`, `extras`, whose value has the wrong
    /// shape.
    pub fn validate(&self) -> Result<ValidatedServerPatch, PatchValidationError> {
        Ok(ValidatedServerPatch {
            players: self.players.as_ref().map(decode_players).transpose()?,
            players_max: self
                .players_max
                .as_ref()
                .map(decode_players_max)
                .transpose()?,
            state: self.state.as_ref().map(decode_state).transpose()?,
            extras: self.extras.as_ref().map(decode_extras).transpose()?,
        })
    }
}

/// A patch whose fields have all been checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedServerPatch {
    pub(super) players: Option<Vec<Player>>,
    pub(super) players_max: Option<u32>,
    pub(super) state: Option<ServerState>,
    pub(super) extras: Option<Map<String, Value>>,
}

impl ValidatedServerPatch {
    /// Returns the replacement player list, if any.
    #[must_use]
    pub fn players(&self) -> Option<&[Player]> {
        self.players.as_deref()
    }

    /// Returns the new capacity, if any.
    #[must_use]
    pub const fn players_max(&self) -> Option<u32> {
        self.players_max
    }

    /// Returns the new lifecycle state, if any.
    #[must_use]
    pub const fn state(&self) -> Option<ServerState> {
        self.state
    }

    /// Returns the replacement metadata, if any.
    #[must_use]
    pub const fn extras(&self) -> Option<&Map<String, Value>> {
        self.extras.as_ref()
    }
}

fn decode_players(value: &Value) -> Result<Vec<Player>, PatchValidationError> {
    let decoded = match value {
        Value::String(encoded) => serde_json::from_str(encoded),
        other => serde_json::from_value(other.clone()),
    };
    decoded.map_err(|err| PatchValidationError::new(PatchField::Players, err.to_string()))
}

fn decode_extras(value: &Value) -> Result<Map<String, Value>, PatchValidationError> {
    let decoded = match value {
        Value::String(encoded) => serde_json::from_str(encoded),
        other => serde_json::from_value(other.clone()),
    };
    decoded.map_err(|err| PatchValidationError::new(PatchField::Extras, err.to_string()))
}

fn decode_players_max(value: &Value) -> Result<u32, PatchValidationError> {
    let raw = decode_integer(PatchField::PlayersMax, value)?;
    u32::try_from(raw).map_err(|_| {
        PatchValidationError::new(
            PatchField::PlayersMax,
            format!("{raw} is not a valid non-negative capacity"),
        )
    })
}

fn decode_state(value: &Value) -> Result<ServerState, PatchValidationError> {
    let raw = decode_integer(PatchField::State, value)?;
    ServerState::try_from(raw)
        .map_err(|err| PatchValidationError::new(PatchField::State, err.to_string()))
}

fn decode_integer(field: PatchField, value: &Value) -> Result<i64, PatchValidationError> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| PatchValidationError::new(field, format!("{number} is not an integer"))),
        Value::String(text) => text.trim().parse::<i64>().map_err(|err| {
            PatchValidationError::new(field, format!("'{text}' is not an integer: {err}"))
        }),
        other => Err(PatchValidationError::new(
            field,
            format!("expected an integer, got {other}"),
        )),
    }
}
