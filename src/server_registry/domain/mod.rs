//! Domain model for managed game-server instances.
//!
//! The server registry domain models instance identity, lifecycle state,
//! player capacity, and the partial updates instances report. Locking and
//! provisioning concerns remain outside this boundary.

mod error;
mod ids;
mod matching;
mod patch;
mod player;
mod server;
mod state;

pub use error::{
    InvalidServerStateOrdinal, ParseServerStateError, PatchField, PatchValidationError,
    ServerRegistryDomainError,
};
pub use ids::{ServerIdentifier, ServerImage, ServerType};
pub use matching::MatchOrder;
pub use patch::{ServerPatch, ValidatedServerPatch};
pub use player::Player;
pub use server::{NewServerRecord, ServerRecord};
pub use state::{ServerState, TransitionPolicy};
