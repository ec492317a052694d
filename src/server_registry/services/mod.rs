//! Application services for provisioning, tracking and matching servers.

mod matchmaking;

pub use matchmaking::{
    MatchmakingService, MatchmakingServiceError, MatchmakingServiceResult, ProvisionServerRequest,
};
