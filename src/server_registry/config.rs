//! Registry behaviour configuration.

use super::domain::{MatchOrder, TransitionPolicy};

/// Configuration for an in-memory server registry.
///
/// # Examples
///
/// ```
/// use matchmaking::server_registry::{
///     config::RegistryConfig,
///     domain::{MatchOrder, TransitionPolicy},
/// };
///
/// let config = RegistryConfig::default();
/// assert_eq!(config.transition_policy, TransitionPolicy::Permissive);
/// assert_eq!(config.match_order, MatchOrder::Identifier);
///
/// let strict = RegistryConfig::strict();
/// assert_eq!(strict.transition_policy, TransitionPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryConfig {
    /// Rules applied when a patch changes the lifecycle state.
    pub transition_policy: TransitionPolicy,
    /// Ordering of matching query results.
    pub match_order: MatchOrder,
}

impl RegistryConfig {
    /// Creates a configuration that accepts any state change.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            transition_policy: TransitionPolicy::Permissive,
            match_order: MatchOrder::Identifier,
        }
    }

    /// Creates a configuration that rejects leaving `shutdown` and returning
    /// to `startup`.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            transition_policy: TransitionPolicy::Strict,
            match_order: MatchOrder::Identifier,
        }
    }

    /// Sets the match ordering.
    #[must_use]
    pub const fn with_match_order(mut self, match_order: MatchOrder) -> Self {
        self.match_order = match_order;
        self
    }
}
