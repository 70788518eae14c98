//! Error taxonomy for walk operations.
use thiserror::Error;

use crate::config::ConfigError;
use crate::planner::LegKind;
use crate::routing::RoutingError;

/// Boxed collaborator error carried by [`WalkError::Storage`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures surfaced by the walk controller and its components.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("unknown mood '{0}'")]
    InvalidMoodKey(String),
    #[error("walk distance must be a positive number of kilometres (got {0})")]
    InvalidDistance(f64),
    #[error("no walkable {leg} route was found")]
    RouteUnavailable { leg: LegKind },
    #[error("routing request failed: {0}")]
    Routing(#[from] RoutingError),
    #[error("no walk in progress; start a walk first")]
    NoActiveSession,
    #[error("walk log storage failed: {0}")]
    Storage(#[source] BoxedError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WalkError {
    pub(crate) fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }

    /// Whether the walker can retry the same action without restarting.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RouteUnavailable { .. } | Self::Routing(_))
    }
}
