//! Device location lookup with a guaranteed fallback.
use thiserror::Error;

use crate::config::WalkConfig;
use crate::geo::Coordinate;

/// Options handed to the platform location API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
}

impl PositionOptions {
    #[must_use]
    pub const fn from_config(cfg: &WalkConfig) -> Self {
        Self {
            high_accuracy: cfg.high_accuracy,
            timeout_ms: cfg.geolocation_timeout_ms,
        }
    }
}

/// Reasons a platform could not report a position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("geolocation is not supported on this device")]
    Unsupported,
    #[error("geolocation permission denied")]
    PermissionDenied,
    #[error("geolocation timed out")]
    Timeout,
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Platform-specific location capability.
#[allow(async_fn_in_trait)]
pub trait GeolocationProvider {
    /// Ask the platform for the current position.
    ///
    /// # Errors
    ///
    /// Returns a [`GeolocationError`] when no position can be obtained.
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinate, GeolocationError>;
}

/// Wraps a provider so that location lookups never fail.
#[derive(Debug, Clone)]
pub struct GeolocationResolver<P> {
    provider: P,
    options: PositionOptions,
    fallback: Coordinate,
}

impl<P: GeolocationProvider> GeolocationResolver<P> {
    #[must_use]
    pub const fn new(provider: P, cfg: &WalkConfig) -> Self {
        Self {
            provider,
            options: PositionOptions::from_config(cfg),
            fallback: cfg.fallback_location,
        }
    }

    /// Current position, or the configured fallback on any failure.
    pub async fn resolve_location(&self) -> Coordinate {
        match self.provider.current_position(self.options).await {
            Ok(position) => position,
            Err(err) => {
                log::warn!("{err}; using fallback location {}", self.fallback);
                self.fallback
            }
        }
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FALLBACK_LOCATION;
    use crate::memory::FixedGeolocation;
    use futures::executor::block_on;

    #[test]
    fn live_position_wins() {
        let here = Coordinate::new(35.68, 139.76);
        let resolver = GeolocationResolver::new(FixedGeolocation::at(here), &WalkConfig::default());
        assert_eq!(block_on(resolver.resolve_location()), here);
    }

    #[test]
    fn every_failure_falls_back() {
        let failures = [
            GeolocationError::Unsupported,
            GeolocationError::PermissionDenied,
            GeolocationError::Timeout,
            GeolocationError::Unavailable("no fix".into()),
        ];
        for failure in failures {
            let resolver =
                GeolocationResolver::new(FixedGeolocation::failing(failure), &WalkConfig::default());
            assert_eq!(block_on(resolver.resolve_location()), FALLBACK_LOCATION);
        }
    }

    #[test]
    fn options_follow_config() {
        let cfg = WalkConfig {
            geolocation_timeout_ms: 2_500,
            high_accuracy: false,
            ..WalkConfig::default()
        };
        let resolver = GeolocationResolver::new(
            FixedGeolocation::at(Coordinate::new(0.0, 0.0)),
            &cfg,
        );
        block_on(resolver.resolve_location());
        let seen = resolver.provider().last_options().expect("provider called");
        assert_eq!(
            seen,
            PositionOptions {
                high_accuracy: false,
                timeout_ms: 2_500
            }
        );
    }
}
