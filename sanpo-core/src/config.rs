//! Runtime configuration for geolocation, routing and the walk log.
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::constants;
use crate::geo::Coordinate;

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("invalid configuration JSON: {0}")]
    Parse(String),
}

/// Walk configuration. Every field falls back to its compiled default, so a
/// partial JSON document (or `{}`) is valid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    #[serde(default = "WalkConfig::default_fallback_location")]
    pub fallback_location: Coordinate,
    #[serde(default = "WalkConfig::default_geolocation_timeout_ms")]
    pub geolocation_timeout_ms: u32,
    #[serde(default = "WalkConfig::default_high_accuracy")]
    pub high_accuracy: bool,
    #[serde(default = "WalkConfig::default_router_base_url")]
    pub router_base_url: String,
    #[serde(default = "WalkConfig::default_router_profile")]
    pub router_profile: String,
    #[serde(default = "WalkConfig::default_routing_timeout_ms")]
    pub routing_timeout_ms: u32,
    #[serde(default = "WalkConfig::default_log_storage_key")]
    pub log_storage_key: String,
    #[serde(default = "WalkConfig::default_recent_log_count")]
    pub recent_log_count: usize,
}

impl WalkConfig {
    const fn default_fallback_location() -> Coordinate {
        constants::FALLBACK_LOCATION
    }

    const fn default_geolocation_timeout_ms() -> u32 {
        constants::GEOLOCATION_TIMEOUT_MS
    }

    const fn default_high_accuracy() -> bool {
        true
    }

    fn default_router_base_url() -> String {
        constants::OSRM_BASE_URL.to_string()
    }

    fn default_router_profile() -> String {
        constants::OSRM_PROFILE.to_string()
    }

    const fn default_routing_timeout_ms() -> u32 {
        constants::ROUTING_TIMEOUT_MS
    }

    fn default_log_storage_key() -> String {
        constants::WALK_LOG_KEY.to_string()
    }

    const fn default_recent_log_count() -> usize {
        constants::RECENT_LOG_COUNT
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error reported by [`WalkConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.router_base_url.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "router_base_url",
            });
        }
        if self.router_profile.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "router_profile",
            });
        }
        if self.log_storage_key.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "log_storage_key",
            });
        }
        Self::at_least("geolocation_timeout_ms", 1, u64::from(self.geolocation_timeout_ms))?;
        Self::at_least("routing_timeout_ms", 1, u64::from(self.routing_timeout_ms))?;
        Self::at_least(
            "recent_log_count",
            1,
            u64::try_from(self.recent_log_count).unwrap_or(u64::MAX),
        )?;
        Ok(())
    }

    fn at_least(field: &'static str, min: u64, value: u64) -> Result<(), ConfigError> {
        if value < min {
            return Err(ConfigError::MinViolation { field, min, value });
        }
        Ok(())
    }

    #[must_use]
    pub fn routing_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.routing_timeout_ms))
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn router_base(&self) -> &str {
        self.router_base_url.trim_end_matches('/')
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            fallback_location: Self::default_fallback_location(),
            geolocation_timeout_ms: Self::default_geolocation_timeout_ms(),
            high_accuracy: Self::default_high_accuracy(),
            router_base_url: Self::default_router_base_url(),
            router_profile: Self::default_router_profile(),
            routing_timeout_ms: Self::default_routing_timeout_ms(),
            log_storage_key: Self::default_log_storage_key(),
            recent_log_count: Self::default_recent_log_count(),
        }
    }
}
