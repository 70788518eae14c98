//! Centralized tuning constants for Sanpo walk logic.
//!
//! These values define the deterministic math of the waypoint generator and
//! the defaults of [`crate::config::WalkConfig`].

use crate::geo::Coordinate;

// Geography ----------------------------------------------------------------
/// Location used when the device cannot report one (Kochi, Japan).
pub const FALLBACK_LOCATION: Coordinate = Coordinate::new(33.5597, 133.5311);
/// Approximate degrees of latitude per kilometre (equatorial, flat-earth).
pub const DEGREES_PER_KM: f64 = 0.009;
/// Mean Earth radius used for great-circle checks.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

// Leg shape ----------------------------------------------------------------
/// Hops chained per leg: origin -> cp1 -> cp2 -> destination.
pub const HOPS_PER_LEG: u8 = 3;
/// Waypoints submitted to the router for a leg.
pub const WAYPOINTS_PER_LEG: usize = 4;

// Geolocation --------------------------------------------------------------
pub const GEOLOCATION_TIMEOUT_MS: u32 = 10_000;

// Routing ------------------------------------------------------------------
pub const OSRM_BASE_URL: &str = "https://router.project-osrm.org";
pub const OSRM_PROFILE: &str = "foot";
pub const ROUTING_TIMEOUT_MS: u32 = 15_000;

// Rendering ----------------------------------------------------------------
pub const OUTBOUND_ROUTE_COLOR: &str = "#ff6b6b";
pub const RETURN_ROUTE_COLOR: &str = "#4d96ff";
pub const ROUTE_LINE_WEIGHT: u8 = 6;

// Walk log -----------------------------------------------------------------
pub const WALK_LOG_KEY: &str = "walkLogs";
pub const RECENT_LOG_COUNT: usize = 5;
/// `chrono` format used for [`crate::walk_log::WalkLogEntry::date`].
pub const LOG_DATE_FORMAT: &str = "%Y/%m/%d %H:%M";
pub const MILLIS_PER_MINUTE: f64 = 60_000.0;
