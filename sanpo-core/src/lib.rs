//! Sanpo Walk Engine
//!
//! Platform-agnostic core logic for Sanpo, a randomized walking-route generator.
//! This crate provides waypoint generation, leg planning, the walk session and
//! the walk log without UI or platform-specific dependencies. Location, routing,
//! map drawing, storage and time are reached through traits that each frontend
//! implements.

pub mod clock;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod geo;
pub mod geolocation;
pub mod map;
pub mod memory;
pub mod mood;
pub mod planner;
pub mod rng;
pub mod routing;
pub mod session;
pub mod walk_log;
pub mod waypoint;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, WalkConfig};
pub use controller::WalkController;
pub use error::{BoxedError, WalkError};
pub use geo::{Bounds, Coordinate};
pub use geolocation::{GeolocationError, GeolocationProvider, GeolocationResolver, PositionOptions};
pub use map::{MapRenderer, Marker, MarkerKind, RouteOverlay};
pub use mood::{MoodKey, MoodProfile};
pub use planner::{Destination, LegKind, LegPlan, RoutePlanner, plan_waypoints};
pub use rng::{FixedSource, RandomSource, SeededSource, SequenceSource};
pub use routing::{
    RouteCandidate, RouteGeometry, RouteRequest, RouteResponse, RoutingError, RoutingService,
};
pub use session::{WalkSession, WalkSessionState};
pub use walk_log::{KeyValueStore, LogRecorder, WalkLogEntry};
pub use waypoint::{generate_waypoint, generate_waypoint_for_key};
