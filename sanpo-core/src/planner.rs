//! Leg planning: chain random checkpoints, route them, draw the result.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::WalkConfig;
use crate::constants::{HOPS_PER_LEG, OUTBOUND_ROUTE_COLOR, RETURN_ROUTE_COLOR, WAYPOINTS_PER_LEG};
use crate::error::WalkError;
use crate::geo::Coordinate;
use crate::map::{MapRenderer, RouteOverlay};
use crate::mood::MoodKey;
use crate::rng::RandomSource;
use crate::routing::{RouteRequest, RoutingService};
use crate::waypoint::generate_waypoint;

/// Direction of a leg within a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    Outbound,
    Return,
}

impl LegKind {
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Outbound => OUTBOUND_ROUTE_COLOR,
            Self::Return => RETURN_ROUTE_COLOR,
        }
    }

    #[must_use]
    pub const fn start_caption(self) -> &'static str {
        match self {
            Self::Outbound => "<b>Start</b><br>Your walk begins here!",
            Self::Return => "<b>Turnaround</b><br>Heading home another way.",
        }
    }

    #[must_use]
    pub const fn goal_caption(self) -> &'static str {
        match self {
            Self::Outbound => "<b>Goal!</b><br>Nice work!",
            Self::Return => "<b>Home</b><br>Welcome back!",
        }
    }
}

impl fmt::Display for LegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Outbound => "outbound",
            Self::Return => "return",
        })
    }
}

/// Where the last waypoint of a leg comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destination {
    /// A third random hop; used for the outbound leg.
    Generated,
    /// A known point; the return leg ends where the walk started.
    Fixed(Coordinate),
}

impl Destination {
    #[must_use]
    pub const fn leg_kind(self) -> LegKind {
        match self {
            Self::Generated => LegKind::Outbound,
            Self::Fixed(_) => LegKind::Return,
        }
    }
}

/// A routed and rendered leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegPlan {
    pub kind: LegKind,
    pub waypoints: [Coordinate; WAYPOINTS_PER_LEG],
    pub geometry: Vec<Coordinate>,
    /// Route length in metres, when the router reports it.
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
}

impl LegPlan {
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        self.waypoints[0]
    }

    #[must_use]
    pub const fn destination(&self) -> Coordinate {
        self.waypoints[WAYPOINTS_PER_LEG - 1]
    }

    #[must_use]
    pub const fn checkpoints(&self) -> [Coordinate; 2] {
        [self.waypoints[1], self.waypoints[2]]
    }
}

/// Distance budget for a single hop.
#[must_use]
pub fn hop_distance_km(total_distance_km: f64) -> f64 {
    total_distance_km / f64::from(HOPS_PER_LEG)
}

/// Pick the four waypoints of a leg. Consumes four draws for a fixed
/// destination and six for a generated one.
pub fn plan_waypoints(
    origin: Coordinate,
    destination: Destination,
    total_distance_km: f64,
    mood: MoodKey,
    rng: &mut (impl RandomSource + ?Sized),
) -> [Coordinate; WAYPOINTS_PER_LEG] {
    let hop = hop_distance_km(total_distance_km);
    let cp1 = generate_waypoint(origin, hop, mood, rng);
    let cp2 = generate_waypoint(cp1, hop, mood, rng);
    let last = match destination {
        Destination::Generated => generate_waypoint(cp2, hop, mood, rng),
        Destination::Fixed(point) => point,
    };
    [origin, cp1, cp2, last]
}

/// Routes legs through a [`RoutingService`] and draws them on a [`MapRenderer`].
#[derive(Debug)]
pub struct RoutePlanner<R, M> {
    router: R,
    map: M,
    router_base: String,
    config: WalkConfig,
}

impl<R: RoutingService, M: MapRenderer> RoutePlanner<R, M> {
    #[must_use]
    pub fn new(router: R, map: M, config: &WalkConfig) -> Self {
        Self {
            router,
            map,
            router_base: config.router_base().to_string(),
            config: config.clone(),
        }
    }

    /// Plan, route and render one leg.
    ///
    /// The map is only touched once a candidate route exists: the previous
    /// layer is cleared, the new overlay drawn, and the view fitted to it.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::Routing`] when the routing call fails and
    /// [`WalkError::RouteUnavailable`] when it yields no candidates.
    pub async fn plan_leg(
        &mut self,
        origin: Coordinate,
        destination: Destination,
        total_distance_km: f64,
        mood: MoodKey,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> Result<LegPlan, WalkError> {
        let kind = destination.leg_kind();
        let waypoints = plan_waypoints(origin, destination, total_distance_km, mood, rng);
        let request = RouteRequest::new(waypoints.to_vec(), &self.config);
        log::debug!("requesting {kind} route: {}", request.osrm_url(&self.router_base));

        let response = self.router.route(&request).await?;
        let Some(best) = response.routes.into_iter().next() else {
            log::warn!("router returned no {kind} route for {} waypoints", waypoints.len());
            return Err(WalkError::RouteUnavailable { leg: kind });
        };

        let overlay = RouteOverlay::for_leg(kind, &waypoints, best.geometry.clone());
        self.map.clear_route();
        self.map.show_route(&overlay);
        if let Some(bounds) = overlay.bounds() {
            self.map.fit_bounds(bounds);
        }

        Ok(LegPlan {
            kind,
            waypoints,
            geometry: best.geometry.points(),
            distance_m: best.distance,
            duration_s: best.duration,
        })
    }

    #[must_use]
    pub const fn router(&self) -> &R {
        &self.router
    }

    #[must_use]
    pub const fn map(&self) -> &M {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{RecordingMap, ScriptedRouter};
    use crate::rng::{FixedSource, SeededSource};
    use futures::executor::block_on;

    #[test]
    fn outbound_chain_matches_golden_fixture() {
        let origin = Coordinate::new(35.0, 135.0);
        let points = plan_waypoints(
            origin,
            Destination::Generated,
            3.0,
            MoodKey::Relax,
            &mut FixedSource(0.5),
        );
        let expected = [35.0, 34.9928, 34.9856, 34.9784];
        for (point, lat) in points.iter().zip(expected) {
            assert!((point.lat - lat).abs() < 1e-9, "{point} vs {lat}");
            assert!((point.lng - 135.0).abs() < 1e-9);
        }
    }

    #[test]
    fn return_leg_ends_at_the_fixed_point() {
        let goal = Coordinate::new(35.02, 135.03);
        let home = Coordinate::new(35.0, 135.0);
        let mut rng = SeededSource::new(11);
        let points = plan_waypoints(goal, Destination::Fixed(home), 2.0, MoodKey::City, &mut rng);
        assert_eq!(points[0], goal);
        assert_eq!(points[3], home);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn successful_leg_replaces_the_layer() {
        let router = ScriptedRouter::straight_lines();
        let mut planner = RoutePlanner::new(router, RecordingMap::default(), &WalkConfig::default());
        let plan = block_on(planner.plan_leg(
            Coordinate::new(35.0, 135.0),
            Destination::Generated,
            3.0,
            MoodKey::Adventure,
            &mut SeededSource::new(7),
        ))
        .unwrap();

        assert_eq!(plan.kind, LegKind::Outbound);
        assert_eq!(plan.geometry.len(), WAYPOINTS_PER_LEG);
        let map = planner.map();
        assert_eq!(map.clears(), 1);
        assert_eq!(map.current().map(|o| o.leg), Some(LegKind::Outbound));
        assert_eq!(map.current().map(|o| o.markers.len()), Some(4));
        assert!(map.last_bounds().is_some());
        assert_eq!(planner.router().requests().len(), 1);
    }

    #[test]
    fn empty_response_leaves_the_map_alone() {
        let mut planner = RoutePlanner::new(
            ScriptedRouter::no_routes(),
            RecordingMap::default(),
            &WalkConfig::default(),
        );
        let err = block_on(planner.plan_leg(
            Coordinate::new(35.0, 135.0),
            Destination::Fixed(Coordinate::new(35.1, 135.1)),
            3.0,
            MoodKey::City,
            &mut SeededSource::new(1),
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            WalkError::RouteUnavailable {
                leg: LegKind::Return
            }
        ));
        assert_eq!(planner.map().clears(), 0);
        assert!(planner.map().current().is_none());
    }
}
