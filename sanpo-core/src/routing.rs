//! Routing service contract and the OSRM wire format.
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::WalkConfig;
use crate::geo::Coordinate;

/// Failures of the routing collaborator itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("routing request timed out after {0} ms")]
    Timeout(u64),
    #[error("malformed routing response: {0}")]
    Decode(String),
}

/// Ordered waypoints to be joined by a walkable path.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub waypoints: Vec<Coordinate>,
    pub profile: String,
    pub timeout: Duration,
}

impl RouteRequest {
    #[must_use]
    pub fn new(waypoints: Vec<Coordinate>, cfg: &WalkConfig) -> Self {
        Self {
            waypoints,
            profile: cfg.router_profile.clone(),
            timeout: cfg.routing_timeout(),
        }
    }

    /// Full OSRM `route` URL against `base`, requesting GeoJSON geometry.
    #[must_use]
    pub fn osrm_url(&self, base: &str) -> String {
        let coords = self
            .waypoints
            .iter()
            .map(|c| c.lng_lat_pair())
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}/route/v1/{}/{coords}?overview=full&geometries=geojson",
            base.trim_end_matches('/'),
            self.profile
        )
    }

    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// GeoJSON line geometry as returned by OSRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(rename = "type", default = "RouteGeometry::default_kind")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteGeometry {
    fn default_kind() -> String {
        "LineString".to_string()
    }

    #[must_use]
    pub fn line(points: &[Coordinate]) -> Self {
        Self {
            kind: Self::default_kind(),
            coordinates: points.iter().map(|c| [c.lng, c.lat]).collect(),
        }
    }

    /// Geometry points as coordinates, in path order.
    #[must_use]
    pub fn points(&self) -> Vec<Coordinate> {
        self.coordinates
            .iter()
            .copied()
            .map(Coordinate::from_lng_lat)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub geometry: RouteGeometry,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Decoded routing response. Missing `routes` reads as no candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteCandidate>,
}

impl RouteResponse {
    /// Decode an OSRM JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Decode`] when the body is not a routing response.
    pub fn from_json(body: &str) -> Result<Self, RoutingError> {
        serde_json::from_str(body).map_err(|e| RoutingError::Decode(e.to_string()))
    }

    /// Decode an HTTP reply. A body that still parses as a routing response
    /// is used whatever the status, since OSRM reports `NoRoute` with 400.
    ///
    /// # Errors
    ///
    /// [`RoutingError::Transport`] naming the status for an undecodable
    /// non-2xx reply, otherwise [`RoutingError::Decode`].
    pub fn from_http(status: u16, body: &str) -> Result<Self, RoutingError> {
        match Self::from_json(body) {
            Ok(response) => Ok(response),
            Err(_) if !(200..300).contains(&status) => {
                Err(RoutingError::Transport(format!("HTTP {status}")))
            }
            Err(err) => Err(err),
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&RouteCandidate> {
        self.routes.first()
    }
}

/// Anything that can turn waypoints into a walkable path.
#[allow(async_fn_in_trait)]
pub trait RoutingService {
    /// Request candidate routes through `request.waypoints`.
    ///
    /// # Errors
    ///
    /// Returns a [`RoutingError`] on transport failure, timeout or an
    /// undecodable body. An empty candidate list is not an error here.
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_lists_lng_lat_pairs_in_order() {
        let request = RouteRequest::new(
            vec![Coordinate::new(35.0, 135.0), Coordinate::new(35.5, 135.25)],
            &WalkConfig::default(),
        );
        assert_eq!(
            request.osrm_url("https://router.example/"),
            "https://router.example/route/v1/foot/135,35;135.25,35.5?overview=full&geometries=geojson"
        );
        assert_eq!(request.timeout_ms(), 15_000);
    }

    #[test]
    fn decodes_osrm_body() {
        let body = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": { "type": "LineString", "coordinates": [[135.0, 35.0], [135.1, 35.1]] },
                "distance": 1523.4,
                "duration": 1100.0,
                "legs": []
            }],
            "waypoints": []
        }"#;
        let response = RouteResponse::from_json(body).unwrap();
        let first = response.first().unwrap();
        assert_eq!(first.geometry.points()[1], Coordinate::new(35.1, 135.1));
        assert_eq!(first.distance, Some(1523.4));
    }

    #[test]
    fn missing_routes_read_as_empty() {
        let response = RouteResponse::from_json(r#"{ "code": "NoRoute" }"#).unwrap();
        assert!(response.first().is_none());
        assert!(matches!(
            RouteResponse::from_json("<html>"),
            Err(RoutingError::Decode(_))
        ));
    }

    #[test]
    fn http_status_only_matters_for_undecodable_bodies() {
        let no_route = RouteResponse::from_http(400, r#"{ "code": "NoRoute", "routes": [] }"#)
            .unwrap();
        assert_eq!(no_route.code.as_deref(), Some("NoRoute"));
        assert!(no_route.first().is_none());

        assert_eq!(
            RouteResponse::from_http(502, "upstream down"),
            Err(RoutingError::Transport("HTTP 502".to_string()))
        );
        assert!(matches!(
            RouteResponse::from_http(200, "<html>"),
            Err(RoutingError::Decode(_))
        ));
    }
}
