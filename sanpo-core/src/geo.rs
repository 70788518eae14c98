//! Geographic primitives shared by the generator, planner and renderers.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::EARTH_RADIUS_KM;

/// A WGS-84 position in decimal degrees.
///
/// No range validation is performed; callers feed the values straight to a
/// geographic API which expects latitude in -90..90 and longitude in
/// -180..180.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Displace the coordinate by `delta_deg` degrees along `bearing_rad`,
    /// measured clockwise from north, on a flat plane.
    #[must_use]
    pub fn offset(self, bearing_rad: f64, delta_deg: f64) -> Self {
        Self {
            lat: self.lat + bearing_rad.cos() * delta_deg,
            lng: self.lng + bearing_rad.sin() * delta_deg,
        }
    }

    /// Straight-line distance in degrees, treating lat/lng as a plane.
    #[must_use]
    pub fn planar_distance_deg(self, other: Self) -> f64 {
        (other.lat - self.lat).hypot(other.lng - self.lng)
    }

    /// Great-circle distance in kilometres.
    #[must_use]
    pub fn haversine_km(self, other: Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let sin_dlat = (dlat / 2.0).sin();
        let sin_dlng = (dlng / 2.0).sin();

        let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }

    /// `lng,lat` text as expected by OSRM style routing URLs.
    #[must_use]
    pub fn lng_lat_pair(self) -> String {
        format!("{},{}", self.lng, self.lat)
    }

    /// Build from a GeoJSON `[lng, lat]` position.
    #[must_use]
    pub const fn from_lng_lat(position: [f64; 2]) -> Self {
        Self::new(position[1], position[0])
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

/// Axis-aligned box covering a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty input.
    #[must_use]
    pub fn covering<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for point in iter {
            bounds.extend(*point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: Coordinate) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }
}
