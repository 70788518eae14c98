//! Map overlay description and the renderer seam.
//!
//! The planner describes what a leg looks like with plain data; concrete
//! renderers (Leaflet on the web, a recorder in tests) decide how to draw it.
use serde::Serialize;

use crate::constants::ROUTE_LINE_WEIGHT;
use crate::geo::{Bounds, Coordinate};
use crate::planner::LegKind;
use crate::routing::RouteGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Start,
    Checkpoint,
    Goal,
}

impl MarkerKind {
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Start => "🏁",
            Self::Checkpoint => "📍",
            Self::Goal => "🎉",
        }
    }

    /// CSS class applied to the icon element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Start => "custom-marker start-marker",
            Self::Checkpoint => "custom-marker checkpoint-marker",
            Self::Goal => "custom-marker goal-marker",
        }
    }

    /// Square icon edge in pixels.
    #[must_use]
    pub const fn icon_size(self) -> u16 {
        match self {
            Self::Start => 30,
            Self::Checkpoint => 26,
            Self::Goal => 34,
        }
    }

    /// Anchor point: horizontally centred, at the bottom edge.
    #[must_use]
    pub const fn icon_anchor(self) -> (u16, u16) {
        let size = self.icon_size();
        (size / 2, size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Coordinate,
    /// Popup text; may contain simple HTML.
    pub caption: String,
}

/// Everything needed to draw one leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverlay {
    pub leg: LegKind,
    pub color: &'static str,
    pub weight: u8,
    pub geometry: RouteGeometry,
    pub markers: Vec<Marker>,
}

impl RouteOverlay {
    /// Build the overlay for a leg routed through `waypoints`.
    #[must_use]
    pub fn for_leg(leg: LegKind, waypoints: &[Coordinate], geometry: RouteGeometry) -> Self {
        let last = waypoints.len().saturating_sub(1);
        let mut checkpoint = 0;
        let markers = waypoints
            .iter()
            .enumerate()
            .map(|(idx, position)| {
                let (kind, caption) = if idx == 0 {
                    (MarkerKind::Start, leg.start_caption().to_string())
                } else if idx == last {
                    (MarkerKind::Goal, leg.goal_caption().to_string())
                } else {
                    checkpoint += 1;
                    (MarkerKind::Checkpoint, format!("Checkpoint {checkpoint}"))
                };
                Marker {
                    kind,
                    position: *position,
                    caption,
                }
            })
            .collect();
        Self {
            leg,
            color: leg.color(),
            weight: ROUTE_LINE_WEIGHT,
            geometry,
            markers,
        }
    }

    /// Box covering the path and all markers.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let path = self.geometry.points();
        Bounds::covering(
            path.iter()
                .chain(self.markers.iter().map(|marker| &marker.position)),
        )
    }
}

/// Drawing surface for route overlays. At most one overlay is shown at a time.
pub trait MapRenderer {
    /// Draw `overlay` as the current route layer.
    fn show_route(&mut self, overlay: &RouteOverlay);
    /// Remove the current route layer, if any.
    fn clear_route(&mut self);
    fn fit_bounds(&mut self, bounds: Bounds);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_overlay() -> RouteOverlay {
        let waypoints = [
            Coordinate::new(35.0, 135.0),
            Coordinate::new(35.01, 135.0),
            Coordinate::new(35.02, 135.01),
            Coordinate::new(35.03, 135.01),
        ];
        let geometry = RouteGeometry::line(&[
            Coordinate::new(35.0, 135.0),
            Coordinate::new(35.04, 134.99),
        ]);
        RouteOverlay::for_leg(LegKind::Outbound, &waypoints, geometry)
    }

    #[test]
    fn markers_follow_waypoint_order() {
        let overlay = sample_overlay();
        let kinds: Vec<_> = overlay.markers.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            [
                MarkerKind::Start,
                MarkerKind::Checkpoint,
                MarkerKind::Checkpoint,
                MarkerKind::Goal
            ]
        );
        assert_eq!(overlay.markers[1].caption, "Checkpoint 1");
        assert_eq!(overlay.markers[2].caption, "Checkpoint 2");
        assert_eq!(overlay.color, "#ff6b6b");
        assert_eq!(overlay.weight, 6);
    }

    #[test]
    fn bounds_include_path_and_markers() {
        let bounds = sample_overlay().bounds().unwrap();
        assert_eq!(bounds.south_west, Coordinate::new(35.0, 134.99));
        assert_eq!(bounds.north_east, Coordinate::new(35.04, 135.01));
    }

    #[test]
    fn icons_anchor_at_bottom_centre() {
        assert_eq!(MarkerKind::Goal.icon_anchor(), (17, 34));
        assert_eq!(MarkerKind::Checkpoint.icon_anchor(), (13, 26));
        assert_eq!(MarkerKind::Start.glyph(), "🏁");
    }
}
