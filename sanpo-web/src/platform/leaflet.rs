//! Leaflet map renderer.
//!
//! Leaflet is loaded by the host page as the global `L`; calls go through
//! `js_sys::Reflect` so no hand-written bindings are needed.
use js_sys::{Array, Function, Reflect};
use sanpo_core::{Bounds, Coordinate, MapRenderer, MarkerKind, RouteOverlay};
use serde::Serialize;
use serde_json::{Value, json};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_ZOOM: u8 = 13;

/// Handle to a mounted Leaflet map and its current route layer.
#[derive(Debug)]
pub struct LeafletMap {
    leaflet: JsValue,
    map: JsValue,
    route_layer: Option<JsValue>,
}

impl LeafletMap {
    /// Create the map inside the element `container_id`, centred on `center`.
    ///
    /// # Errors
    ///
    /// Returns an error when Leaflet is not loaded or rejects a call.
    pub fn mount(container_id: &str, center: Coordinate) -> Result<Self, JsValue> {
        let leaflet = Reflect::get(&js_sys::global(), &"L".into())?;
        if leaflet.is_undefined() {
            return Err(JsValue::from_str("Leaflet is not loaded"));
        }
        let map = invoke(&leaflet, "map", &Array::of1(&container_id.into()))?;
        invoke(
            &map,
            "setView",
            &Array::of2(&lat_lng(center), &DEFAULT_ZOOM.into()),
        )?;
        let tiles = invoke(
            &leaflet,
            "tileLayer",
            &Array::of2(
                &TILE_URL.into(),
                &js_object(&json!({ "attribution": TILE_ATTRIBUTION }))?,
            ),
        )?;
        invoke(&tiles, "addTo", &Array::of1(&map))?;
        Ok(Self {
            leaflet,
            map,
            route_layer: None,
        })
    }

    fn draw(&self, overlay: &RouteOverlay) -> Result<JsValue, JsValue> {
        let group = invoke(&self.leaflet, "layerGroup", &Array::new())?;
        invoke(&group, "addTo", &Array::of1(&self.map))?;

        let geometry = js_object(&overlay.geometry)?;
        let path = invoke(
            &self.leaflet,
            "geoJSON",
            &Array::of2(&geometry, &js_object(&path_style(overlay))?),
        )?;
        invoke(&path, "addTo", &Array::of1(&group))?;

        for marker in &overlay.markers {
            let icon = invoke(
                &self.leaflet,
                "divIcon",
                &Array::of1(&js_object(&icon_options(marker.kind))?),
            )?;
            let options = js_sys::Object::new();
            Reflect::set(&options, &"icon".into(), &icon)?;
            let pin = invoke(
                &self.leaflet,
                "marker",
                &Array::of2(&lat_lng(marker.position), &options),
            )?;
            invoke(&pin, "addTo", &Array::of1(&group))?;
            invoke(&pin, "bindPopup", &Array::of1(&marker.caption.as_str().into()))?;
        }
        Ok(group)
    }
}

impl MapRenderer for LeafletMap {
    fn show_route(&mut self, overlay: &RouteOverlay) {
        match self.draw(overlay) {
            Ok(layer) => self.route_layer = Some(layer),
            Err(err) => log::error!("failed to draw {} route: {}", overlay.leg, dom::js_error_message(&err)),
        }
    }

    fn clear_route(&mut self) {
        if let Some(layer) = self.route_layer.take()
            && let Err(err) = invoke(&self.map, "removeLayer", &Array::of1(&layer))
        {
            log::error!("failed to clear route: {}", dom::js_error_message(&err));
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        let corners = Array::of2(&lat_lng(bounds.south_west), &lat_lng(bounds.north_east));
        if let Err(err) = invoke(&self.map, "fitBounds", &Array::of1(&corners)) {
            log::error!("failed to fit bounds: {}", dom::js_error_message(&err));
        }
    }
}

fn invoke(target: &JsValue, method: &str, args: &Array) -> Result<JsValue, JsValue> {
    let function: Function = Reflect::get(target, &method.into())?.dyn_into()?;
    Reflect::apply(&function, target, args)
}

/// Plain JS object (not a `Map`) for Leaflet option arguments.
fn js_object<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn lat_lng(point: Coordinate) -> JsValue {
    Array::of2(&point.lat.into(), &point.lng.into()).into()
}

/// `L.geoJSON` options for a leg's path.
#[must_use]
pub fn path_style(overlay: &RouteOverlay) -> Value {
    json!({ "style": { "weight": overlay.weight, "color": overlay.color } })
}

/// `L.divIcon` options for a marker kind.
#[must_use]
pub fn icon_options(kind: MarkerKind) -> Value {
    let size = kind.icon_size();
    let (anchor_x, anchor_y) = kind.icon_anchor();
    json!({
        "className": kind.class_name(),
        "html": kind.glyph(),
        "iconSize": [size, size],
        "iconAnchor": [anchor_x, anchor_y],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanpo_core::{LegKind, RouteGeometry};

    #[test]
    fn return_path_uses_the_blue_line() {
        let waypoints = [Coordinate::new(1.0, 1.0), Coordinate::new(1.1, 1.1)];
        let overlay =
            RouteOverlay::for_leg(LegKind::Return, &waypoints, RouteGeometry::line(&waypoints));
        assert_eq!(
            path_style(&overlay),
            json!({ "style": { "weight": 6, "color": "#4d96ff" } })
        );
    }

    #[test]
    fn icon_options_match_marker_kind() {
        let options = icon_options(MarkerKind::Start);
        assert_eq!(options["html"], "🏁");
        assert_eq!(options["iconSize"], json!([30, 30]));
        assert_eq!(options["iconAnchor"], json!([15, 30]));
        assert_eq!(options["className"], "custom-marker start-marker");
    }
}
