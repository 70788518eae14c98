//! In-memory collaborators for tests and headless runs.
//!
//! Clones of [`MemoryStore`] and [`ManualClock`] share their state, so a test
//! can keep a handle while the controller owns another.
use chrono::{Duration, NaiveDateTime};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::rc::Rc;

use crate::clock::Clock;
use crate::geo::{Bounds, Coordinate};
use crate::geolocation::{GeolocationError, GeolocationProvider, PositionOptions};
use crate::map::{MapRenderer, RouteOverlay};
use crate::routing::{
    RouteCandidate, RouteGeometry, RouteRequest, RouteResponse, RoutingError, RoutingService,
};
use crate::walk_log::KeyValueStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Renderer call as seen by [`RecordingMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    Show(RouteOverlay),
    Clear,
    Fit(Bounds),
}

/// Renderer that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingMap {
    current: Option<RouteOverlay>,
    events: Vec<MapEvent>,
}

impl RecordingMap {
    /// Overlay currently on screen.
    #[must_use]
    pub const fn current(&self) -> Option<&RouteOverlay> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn events(&self) -> &[MapEvent] {
        &self.events
    }

    #[must_use]
    pub fn clears(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, MapEvent::Clear))
            .count()
    }

    #[must_use]
    pub fn last_bounds(&self) -> Option<Bounds> {
        self.events.iter().rev().find_map(|event| match event {
            MapEvent::Fit(bounds) => Some(*bounds),
            _ => None,
        })
    }
}

impl MapRenderer for RecordingMap {
    fn show_route(&mut self, overlay: &RouteOverlay) {
        self.current = Some(overlay.clone());
        self.events.push(MapEvent::Show(overlay.clone()));
    }

    fn clear_route(&mut self) {
        self.current = None;
        self.events.push(MapEvent::Clear);
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.events.push(MapEvent::Fit(bounds));
    }
}

/// Canned behaviour for one routing call.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterScript {
    /// One candidate whose geometry joins the waypoints directly.
    StraightLine,
    NoRoutes,
    Fail(RoutingError),
}

/// Router that replays scripted answers, then repeats a default one.
#[derive(Debug, Default)]
pub struct ScriptedRouter {
    fallback: Option<RouterScript>,
    queue: RefCell<VecDeque<RouterScript>>,
    requests: RefCell<Vec<RouteRequest>>,
}

impl ScriptedRouter {
    #[must_use]
    pub fn repeating(script: RouterScript) -> Self {
        Self {
            fallback: Some(script),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn straight_lines() -> Self {
        Self::repeating(RouterScript::StraightLine)
    }

    #[must_use]
    pub fn no_routes() -> Self {
        Self::repeating(RouterScript::NoRoutes)
    }

    #[must_use]
    pub fn failing(err: RoutingError) -> Self {
        Self::repeating(RouterScript::Fail(err))
    }

    /// Answer the next call with `script` before falling back.
    #[must_use]
    pub fn then(self, script: RouterScript) -> Self {
        self.queue.borrow_mut().push_back(script);
        self
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.borrow().clone()
    }
}

impl RoutingService for ScriptedRouter {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        self.requests.borrow_mut().push(request.clone());
        let script = self
            .queue
            .borrow_mut()
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or(RouterScript::NoRoutes);
        match script {
            RouterScript::StraightLine => Ok(RouteResponse {
                code: Some("Ok".to_string()),
                routes: vec![RouteCandidate {
                    geometry: RouteGeometry::line(&request.waypoints),
                    distance: None,
                    duration: None,
                }],
            }),
            RouterScript::NoRoutes => Ok(RouteResponse {
                code: Some("NoRoute".to_string()),
                routes: Vec::new(),
            }),
            RouterScript::Fail(err) => Err(err),
        }
    }
}

/// Geolocation provider with a fixed answer.
#[derive(Debug, Clone)]
pub struct FixedGeolocation {
    answer: Result<Coordinate, GeolocationError>,
    last_options: Cell<Option<PositionOptions>>,
}

impl FixedGeolocation {
    #[must_use]
    pub const fn at(position: Coordinate) -> Self {
        Self {
            answer: Ok(position),
            last_options: Cell::new(None),
        }
    }

    #[must_use]
    pub const fn failing(err: GeolocationError) -> Self {
        Self {
            answer: Err(err),
            last_options: Cell::new(None),
        }
    }

    /// Options passed on the most recent lookup.
    #[must_use]
    pub fn last_options(&self) -> Option<PositionOptions> {
        self.last_options.get()
    }
}

impl GeolocationProvider for FixedGeolocation {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        self.last_options.set(Some(options));
        self.answer.clone()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        self.now.set(at);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
