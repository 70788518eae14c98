//! Walk orchestration: the three user actions and the history view.
use crate::clock::Clock;
use crate::config::WalkConfig;
use crate::error::WalkError;
use crate::geolocation::{GeolocationProvider, GeolocationResolver};
use crate::map::MapRenderer;
use crate::mood::MoodKey;
use crate::planner::{Destination, LegPlan, RoutePlanner};
use crate::rng::RandomSource;
use crate::routing::RoutingService;
use crate::session::{WalkSession, WalkSessionState};
use crate::walk_log::{KeyValueStore, LogRecorder, WalkLogEntry};

/// Owns the session and every collaborator a walk needs.
///
/// Mutating actions take `&mut self`, which keeps one action in flight at a
/// time even across await points.
pub struct WalkController<G, R, M, S, C> {
    config: WalkConfig,
    resolver: GeolocationResolver<G>,
    planner: RoutePlanner<R, M>,
    recorder: LogRecorder<S>,
    clock: C,
    rng: Box<dyn RandomSource>,
    session: WalkSessionState,
}

impl<G, R, M, S, C> WalkController<G, R, M, S, C>
where
    G: GeolocationProvider,
    R: RoutingService,
    M: MapRenderer,
    S: KeyValueStore,
    C: Clock,
{
    /// Wire up a controller.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::Config`] when `config` fails validation.
    pub fn new(
        config: WalkConfig,
        geolocation: G,
        router: R,
        map: M,
        store: S,
        clock: C,
        rng: impl RandomSource + 'static,
    ) -> Result<Self, WalkError> {
        config.validate()?;
        Ok(Self {
            resolver: GeolocationResolver::new(geolocation, &config),
            planner: RoutePlanner::new(router, map, &config),
            recorder: LogRecorder::new(store, config.log_storage_key.clone()),
            clock,
            rng: Box::new(rng),
            session: WalkSessionState::new(),
            config,
        })
    }

    /// Locate the walker and plan a fresh outbound leg.
    ///
    /// The session is only replaced once the route comes back, so a failed
    /// attempt leaves the previous walk intact.
    ///
    /// # Errors
    ///
    /// [`WalkError::InvalidDistance`] for a non-positive or non-finite
    /// distance, otherwise whatever [`RoutePlanner::plan_leg`] reports.
    pub async fn start_walk(
        &mut self,
        mood: MoodKey,
        distance_km: f64,
    ) -> Result<LegPlan, WalkError> {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(WalkError::InvalidDistance(distance_km));
        }
        let start = self.resolver.resolve_location().await;
        let start_time = self.clock.now();
        let plan = self
            .planner
            .plan_leg(start, Destination::Generated, distance_km, mood, self.rng.as_mut())
            .await?;

        self.session.begin(mood, distance_km, start, start_time);
        self.session.record_goal(plan.destination());
        log::info!(
            "walk started at {start}: {mood}, {distance_km} km, goal {}",
            plan.destination()
        );
        Ok(plan)
    }

    /// [`Self::start_walk`] for a mood given as text.
    ///
    /// # Errors
    ///
    /// [`WalkError::InvalidMoodKey`] for an unknown mood, then as
    /// [`Self::start_walk`].
    pub async fn start_walk_with_key(
        &mut self,
        mood: &str,
        distance_km: f64,
    ) -> Result<LegPlan, WalkError> {
        let mood: MoodKey = mood.parse()?;
        self.start_walk(mood, distance_km).await
    }

    /// Plan a different way back from the goal to the start.
    ///
    /// # Errors
    ///
    /// [`WalkError::NoActiveSession`] until an outbound leg has been
    /// committed, otherwise whatever [`RoutePlanner::plan_leg`] reports.
    pub async fn plan_return(&mut self) -> Result<LegPlan, WalkError> {
        let session = self.session.current();
        let (start, goal) = session.endpoints().ok_or(WalkError::NoActiveSession)?;
        let mood = session.mood.ok_or(WalkError::NoActiveSession)?;
        let distance_km = session.distance_km.ok_or(WalkError::NoActiveSession)?;

        let plan = self
            .planner
            .plan_leg(goal, Destination::Fixed(start), distance_km, mood, self.rng.as_mut())
            .await?;
        log::info!("return route planned from {goal} to {start}");
        Ok(plan)
    }

    /// Close the walk and append it to the history.
    ///
    /// # Errors
    ///
    /// [`WalkError::NoActiveSession`] if no walk was started and
    /// [`WalkError::Storage`] if the log cannot be updated.
    pub fn finish_walk(&mut self) -> Result<WalkLogEntry, WalkError> {
        let entry = self.session.finish(self.clock.now())?;
        self.recorder.append_log(entry.clone())?;
        log::info!(
            "walk finished: {} min, {} km ({})",
            entry.duration_minutes,
            entry.distance_km,
            entry.mood
        );
        Ok(entry)
    }

    /// Up to `n` most recent walks, newest first.
    ///
    /// # Errors
    ///
    /// [`WalkError::Storage`] if the stored history cannot be read.
    pub fn recent_logs(&self, n: usize) -> Result<Vec<WalkLogEntry>, WalkError> {
        self.recorder.list_recent(n)
    }

    /// [`Self::recent_logs`] with the configured count.
    ///
    /// # Errors
    ///
    /// Same as [`Self::recent_logs`].
    pub fn recent_logs_default(&self) -> Result<Vec<WalkLogEntry>, WalkError> {
        self.recent_logs(self.config.recent_log_count)
    }

    #[must_use]
    pub const fn session(&self) -> &WalkSession {
        self.session.current()
    }

    #[must_use]
    pub const fn config(&self) -> &WalkConfig {
        &self.config
    }

    #[must_use]
    pub const fn map(&self) -> &M {
        self.planner.map()
    }

    #[must_use]
    pub const fn router(&self) -> &R {
        self.planner.router()
    }

    #[must_use]
    pub const fn recorder(&self) -> &LogRecorder<S> {
        &self.recorder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::geolocation::{GeolocationError, PositionOptions};
    use crate::memory::{FixedGeolocation, ManualClock, MemoryStore, RecordingMap, ScriptedRouter};
    use crate::rng::SeededSource;
    use chrono::{Duration, NaiveDate};
    use futures::executor::block_on;

    type TestController =
        WalkController<FixedGeolocation, ScriptedRouter, RecordingMap, MemoryStore, ManualClock>;

    fn controller(router: ScriptedRouter) -> (TestController, ManualClock) {
        let clock = ManualClock::new(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(6, 30, 0)
                .unwrap(),
        );
        let controller = WalkController::new(
            WalkConfig::default(),
            FixedGeolocation::at(Coordinate::new(35.0, 135.0)),
            router,
            RecordingMap::default(),
            MemoryStore::default(),
            clock.clone(),
            SeededSource::new(42),
        )
        .unwrap();
        (controller, clock)
    }

    #[test]
    fn rejects_bad_distances_before_locating() {
        let (mut walk, _) = controller(ScriptedRouter::straight_lines());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = block_on(walk.start_walk(MoodKey::City, bad)).unwrap_err();
            assert!(matches!(err, WalkError::InvalidDistance(_)));
        }
        assert!(walk.router().requests().is_empty());
        assert_eq!(walk.session(), &WalkSession::default());
    }

    #[test]
    fn full_walk_lands_in_the_log() {
        let (mut walk, clock) = controller(ScriptedRouter::straight_lines());
        let outbound = block_on(walk.start_walk(MoodKey::City, 3.0)).unwrap();
        assert_eq!(walk.session().goal, Some(outbound.destination()));

        let back = block_on(walk.plan_return()).unwrap();
        assert_eq!(back.origin(), outbound.destination());
        assert_eq!(back.destination(), Coordinate::new(35.0, 135.0));

        clock.advance(Duration::minutes(47));
        let entry = walk.finish_walk().unwrap();
        assert_eq!(entry.duration_minutes, 47);
        assert_eq!(entry.date, "2024/06/01 07:17");
        assert_eq!(walk.recent_logs_default().unwrap(), vec![entry]);
    }

    #[test]
    fn return_requires_an_outbound_leg() {
        let (mut walk, _) = controller(ScriptedRouter::straight_lines());
        assert!(matches!(
            block_on(walk.plan_return()),
            Err(WalkError::NoActiveSession)
        ));
        assert!(matches!(walk.finish_walk(), Err(WalkError::NoActiveSession)));
    }

    #[test]
    fn textual_mood_is_validated() {
        let (mut walk, _) = controller(ScriptedRouter::straight_lines());
        assert!(matches!(
            block_on(walk.start_walk_with_key("sprint", 2.0)),
            Err(WalkError::InvalidMoodKey(_))
        ));
        assert!(block_on(walk.start_walk_with_key("adventure", 2.0)).is_ok());
    }

    struct SlowFix {
        clock: ManualClock,
        at: Coordinate,
    }

    impl GeolocationProvider for SlowFix {
        async fn current_position(
            &self,
            _options: PositionOptions,
        ) -> Result<Coordinate, GeolocationError> {
            self.clock.advance(Duration::seconds(9));
            Ok(self.at)
        }
    }

    #[test]
    fn location_wait_is_not_part_of_the_walk() {
        let clock = ManualClock::new(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(6, 30, 0)
                .unwrap(),
        );
        let mut walk = WalkController::new(
            WalkConfig::default(),
            SlowFix {
                clock: clock.clone(),
                at: Coordinate::new(35.0, 135.0),
            },
            ScriptedRouter::straight_lines(),
            RecordingMap::default(),
            MemoryStore::default(),
            clock.clone(),
            SeededSource::new(7),
        )
        .unwrap();

        block_on(walk.start_walk(MoodKey::Relax, 2.0)).unwrap();
        assert_eq!(
            walk.session().start_time,
            Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(6, 30, 9).unwrap())
        );
        clock.advance(Duration::seconds(20));
        assert_eq!(walk.finish_walk().unwrap().duration_minutes, 0);
    }
}
