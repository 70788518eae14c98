//! The single in-memory walk session.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::MILLIS_PER_MINUTE;
use crate::error::WalkError;
use crate::geo::Coordinate;
use crate::mood::MoodKey;
use crate::walk_log::WalkLogEntry;

/// Record of the active or most recently completed walk. Every field is
/// optional because the slot starts out empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalkSession {
    pub start: Option<Coordinate>,
    pub goal: Option<Coordinate>,
    pub mood: Option<MoodKey>,
    pub distance_km: Option<f64>,
    pub start_time: Option<NaiveDateTime>,
}

impl WalkSession {
    /// Start and goal, when an outbound leg has been committed.
    #[must_use]
    pub fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        Some((self.start?, self.goal?))
    }
}

/// Slot holding exactly one [`WalkSession`].
#[derive(Debug, Clone, Default)]
pub struct WalkSessionState {
    session: WalkSession,
}

impl WalkSessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> &WalkSession {
        &self.session
    }

    /// Replace the session with a freshly started walk. Any previous goal
    /// is dropped.
    pub fn begin(
        &mut self,
        mood: MoodKey,
        distance_km: f64,
        start: Coordinate,
        start_time: NaiveDateTime,
    ) {
        self.session = WalkSession {
            start: Some(start),
            goal: None,
            mood: Some(mood),
            distance_km: Some(distance_km),
            start_time: Some(start_time),
        };
    }

    pub fn record_goal(&mut self, goal: Coordinate) {
        self.session.goal = Some(goal);
    }

    /// Produce the log entry for a walk finishing at `now`.
    ///
    /// The session is left as is, so a return route can still be requested
    /// after finishing.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::NoActiveSession`] when no walk was started.
    pub fn finish(&self, now: NaiveDateTime) -> Result<WalkLogEntry, WalkError> {
        let start_time = self.session.start_time.ok_or(WalkError::NoActiveSession)?;
        let minutes = elapsed_minutes(start_time, now);
        Ok(WalkLogEntry::new(
            now,
            self.session.mood.map(MoodKey::as_str).unwrap_or_default(),
            self.session.distance_km.unwrap_or_default(),
            minutes,
        ))
    }
}

/// Whole minutes between two instants, rounded, never negative.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn elapsed_minutes(start: NaiveDateTime, end: NaiveDateTime) -> u64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis as f64 / MILLIS_PER_MINUTE).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn finish_without_start_fails() {
        let state = WalkSessionState::new();
        assert!(matches!(
            state.finish(at(9, 0, 0)),
            Err(WalkError::NoActiveSession)
        ));
    }

    #[test]
    fn begin_then_finish_is_zero_minutes() {
        let mut state = WalkSessionState::new();
        let t0 = at(9, 0, 0);
        state.begin(MoodKey::Relax, 3.0, Coordinate::new(35.0, 135.0), t0);
        let entry = state.finish(t0).unwrap();
        assert_eq!(entry.duration_minutes, 0);
        assert_eq!(entry.mood, "relax");
        assert_eq!(entry.date, "2024/04/01 09:00");
    }

    #[test]
    fn minutes_round_to_nearest() {
        let t0 = at(9, 0, 0);
        assert_eq!(elapsed_minutes(t0, at(9, 0, 29)), 0);
        assert_eq!(elapsed_minutes(t0, at(9, 0, 30)), 1);
        assert_eq!(elapsed_minutes(t0, at(9, 42, 10)), 42);
        assert_eq!(elapsed_minutes(t0, t0 - Duration::minutes(5)), 0);
    }

    #[test]
    fn begin_replaces_the_previous_walk() {
        let mut state = WalkSessionState::new();
        state.begin(MoodKey::City, 2.0, Coordinate::new(1.0, 1.0), at(8, 0, 0));
        state.record_goal(Coordinate::new(1.1, 1.1));
        assert!(state.current().endpoints().is_some());

        state.begin(MoodKey::Adventure, 5.0, Coordinate::new(2.0, 2.0), at(10, 0, 0));
        let session = state.current();
        assert_eq!(session.goal, None);
        assert_eq!(session.mood, Some(MoodKey::Adventure));
        assert!(session.endpoints().is_none());
    }

    #[test]
    fn finishing_keeps_the_session() {
        let mut state = WalkSessionState::new();
        state.begin(MoodKey::City, 2.0, Coordinate::new(1.0, 1.0), at(8, 0, 0));
        state.record_goal(Coordinate::new(1.1, 1.1));
        state.finish(at(8, 30, 0)).unwrap();
        assert!(state.current().endpoints().is_some());
    }
}
