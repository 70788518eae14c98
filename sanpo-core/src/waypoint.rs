//! Randomized waypoint generation.
//!
//! Each hop picks a uniformly random base bearing, perturbs it within the
//! mood's angle window, and walks a fixed flat-earth distance derived from
//! the hop budget. Only the direction is random: the displacement magnitude
//! depends solely on the distance and the mood's rate.
use std::f64::consts::TAU;

use crate::constants::DEGREES_PER_KM;
use crate::error::WalkError;
use crate::geo::Coordinate;
use crate::mood::{MoodKey, MoodProfile};
use crate::rng::RandomSource;

/// Displacement in degrees for a hop of `leg_distance_km` under `profile`.
#[must_use]
pub fn hop_delta_deg(leg_distance_km: f64, profile: MoodProfile) -> f64 {
    leg_distance_km * profile.distance_rate * DEGREES_PER_KM
}

/// Travel bearing for one hop. Consumes two draws: the base bearing, then
/// the perturbation within `[-angle_range/2, angle_range/2)`.
pub fn draw_bearing(profile: MoodProfile, rng: &mut (impl RandomSource + ?Sized)) -> f64 {
    let base = rng.next_unit() * TAU;
    let spread = (rng.next_unit() - 0.5) * profile.angle_range;
    base + spread
}

/// Generate the next waypoint `leg_distance_km` away from `origin`.
pub fn generate_waypoint(
    origin: Coordinate,
    leg_distance_km: f64,
    mood: MoodKey,
    rng: &mut (impl RandomSource + ?Sized),
) -> Coordinate {
    let profile = mood.profile();
    let bearing = draw_bearing(profile, rng);
    let delta = hop_delta_deg(leg_distance_km, profile);
    let next = origin.offset(bearing, delta);
    log::debug!("waypoint {origin} -> {next} (mood {mood}, {leg_distance_km:.2} km)");
    next
}

/// Same as [`generate_waypoint`], for moods that arrive as text.
///
/// # Errors
///
/// Returns [`WalkError::InvalidMoodKey`] when `mood` is not a known key. No
/// draws are consumed in that case.
pub fn generate_waypoint_for_key(
    origin: Coordinate,
    leg_distance_km: f64,
    mood: &str,
    rng: &mut (impl RandomSource + ?Sized),
) -> Result<Coordinate, WalkError> {
    let mood: MoodKey = mood.parse()?;
    Ok(generate_waypoint(origin, leg_distance_km, mood, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedSource, SeededSource, SequenceSource};

    #[test]
    fn midpoint_draws_head_due_south() {
        let origin = Coordinate::new(35.0, 135.0);
        let next = generate_waypoint(origin, 1.0, MoodKey::Relax, &mut FixedSource(0.5));
        assert!((next.lat - 34.9928).abs() < 1e-9, "lat {}", next.lat);
        assert!((next.lng - 135.0).abs() < 1e-9, "lng {}", next.lng);
    }

    #[test]
    fn zero_draws_apply_the_full_negative_spread() {
        let origin = Coordinate::new(0.0, 0.0);
        let profile = MoodKey::City.profile();
        let bearing = draw_bearing(profile, &mut FixedSource(0.0));
        assert!((bearing + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let next = generate_waypoint(origin, 2.0, MoodKey::City, &mut FixedSource(0.0));
        assert!(next.lat.abs() < 1e-12);
        assert!((next.lng + 0.018).abs() < 1e-12);
    }

    #[test]
    fn magnitude_ignores_the_random_draws() {
        let origin = Coordinate::new(-12.0, 48.0);
        for mood in MoodKey::ALL {
            let expected = hop_delta_deg(2.5, mood.profile());
            let mut rng = SeededSource::new(99);
            for _ in 0..50 {
                let next = generate_waypoint(origin, 2.5, mood, &mut rng);
                let dist = origin.planar_distance_deg(next);
                assert!((dist - expected).abs() < 1e-9, "{mood}: {dist} vs {expected}");
            }
        }
    }

    #[test]
    fn zero_distance_stays_put() {
        let origin = Coordinate::new(1.0, 2.0);
        let next = generate_waypoint(origin, 0.0, MoodKey::Adventure, &mut SeededSource::new(5));
        assert_eq!(next, origin);
    }

    #[test]
    fn scripted_draws_consume_two_per_hop() {
        let mut seq = SequenceSource::new(vec![0.25, 0.5, 0.75, 0.5]);
        let origin = Coordinate::new(0.0, 0.0);
        let east = generate_waypoint(origin, 1.0, MoodKey::City, &mut seq);
        let west = generate_waypoint(origin, 1.0, MoodKey::City, &mut seq);
        assert!(east.lng > 0.0 && east.lat.abs() < 1e-12);
        assert!(west.lng < 0.0 && west.lat.abs() < 1e-12);
    }

    #[test]
    fn textual_moods_are_checked() {
        let mut rng = SeededSource::new(3);
        let origin = Coordinate::new(0.0, 0.0);
        assert!(generate_waypoint_for_key(origin, 1.0, "city", &mut rng).is_ok());
        let err = generate_waypoint_for_key(origin, 1.0, "lazy", &mut rng).unwrap_err();
        assert!(matches!(err, WalkError::InvalidMoodKey(_)));
        assert_eq!(rng.draws(), 2);
    }
}
