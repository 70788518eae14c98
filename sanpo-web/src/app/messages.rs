//! User-facing wording for action outcomes.
use sanpo_core::{LegKind, LegPlan, WalkError, WalkLogEntry};

use crate::components::notice::Notice;

pub const BUSY_MESSAGE: &str = "Hang on, the previous action is still running.";
pub const NOT_READY_MESSAGE: &str = "The map is still loading.";
pub const DISTANCE_MESSAGE: &str = "Enter a distance greater than 0 km.";

#[must_use]
pub fn error_notice(err: &WalkError) -> Notice {
    let message = match err {
        WalkError::RouteUnavailable {
            leg: LegKind::Outbound,
        } => "Couldn't find a walkable route. Try again.".to_string(),
        WalkError::RouteUnavailable {
            leg: LegKind::Return,
        } => "Couldn't find a different way home. Try again.".to_string(),
        WalkError::NoActiveSession => "Start a walk first.".to_string(),
        WalkError::InvalidDistance(_) => DISTANCE_MESSAGE.to_string(),
        WalkError::Routing(inner) => format!("The routing service is unavailable ({inner})."),
        WalkError::Storage(_) => "Your walk log could not be saved or read.".to_string(),
        other => other.to_string(),
    };
    Notice::error(message)
}

#[must_use]
pub fn plan_notice(plan: &LegPlan) -> Notice {
    let what = match plan.kind {
        LegKind::Outbound => "Route ready",
        LegKind::Return => "Way home ready",
    };
    match plan.distance_m {
        Some(metres) => Notice::info(format!("{what}: about {:.1} km.", metres / 1000.0)),
        None => Notice::info(format!("{what}.")),
    }
}

#[must_use]
pub fn finish_notice(entry: &WalkLogEntry) -> Notice {
    Notice::info(format!(
        "Walk logged: {} km in {} min.",
        entry.distance_km, entry.duration_minutes
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::notice::NoticeKind;
    use sanpo_core::{Coordinate, RoutingError};

    #[test]
    fn route_failures_name_the_leg() {
        let outbound = error_notice(&WalkError::RouteUnavailable {
            leg: LegKind::Outbound,
        });
        let back = error_notice(&WalkError::RouteUnavailable {
            leg: LegKind::Return,
        });
        assert_eq!(outbound.kind, NoticeKind::Error);
        assert!(outbound.message.contains("walkable route"));
        assert!(back.message.contains("way home"));
    }

    #[test]
    fn routing_errors_keep_the_cause() {
        let notice = error_notice(&WalkError::Routing(RoutingError::Timeout(15_000)));
        assert!(notice.message.contains("15000 ms"));
        assert_eq!(
            error_notice(&WalkError::NoActiveSession).message.as_str(),
            "Start a walk first."
        );
    }

    #[test]
    fn plan_notice_reports_router_distance() {
        let plan = LegPlan {
            kind: LegKind::Outbound,
            waypoints: [Coordinate::new(0.0, 0.0); 4],
            geometry: Vec::new(),
            distance_m: Some(3_240.0),
            duration_s: None,
        };
        assert_eq!(plan_notice(&plan).message.as_str(), "Route ready: about 3.2 km.");
        let unknown = LegPlan {
            distance_m: None,
            kind: LegKind::Return,
            ..plan
        };
        assert_eq!(plan_notice(&unknown).message.as_str(), "Way home ready.");
    }
}
