//! Scripted walk scenarios.
//!
//! Every scenario drives a [`WalkController`] wired to the in-memory
//! collaborators from `sanpo_core::memory`, so runs are hermetic and a seed
//! fully determines the waypoints.
use anyhow::{Context, Result, bail, ensure};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use futures::executor::block_on;
use sanpo_core::constants::{DEGREES_PER_KM, OUTBOUND_ROUTE_COLOR};
use sanpo_core::memory::{
    FixedGeolocation, ManualClock, MemoryStore, RecordingMap, RouterScript, ScriptedRouter,
};
use sanpo_core::{
    Destination, GeolocationError, LegKind, MoodKey, SeededSource, WalkConfig, WalkController,
    WalkError, plan_waypoints, planner::hop_distance_km,
};

type HeadlessController =
    WalkController<FixedGeolocation, ScriptedRouter, RecordingMap, MemoryStore, ManualClock>;

pub type Check = fn(&WalkConfig, u64) -> Result<()>;

pub struct WalkScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub check: Check,
}

const SCENARIOS: &[WalkScenario] = &[
    WalkScenario {
        name: "smoke",
        description: "Start, return and finish one walk",
        check: smoke,
    },
    WalkScenario {
        name: "deterministic-waypoints",
        description: "Same seed yields the same waypoints for every mood",
        check: deterministic_waypoints,
    },
    WalkScenario {
        name: "distance-scaling",
        description: "Every hop covers exactly its distance budget",
        check: distance_scaling,
    },
    WalkScenario {
        name: "route-unavailable",
        description: "An empty routing answer leaves map and session alone",
        check: route_unavailable,
    },
    WalkScenario {
        name: "return-failure",
        description: "A failed way home keeps the outbound route on screen",
        check: return_failure,
    },
    WalkScenario {
        name: "no-active-session",
        description: "Return and finish are refused before a walk starts",
        check: no_active_session,
    },
    WalkScenario {
        name: "location-fallback",
        description: "Denied geolocation starts from the fallback location",
        check: location_fallback,
    },
    WalkScenario {
        name: "log-history",
        description: "Recent walks come back newest first and capped",
        check: log_history,
    },
];

pub fn get_scenario(name: &str) -> Option<&'static WalkScenario> {
    SCENARIOS.iter().find(|s| s.name == name)
}

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.name, s.description))
}

pub fn scenario_names() -> Vec<String> {
    SCENARIOS.iter().map(|s| s.name.to_string()).collect()
}

fn morning() -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 4, 1)
        .and_then(|day| day.and_hms_opt(9, 0, 0))
        .context("invalid scenario start time")
}

struct Harness {
    controller: HeadlessController,
    clock: ManualClock,
}

fn harness(
    config: &WalkConfig,
    geolocation: FixedGeolocation,
    router: ScriptedRouter,
    seed: u64,
) -> Result<Harness> {
    let clock = ManualClock::new(morning()?);
    let controller = WalkController::new(
        config.clone(),
        geolocation,
        router,
        RecordingMap::default(),
        MemoryStore::default(),
        clock.clone(),
        SeededSource::new(seed),
    )?;
    Ok(Harness { controller, clock })
}

fn located(config: &WalkConfig) -> FixedGeolocation {
    FixedGeolocation::at(config.fallback_location)
}

fn smoke(config: &WalkConfig, seed: u64) -> Result<()> {
    let Harness {
        mut controller,
        clock,
    } = harness(config, located(config), ScriptedRouter::straight_lines(), seed)?;

    let outbound = block_on(controller.start_walk(MoodKey::City, 3.0))?;
    ensure!(outbound.kind == LegKind::Outbound, "first leg was {}", outbound.kind);
    ensure!(
        controller.session().goal == Some(outbound.destination()),
        "goal not recorded"
    );

    let back = block_on(controller.plan_return())?;
    ensure!(
        back.destination() == outbound.origin(),
        "return leg ends at {} instead of {}",
        back.destination(),
        outbound.origin()
    );

    clock.advance(Duration::minutes(42));
    let entry = controller.finish_walk()?;
    ensure!(entry.duration_minutes == 42, "logged {} minutes", entry.duration_minutes);
    ensure!(entry.mood == "city", "logged mood {}", entry.mood);

    let logs = controller.recent_logs_default()?;
    ensure!(logs.len() == 1, "expected one log entry, found {}", logs.len());
    Ok(())
}

fn deterministic_waypoints(config: &WalkConfig, seed: u64) -> Result<()> {
    let origin = config.fallback_location;
    for mood in MoodKey::ALL {
        let first = plan_waypoints(
            origin,
            Destination::Generated,
            4.0,
            mood,
            &mut SeededSource::new(seed),
        );
        let second = plan_waypoints(
            origin,
            Destination::Generated,
            4.0,
            mood,
            &mut SeededSource::new(seed),
        );
        ensure!(first == second, "{mood} waypoints differ for seed {seed}");
        ensure!(first[0] == origin, "{mood} leg does not start at the origin");
    }
    Ok(())
}

fn distance_scaling(config: &WalkConfig, seed: u64) -> Result<()> {
    let mut rng = SeededSource::new(seed);
    for mood in MoodKey::ALL {
        for total_km in [0.5, 3.0, 10.0] {
            let waypoints = plan_waypoints(
                config.fallback_location,
                Destination::Generated,
                total_km,
                mood,
                &mut rng,
            );
            let expected = hop_distance_km(total_km) * mood.profile().distance_rate * DEGREES_PER_KM;
            for pair in waypoints.windows(2) {
                let hop = pair[0].planar_distance_deg(pair[1]);
                ensure!(
                    (hop - expected).abs() < 1e-9,
                    "{mood} hop at {total_km} km measured {hop} deg, expected {expected}"
                );
            }
        }
    }
    Ok(())
}

fn route_unavailable(config: &WalkConfig, seed: u64) -> Result<()> {
    let Harness { mut controller, .. } =
        harness(config, located(config), ScriptedRouter::no_routes(), seed)?;

    match block_on(controller.start_walk(MoodKey::Relax, 2.0)) {
        Err(WalkError::RouteUnavailable {
            leg: LegKind::Outbound,
        }) => {}
        Err(other) => bail!("unexpected error: {other}"),
        Ok(_) => bail!("walk started without a route"),
    }
    ensure!(controller.map().events().is_empty(), "map was touched");
    ensure!(controller.session().start.is_none(), "session was committed");
    Ok(())
}

fn return_failure(config: &WalkConfig, seed: u64) -> Result<()> {
    let router = ScriptedRouter::no_routes().then(RouterScript::StraightLine);
    let Harness { mut controller, .. } = harness(config, located(config), router, seed)?;

    let outbound = block_on(controller.start_walk(MoodKey::Adventure, 5.0))?;
    let result = block_on(controller.plan_return());
    ensure!(
        matches!(
            result,
            Err(WalkError::RouteUnavailable {
                leg: LegKind::Return
            })
        ),
        "return leg should be unavailable"
    );

    let shown = controller.map().current().context("map lost its route")?;
    ensure!(shown.color == OUTBOUND_ROUTE_COLOR, "map shows the {} leg", shown.leg);
    ensure!(
        controller.session().goal == Some(outbound.destination()),
        "goal changed after a failed return"
    );
    Ok(())
}

fn no_active_session(config: &WalkConfig, seed: u64) -> Result<()> {
    let Harness { mut controller, .. } =
        harness(config, located(config), ScriptedRouter::straight_lines(), seed)?;

    ensure!(
        matches!(
            block_on(controller.plan_return()),
            Err(WalkError::NoActiveSession)
        ),
        "return planned without a walk"
    );
    ensure!(
        matches!(controller.finish_walk(), Err(WalkError::NoActiveSession)),
        "finished a walk that never started"
    );
    ensure!(controller.recent_logs_default()?.is_empty(), "log not empty");
    Ok(())
}

fn location_fallback(config: &WalkConfig, seed: u64) -> Result<()> {
    let Harness { mut controller, .. } = harness(
        config,
        FixedGeolocation::failing(GeolocationError::PermissionDenied),
        ScriptedRouter::straight_lines(),
        seed,
    )?;

    let plan = block_on(controller.start_walk(MoodKey::City, 1.5))?;
    ensure!(
        plan.origin() == config.fallback_location,
        "walk started at {} instead of the fallback",
        plan.origin()
    );
    Ok(())
}

fn log_history(config: &WalkConfig, seed: u64) -> Result<()> {
    let Harness {
        mut controller,
        clock,
    } = harness(config, located(config), ScriptedRouter::straight_lines(), seed)?;

    let walks = config.recent_log_count + 2;
    for minutes in 1..=walks {
        block_on(controller.start_walk(MoodKey::Relax, 1.0))?;
        clock.advance(Duration::minutes(i64::try_from(minutes)?));
        controller.finish_walk()?;
        clock.advance(Duration::hours(1));
    }

    let recent = controller.recent_logs_default()?;
    ensure!(
        recent.len() == config.recent_log_count,
        "expected {} recent walks, got {}",
        config.recent_log_count,
        recent.len()
    );
    let durations: Vec<u64> = recent.iter().map(|e| e.duration_minutes).collect();
    ensure!(
        durations.windows(2).all(|w| w[0] > w[1]),
        "recent walks not newest first: {durations:?}"
    );
    ensure!(
        durations.first() == Some(&u64::try_from(walks)?),
        "newest walk missing: {durations:?}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scenario_passes_on_defaults() {
        let config = WalkConfig::default();
        for scenario in SCENARIOS {
            for seed in [1, 1337, 0xdead_beef] {
                (scenario.check)(&config, seed)
                    .unwrap_or_else(|e| panic!("{} seed {seed}: {e:#}", scenario.name));
            }
        }
    }

    #[test]
    fn names_are_unique_and_listed() {
        let names = scenario_names();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
        assert!(get_scenario("smoke").is_some());
        assert!(get_scenario("teleport").is_none());
        assert_eq!(list_scenarios().count(), names.len());
    }

    #[test]
    fn history_scenario_follows_configured_cap() {
        let config = WalkConfig {
            recent_log_count: 2,
            ..WalkConfig::default()
        };
        log_history(&config, 7).unwrap();
    }
}
