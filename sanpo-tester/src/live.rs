//! Live probes against a real OSRM endpoint.
use anyhow::{Context, Result};
use colored::Colorize;
use sanpo_core::memory::{FixedGeolocation, MemoryStore, RecordingMap};
use sanpo_core::{
    MoodKey, RouteRequest, RouteResponse, RoutingError, RoutingService, SeededSource, SystemClock,
    WalkConfig, WalkController,
};
use std::time::Instant;

use crate::logic::ScenarioResult;

pub const LIVE_SCENARIO: &str = "live-route";

/// OSRM over HTTP with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpRouter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRouter {
    pub fn new(config: &WalkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sanpo-tester/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.router_base().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn transport_error(err: &reqwest::Error, timeout_ms: u64) -> RoutingError {
    if err.is_timeout() {
        RoutingError::Timeout(timeout_ms)
    } else {
        RoutingError::Transport(err.to_string())
    }
}

impl RoutingService for HttpRouter {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        let url = request.osrm_url(&self.base_url);
        let timeout_ms = request.timeout_ms();
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| transport_error(&e, timeout_ms))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&e, timeout_ms))?;

        RouteResponse::from_http(status.as_u16(), &body)
    }
}

/// Plan an outbound and a return leg per mood, for every seed, against the
/// configured router. The walk starts at the fallback location.
pub async fn run_live_probe(
    config: &WalkConfig,
    seeds: &[u64],
    distance_km: f64,
    verbose: bool,
) -> Result<Vec<ScenarioResult>> {
    let mut results = Vec::new();
    for &seed in seeds {
        let mut controller = WalkController::new(
            config.clone(),
            FixedGeolocation::at(config.fallback_location),
            HttpRouter::new(config)?,
            RecordingMap::default(),
            MemoryStore::default(),
            SystemClock,
            SeededSource::new(seed),
        )?;

        let mut failures = Vec::new();
        let mut performance_data = Vec::new();
        for mood in MoodKey::ALL {
            let started = Instant::now();
            let outbound = controller.start_walk(mood, distance_km).await;
            let outcome = match outbound {
                Ok(_) => controller.plan_return().await.map(|_| ()),
                Err(err) => Err(err),
            };
            match outcome {
                Ok(()) => {
                    let duration = started.elapsed();
                    if verbose {
                        println!("  ✅ {mood} round trip routed ({duration:?})");
                    }
                    performance_data.push(duration);
                }
                Err(err) => {
                    if verbose {
                        println!("  ❌ {mood}: {}", err.to_string().red());
                    }
                    failures.push(format!("{mood} (seed {seed}): {err}"));
                }
            }
        }
        results.push(ScenarioResult::from_runs(
            LIVE_SCENARIO,
            seed,
            MoodKey::ALL.len(),
            failures,
            performance_data,
        ));
    }
    Ok(results)
}
