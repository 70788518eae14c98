//! OSRM over `fetch`, raced against the request timeout.
use futures::future::{Either, select};
use sanpo_core::{RouteRequest, RouteResponse, RoutingError, RoutingService, WalkConfig};
use std::pin::pin;

use crate::dom;

#[derive(Debug, Clone)]
pub struct FetchRouter {
    base_url: String,
}

impl FetchRouter {
    #[must_use]
    pub fn new(config: &WalkConfig) -> Self {
        Self {
            base_url: config.router_base().to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RoutingService for FetchRouter {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        let url = request.osrm_url(&self.base_url);
        let timeout_ms = request.timeout_ms();
        let fetch = pin!(fetch_body(&url));
        let timer = pin!(dom::sleep_ms(i32::try_from(timeout_ms).unwrap_or(i32::MAX)));

        let (status, body) = match select(fetch, timer).await {
            Either::Left((result, _)) => result?,
            Either::Right((Ok(()), _)) => return Err(RoutingError::Timeout(timeout_ms)),
            // No timer available; wait for the request alone.
            Either::Right((Err(_), fetch)) => fetch.await?,
        };

        RouteResponse::from_http(status, &body)
    }
}

async fn fetch_body(url: &str) -> Result<(u16, String), RoutingError> {
    let response = dom::fetch_response(url)
        .await
        .map_err(|e| RoutingError::Transport(dom::js_error_message(&e)))?;
    let body = dom::response_text(&response)
        .await
        .map_err(|e| RoutingError::Transport(dom::js_error_message(&e)))?;
    Ok((response.status(), body))
}
