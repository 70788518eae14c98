//! Page-level configuration.
//!
//! The host page may embed a JSON [`WalkConfig`] document in
//! `<script id="sanpo-config" type="application/json">`. Missing or invalid
//! documents fall back to the compiled defaults.
use sanpo_core::WalkConfig;

use crate::dom;

pub const CONFIG_ELEMENT_ID: &str = "sanpo-config";

/// Configuration from the host page, or the defaults.
#[must_use]
pub fn page_config() -> WalkConfig {
    dom::element_text(CONFIG_ELEMENT_ID).map_or_else(WalkConfig::default, |text| parse_or_default(&text))
}

/// Parse an embedded document, logging and discarding it when invalid.
#[must_use]
pub fn parse_or_default(text: &str) -> WalkConfig {
    if text.trim().is_empty() {
        return WalkConfig::default();
    }
    match WalkConfig::from_json(text) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::warn!("ignoring page configuration: {err}");
            WalkConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_broken_documents_use_defaults() {
        assert_eq!(parse_or_default("   "), WalkConfig::default());
        assert_eq!(parse_or_default("{ nope"), WalkConfig::default());
        assert_eq!(
            parse_or_default(r#"{ "routing_timeout_ms": 0 }"#),
            WalkConfig::default()
        );
    }

    #[test]
    fn valid_documents_override_fields() {
        let cfg = parse_or_default(r#"{ "router_base_url": "https://osrm.local" }"#);
        assert_eq!(cfg.router_base(), "https://osrm.local");
        assert_eq!(cfg.recent_log_count, 5);
    }
}
