use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Build the CORS layer shared by the HTTP services.
///
/// Only the configured origins are allowed. Methods and headers are mirrored
/// from the preflight request.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parse_origins(&config.allow_origins)))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(config.max_age))
}

fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    let mut parsed = Vec::with_capacity(origins.len());
    for origin in origins {
        // A wildcard cannot be combined with credentials.
        if origin.trim() == "*" {
            tracing::warn!("Ignoring wildcard CORS origin, list origins explicitly");
            continue;
        }
        match HeaderValue::from_str(origin) {
            Ok(value) => parsed.push(value),
            Err(err) => tracing::warn!(origin = %origin, error = %err, "Ignoring invalid CORS origin"),
        }
    }
    parsed
}
