//! Browser CORS for the marketing site and portal frontends.

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use ledgerdesk_core::config::CorsConfig;

/// Build the CORS layer. Entries that fail to parse are skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if CorsConfig::is_wildcard(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>(&config.allowed_origins))
    };

    let headers = if CorsConfig::is_wildcard(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(parse_all::<HeaderName>(&config.allowed_headers))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(parse_all::<Method>(&config.allowed_methods))
        .allow_headers(headers)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

fn parse_all<T: FromStr>(entries: &[String]) -> Vec<T> {
    entries
        .iter()
        .filter_map(|entry| match entry.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(entry = %entry, "Ignoring unparseable CORS entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_skips_bad_entries() {
        let methods: Vec<Method> = parse_all(&["GET".to_string(), "NOT A METHOD".to_string()]);
        assert_eq!(methods, vec![Method::GET]);

        let origins: Vec<HeaderValue> = parse_all(&["http://localhost:3000".to_string()]);
        assert_eq!(origins.len(), 1);
    }
}
