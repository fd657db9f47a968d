//! CORS policy for browser clients.

use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

/// Build a [`CorsLayer`] that only admits the given origins.
///
/// Methods and headers are mirrored from the preflight request and
/// credentials are allowed, so the origins must be listed explicitly.
///
/// # Errors
///
/// Returns [`InvalidHeaderValue`] when an origin is not a valid header value.
pub fn layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
