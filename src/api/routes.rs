use axum::{
    http::{HeaderName, HeaderValue},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::geo::GeoLocator;
use crate::timezone::TimezoneService;

use super::handlers::{get_ip, get_timezone, get_version, list_timezones, AppState};

/// API version conveyed via a response header rather than the path.
pub const API_VERSION: &str = "v1";

pub fn create_api_router(timezones: TimezoneService, geo: GeoLocator) -> Router {
    let state = Arc::new(AppState { timezones, geo });

    Router::new()
        .route("/timezones", get(list_timezones))
        // Wildcard capture: identifiers contain `/`
        .route("/timezones/{*id}", get(get_timezone))
        .route("/ip/{ip}", get(get_ip))
        .route("/version", get(get_version))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-api-version"),
            HeaderValue::from_static(API_VERSION),
        ))
        .with_state(state)
}
