use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::geo::{GeoLocator, GeoRecord, VersionInfo};
use crate::timezone::{self, TimezoneInfo, TimezoneService};
use crate::validate::{validate_ip, validate_timezone_id};

pub struct AppState {
    pub timezones: TimezoneService,
    pub geo: GeoLocator,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
}

fn not_found(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message }))
}

/// List every timezone identifier known to the rules database
pub async fn list_timezones(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.timezones.list_identifiers())
}

/// Current offset/DST/abbreviation/time detail for one timezone
pub async fn get_timezone(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TimezoneInfo>, (StatusCode, Json<ErrorResponse>)> {
    let id = validate_timezone_id(&id).map_err(|e| bad_request(e.to_string()))?;

    match state.timezones.resolve(&id) {
        Ok(info) => Ok(Json(info)),
        Err(e) => Err(not_found(e.to_string())),
    }
}

/// Location and timezone detail for an IPv4 address
pub async fn get_ip(
    State(state): State<Arc<AppState>>,
    Path(ip): Path<String>,
) -> Result<Json<GeoRecord>, (StatusCode, Json<ErrorResponse>)> {
    let ip = validate_ip(&ip).map_err(|e| bad_request(e.to_string()))?;

    match state.geo.locate(&ip) {
        Ok(record) => Ok(Json(record)),
        Err(e) => Err(not_found(e.to_string())),
    }
}

/// Versions of the two backing datasets
pub async fn get_version(State(state): State<Arc<AppState>>) -> Json<VersionInfo> {
    Json(VersionInfo {
        timezone_data_version: timezone::tzdata_version().to_string(),
        geo_database_version: state.geo.database_release().to_string(),
    })
}
