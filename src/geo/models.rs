//! Data models for geo lookups

use serde::Serialize;

use crate::timezone::TimezoneInfo;

/// A geo database hit before timezone enrichment. MMDB records are
/// sparse, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGeoHit {
    /// ISO country code (e.g., "US", "TR")
    pub country_code: Option<String>,

    /// Country name
    pub country_name: Option<String>,

    /// Latitude in decimal degrees
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    pub longitude: Option<f64>,

    /// IANA timezone identifier embedded in the record
    pub timezone_id: Option<String>,
}

/// Timezone detail attached to a geo record.
///
/// The geo and timezone databases are updated independently, so a geo
/// record can name an identifier the rules database does not know. In
/// that case the raw identifier string is returned instead of failing
/// the whole lookup. Serialized untagged: the degraded case renders as
/// a bare string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TimezoneDetail {
    Full(TimezoneInfo),
    Identifier(String),
}

/// Fully assembled answer for an IP lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRecord {
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// None when the geo record carries no timezone field at all
    pub timezone_info: Option<TimezoneDetail>,
}

/// Dataset versions reported by `/version`, constant for the process
/// lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub timezone_data_version: String,
    pub geo_database_version: String,
}
