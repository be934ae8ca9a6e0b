//! Geo lookup: IP address to location and timezone detail
//!
//! The locator joins two independently maintained datasets: a geo-IP
//! database hit supplies country, coordinates, and a timezone
//! identifier; the timezone resolver enriches that identifier into full
//! current-instant detail. Enrichment is best-effort — see
//! [`models::TimezoneDetail`].

mod maxmind;
pub mod models;

pub use maxmind::MaxMindGeo;
pub use models::{GeoRecord, RawGeoHit, TimezoneDetail, VersionInfo};

use std::net::IpAddr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::timezone::TimezoneService;
use crate::validate::ValidatedIp;

/// Read-only geo-IP data source, loaded once at startup.
pub trait GeoDatabase: Send + Sync {
    /// Look up an address, returning the raw record fields on a hit.
    fn lookup(&self, ip: IpAddr) -> Option<RawGeoHit>;

    /// Release label of the loaded dataset.
    fn release(&self) -> &str;
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no geo record for {0}")]
pub struct NotFound(pub String);

/// Locator over a shared geo database handle, composing the timezone
/// resolver for enrichment.
#[derive(Clone)]
pub struct GeoLocator {
    database: Arc<dyn GeoDatabase>,
    timezones: TimezoneService,
}

impl GeoLocator {
    pub fn new(database: Arc<dyn GeoDatabase>, timezones: TimezoneService) -> Self {
        Self {
            database,
            timezones,
        }
    }

    /// Locate a validated IP and enrich its timezone identifier.
    pub fn locate(&self, ip: &ValidatedIp) -> Result<GeoRecord, NotFound> {
        // Octets past 255 pass the syntactic filter but are not
        // addresses; they can never hit the database, so they surface
        // here as a miss.
        let addr: IpAddr = ip
            .as_str()
            .parse()
            .map_err(|_| NotFound(ip.to_string()))?;

        let hit = self
            .database
            .lookup(addr)
            .ok_or_else(|| NotFound(ip.to_string()))?;

        let timezone_info = hit.timezone_id.map(|identifier| {
            match self.timezones.resolve_identifier(&identifier) {
                Ok(info) => TimezoneDetail::Full(info),
                Err(_) => {
                    // The two databases drift independently; a geo
                    // record may name a zone the rules database lacks.
                    debug!(%identifier, %ip, "geo timezone identifier not in rules database");
                    TimezoneDetail::Identifier(identifier)
                }
            }
        });

        Ok(GeoRecord {
            country_code: hit.country_code,
            country_name: hit.country_name,
            latitude: hit.latitude,
            longitude: hit.longitude,
            timezone_info,
        })
    }

    /// Release label of the underlying geo database.
    pub fn database_release(&self) -> &str {
        self.database.release()
    }
}
