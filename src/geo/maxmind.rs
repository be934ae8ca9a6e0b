//! MaxMind MMDB-backed geo database
//!
//! Memory-maps a GeoLite2/GeoIP2 City database and serves read-only
//! lookups for the life of the process.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use maxminddb::{geoip2, Mmap, Reader};
use std::net::IpAddr;
use std::sync::Arc;

use super::models::RawGeoHit;
use super::GeoDatabase;

pub struct MaxMindGeo {
    reader: Arc<Reader<Mmap>>,
    release: String,
}

impl MaxMindGeo {
    /// Open an MMDB file. The release label defaults to the database's
    /// build date from its metadata; pass `release` to override it.
    pub fn open(path: &str, release: Option<String>) -> Result<Self> {
        let reader = unsafe { Reader::open_mmap(path) }
            .with_context(|| format!("Failed to open GeoIP database at {}", path))?;

        let release = release.unwrap_or_else(|| {
            DateTime::<Utc>::from_timestamp(reader.metadata.build_epoch as i64, 0)
                .map(|built| built.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unknown".to_string())
        });

        Ok(Self {
            reader: Arc::new(reader),
            release,
        })
    }
}

impl GeoDatabase for MaxMindGeo {
    fn lookup(&self, ip: IpAddr) -> Option<RawGeoHit> {
        let result = self.reader.lookup(ip).ok()?;
        let city = result.decode::<geoip2::City>().ok()??;

        Some(RawGeoHit {
            country_code: city.country.iso_code.map(|s| s.to_string()),
            country_name: city.country.names.english.map(|s| s.to_string()),
            latitude: city.location.latitude,
            longitude: city.location.longitude,
            timezone_id: city.location.time_zone.map(|s| s.to_string()),
        })
    }

    fn release(&self) -> &str {
        &self.release
    }
}

// Implement Clone by cloning the Arc
impl Clone for MaxMindGeo {
    fn clone(&self) -> Self {
        Self {
            reader: self.reader.clone(),
            release: self.release.clone(),
        }
    }
}
