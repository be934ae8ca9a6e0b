//! Timezone resolution against the compiled IANA rules database
//!
//! Every answer is computed fresh from the injected clock: the offset,
//! DST flag, and abbreviation all depend on which observance period the
//! current instant falls in, so nothing here is cached across calls.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use chrono::{DateTime, Offset};
use chrono_tz::{OffsetComponents, OffsetName, Tz, TZ_VARIANTS};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::validate::ValidatedId;

/// Current-instant detail for a single timezone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimezoneInfo {
    /// IANA identifier, e.g. "Europe/Istanbul"
    pub identifier: String,

    /// Last path segment with underscores replaced by spaces
    pub friendly_name: String,

    /// Abbreviation of the current observance period (e.g. "EST"), or
    /// the numeric offset where the zone defines no abbreviation
    pub abbreviation: String,

    /// Total offset from UTC in seconds, DST included
    pub utc_offset_seconds: i32,

    /// Whether a daylight-saving adjustment is currently in effect
    pub is_dst: bool,

    /// Current local wall-clock time
    pub local_time: DateTime<Tz>,

    /// Seconds since the Unix epoch, UTC
    pub unix_timestamp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown timezone identifier: {0:?}")]
pub struct UnknownTimezone(pub String);

/// Resolver over the compiled-in timezone rules database.
#[derive(Clone)]
pub struct TimezoneService {
    clock: Arc<dyn Clock>,
}

impl TimezoneService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Resolve a validated identifier to its current-instant detail.
    pub fn resolve(&self, id: &ValidatedId) -> Result<TimezoneInfo, UnknownTimezone> {
        self.resolve_identifier(id.as_str())
    }

    /// Resolve a raw identifier string. Used by the geo locator, whose
    /// identifiers come out of the geo database rather than a request.
    pub fn resolve_identifier(&self, identifier: &str) -> Result<TimezoneInfo, UnknownTimezone> {
        let tz: Tz = identifier
            .parse()
            .map_err(|_| UnknownTimezone(identifier.to_string()))?;

        let local = self.clock.now().with_timezone(&tz);
        let offset = local.offset();

        let abbreviation = offset
            .abbreviation()
            .map(str::to_owned)
            .unwrap_or_else(|| offset.fix().to_string());

        Ok(TimezoneInfo {
            identifier: tz.name().to_string(),
            friendly_name: friendly_name(tz.name()),
            abbreviation,
            utc_offset_seconds: offset.fix().local_minus_utc(),
            is_dst: !offset.dst_offset().is_zero(),
            unix_timestamp: local.timestamp(),
            local_time: local,
        })
    }

    /// Every identifier with rule data, in the database's stable
    /// enumeration order.
    pub fn list_identifiers(&self) -> Vec<String> {
        TZ_VARIANTS.iter().map(|tz| tz.name().to_string()).collect()
    }
}

/// Release of the compiled tzdata rules, e.g. "2025a".
pub fn tzdata_version() -> &'static str {
    chrono_tz::IANA_TZDB_VERSION
}

fn friendly_name(identifier: &str) -> String {
    identifier
        .rsplit('/')
        .next()
        .unwrap_or(identifier)
        .replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_timezone_id;
    use chrono::{DateTime, Utc};

    fn service_at(timestamp: i64) -> TimezoneService {
        let instant: DateTime<Utc> = DateTime::from_timestamp(timestamp, 0).unwrap();
        TimezoneService::new(Arc::new(FixedClock(instant)))
    }

    // 2021-07-01T12:00:00Z
    const SUMMER: i64 = 1625140800;
    // 2021-01-15T12:00:00Z
    const WINTER: i64 = 1610712000;

    #[test]
    fn resolves_istanbul() {
        let svc = service_at(SUMMER);
        let id = validate_timezone_id("Europe/Istanbul").unwrap();
        let info = svc.resolve(&id).unwrap();

        assert_eq!(info.identifier, "Europe/Istanbul");
        assert_eq!(info.friendly_name, "Istanbul");
        // Istanbul has been fixed at +03 with no DST since 2016.
        assert_eq!(info.utc_offset_seconds, 3 * 3600);
        assert!(!info.is_dst);
        assert_eq!(info.unix_timestamp, SUMMER);
    }

    #[test]
    fn reports_dst_and_abbreviation_by_season() {
        let id = validate_timezone_id("America/New_York").unwrap();

        let summer = service_at(SUMMER).resolve(&id).unwrap();
        assert_eq!(summer.abbreviation, "EDT");
        assert_eq!(summer.utc_offset_seconds, -4 * 3600);
        assert!(summer.is_dst);

        let winter = service_at(WINTER).resolve(&id).unwrap();
        assert_eq!(winter.abbreviation, "EST");
        assert_eq!(winter.utc_offset_seconds, -5 * 3600);
        assert!(!winter.is_dst);
    }

    #[test]
    fn friendly_name_uses_last_segment() {
        assert_eq!(friendly_name("America/New_York"), "New York");
        assert_eq!(friendly_name("America/Argentina/Buenos_Aires"), "Buenos Aires");
        assert_eq!(friendly_name("Europe/Istanbul"), "Istanbul");
    }

    #[test]
    fn unknown_identifier_fails() {
        let svc = service_at(SUMMER);
        let id = validate_timezone_id("Invalid/Zone").unwrap();
        assert_eq!(
            svc.resolve(&id),
            Err(UnknownTimezone("Invalid/Zone".to_string()))
        );
    }

    #[test]
    fn all_known_offsets_are_within_fourteen_hours() {
        let svc = service_at(SUMMER);
        for identifier in svc.list_identifiers() {
            let info = svc.resolve_identifier(&identifier).unwrap();
            assert!(
                (-50400..=50400).contains(&info.utc_offset_seconds),
                "{identifier}: offset {} out of range",
                info.utc_offset_seconds
            );
        }
    }

    #[test]
    fn identifier_list_is_idempotent() {
        let svc = service_at(SUMMER);
        let first = svc.list_identifiers();
        let second = svc.list_identifiers();
        assert_eq!(first, second);
        assert!(first.iter().any(|id| id == "Europe/Istanbul"));
        assert!(first.iter().any(|id| id == "UTC"));
    }

    #[test]
    fn tzdata_version_is_nonempty() {
        assert!(!tzdata_version().is_empty());
    }
}
