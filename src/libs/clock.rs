//! Wall-clock access and the timestamp format used for persisted dates.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// 9999-12-31T23:59:59Z, the last instant with a four-digit RFC 3339 year.
const LAST_STORABLE_SECS: i64 = 253_402_300_799;

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Formats a timestamp for storage (RFC 3339, UTC, second precision).
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parses a stored timestamp. Any RFC 3339 offset is accepted and converted to UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|t| t.with_timezone(&Utc))
}

/// Latest timestamp that survives a `format_timestamp`/`parse_timestamp` round trip.
pub fn last_storable_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(LAST_STORABLE_SECS, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Adds whole days to `time`, saturating at the epoch and at
/// [`last_storable_timestamp`] instead of overflowing.
///
/// # Arguments
/// * `time` - The starting point
/// * `days` - Days to add, may be negative
///
/// # Returns
/// The shifted time, clamped to the storable range
pub fn add_days_saturating(time: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    let earliest = DateTime::<Utc>::UNIX_EPOCH;
    let latest = last_storable_timestamp();
    match Duration::try_days(days).and_then(|delta| time.checked_add_signed(delta)) {
        Some(shifted) => shifted.clamp(earliest, latest),
        None if days < 0 => earliest,
        None => latest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format_is_stable() {
        let time = Utc.with_ymd_and_hms(1971, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(format_timestamp(time), "1971-01-01T00:00:01Z");
        assert_eq!(parse_timestamp("1971-01-01T00:00:01Z").unwrap(), time);
    }

    #[test]
    fn test_offsets_are_normalised() {
        let parsed = parse_timestamp("2024-03-10T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_timestamp("1/1/1971 00:00:01").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_add_days_saturates() {
        let time = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(
            add_days_saturating(time, 3),
            Utc.with_ymd_and_hms(2024, 6, 4, 12, 0, 0).unwrap()
        );
        assert_eq!(add_days_saturating(time, i64::MAX), last_storable_timestamp());
        assert_eq!(add_days_saturating(time, 100_000_000), last_storable_timestamp());
        assert_eq!(add_days_saturating(time, i64::MIN), DateTime::<Utc>::UNIX_EPOCH);

        let latest = format_timestamp(last_storable_timestamp());
        assert_eq!(latest, "9999-12-31T23:59:59Z");
        assert_eq!(parse_timestamp(&latest).unwrap(), last_storable_timestamp());
    }
}
