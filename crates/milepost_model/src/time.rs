//! ISO-8601 timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// Returns the current instant as an ISO-8601 string in UTC.
///
/// This is the format stored in `createdAt` fields.
#[must_use]
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an ISO-8601 timestamp.
///
/// Returns `None` for values that do not parse. Callers that need a total
/// order use [`parse_iso_or_epoch`] instead.
#[must_use]
pub fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses an ISO-8601 timestamp, mapping unparseable values to the epoch.
///
/// Sorting never fails on a malformed timestamp; the record simply sorts
/// last in a newest-first sequence.
#[must_use]
pub fn parse_iso_or_epoch(value: &str) -> DateTime<Utc> {
    parse_iso(value).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_iso_round_trips() {
        let now = now_iso();
        assert!(parse_iso(&now).is_some());
    }

    #[test]
    fn parse_iso_rejects_garbage() {
        assert!(parse_iso("not a timestamp").is_none());
        assert!(parse_iso("").is_none());
    }

    #[test]
    fn garbage_sorts_as_epoch() {
        let epoch = parse_iso_or_epoch("garbage");
        let real = parse_iso_or_epoch("2024-06-01T12:00:00Z");
        assert!(real > epoch);
    }
}
