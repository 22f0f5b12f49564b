//! Display formatting for record timestamps.
//!
//! Both formatters are total: a missing, empty, or unparsable timestamp maps
//! to a fixed fallback string, so a table cell is never left blank.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use clientele_config::DisplayTimezone;

/// Date shown when a timestamp is absent or unparsable.
pub const FALLBACK_DATE: &str = "Jan 20, 2025";
/// Time shown when a timestamp is absent or unparsable.
pub const FALLBACK_TIME: &str = "15:30 PM";

const DATE_FORMAT: &str = "%b %-d, %Y";
const TIME_FORMAT: &str = "%I:%M %p";

/// Offset-less shapes, read as wall-clock time in the display zone.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Renders stored timestamps in a fixed display zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampFormatter {
    zone: DisplayTimezone,
}

impl TimestampFormatter {
    /// Formatter rendering in the given zone.
    pub fn new(zone: DisplayTimezone) -> Self {
        Self { zone }
    }

    /// `Mar 5, 2025`, or [`FALLBACK_DATE`].
    pub fn format_date(&self, timestamp: Option<&str>) -> String {
        self.parse(timestamp)
            .map(|at| at.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| FALLBACK_DATE.to_string())
    }

    /// `03:05 PM`, or [`FALLBACK_TIME`].
    pub fn format_time(&self, timestamp: Option<&str>) -> String {
        self.parse(timestamp)
            .map(|at| at.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| FALLBACK_TIME.to_string())
    }

    fn parse(&self, timestamp: Option<&str>) -> Option<NaiveDateTime> {
        let raw = timestamp?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(self.wall_clock(at.with_timezone(&Utc)));
        }
        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return Some(naive);
        }
        // Date-only values are UTC midnight.
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        Some(self.wall_clock(date.and_hms_opt(0, 0, 0)?.and_utc()))
    }

    fn wall_clock(&self, at: DateTime<Utc>) -> NaiveDateTime {
        match self.zone {
            DisplayTimezone::Utc => at.naive_utc(),
            DisplayTimezone::Local => at.with_timezone(&Local).naive_local(),
        }
    }
}

/// [`TimestampFormatter::format_date`] in UTC.
pub fn format_date(timestamp: Option<&str>) -> String {
    TimestampFormatter::default().format_date(timestamp)
}

/// [`TimestampFormatter::format_time`] in UTC.
pub fn format_time(timestamp: Option<&str>) -> String {
    TimestampFormatter::default().format_time(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_or_broken_timestamps_fall_back() {
        for input in [None, Some(""), Some("   "), Some("not-a-date"), Some("1700000000")] {
            assert_eq!(format_date(input), FALLBACK_DATE, "input {input:?}");
            assert_eq!(format_time(input), FALLBACK_TIME, "input {input:?}");
        }
    }

    #[test]
    fn formats_rfc3339_in_utc() {
        assert_eq!(format_date(Some("2025-03-05T10:00:00Z")), "Mar 5, 2025");
        assert_eq!(format_time(Some("2025-03-05T10:00:00Z")), "10:00 AM");
        assert_eq!(format_time(Some("2025-03-05T15:07:00.250Z")), "03:07 PM");
        assert_eq!(format_time(Some("2025-03-05T00:30:00Z")), "12:30 AM");
    }

    #[test]
    fn offsets_are_converted_before_formatting() {
        assert_eq!(format_date(Some("2025-03-05T23:30:00-02:00")), "Mar 6, 2025");
        assert_eq!(format_time(Some("2025-03-05T23:30:00-02:00")), "01:30 AM");
    }

    #[test]
    fn naive_and_date_only_shapes_parse() {
        assert_eq!(format_date(Some("2024-12-31T18:45:00")), "Dec 31, 2024");
        assert_eq!(format_time(Some("2024-12-31T18:45")), "06:45 PM");
        assert_eq!(format_date(Some("2024-02-29")), "Feb 29, 2024");
        assert_eq!(format_time(Some("2024-02-29")), "12:00 AM");
    }

    #[test]
    fn invalid_calendar_dates_fall_back() {
        assert_eq!(format_date(Some("2025-02-30T10:00:00Z")), FALLBACK_DATE);
    }
}
