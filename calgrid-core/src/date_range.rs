//! Date range for filtering events.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::constants::DEFAULT_RANGE_DAYS;
use crate::event::EventTime;

/// Date range for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl Default for DateRange {
    /// Default range: ±DEFAULT_RANGE_DAYS from now
    fn default() -> Self {
        let now = Utc::now();
        DateRange {
            from: Some(now - Duration::days(DEFAULT_RANGE_DAYS)),
            to: Some(now + Duration::days(DEFAULT_RANGE_DAYS)),
        }
    }
}

impl DateRange {
    /// Parse a date string into a DateRange.
    /// - `from`: "start" for unbounded, or YYYY-MM-DD
    /// - `to`: YYYY-MM-DD, defaults to +DEFAULT_RANGE_DAYS if not specified
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> Result<Self, String> {
        let now = Utc::now();

        let from_dt = match from {
            Some("start") => None, // Unbounded past
            Some(s) => Some(parse_date_start(s)?),
            None => Some(now - Duration::days(DEFAULT_RANGE_DAYS)),
        };

        let to_dt = match to {
            Some(s) => Some(parse_date_end(s)?),
            None => Some(now + Duration::days(DEFAULT_RANGE_DAYS)),
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    /// Whether an event time falls inside the range (inclusive).
    pub fn contains(&self, time: &EventTime) -> bool {
        let instant = time.to_utc();
        self.from.is_none_or(|from| instant >= from) && self.to.is_none_or(|to| instant <= to)
    }
}

/// Parse YYYY-MM-DD as start of day in UTC
fn parse_date_start(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

/// Parse YYYY-MM-DD as end of day in UTC
fn parse_date_end(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(23, 59, 59).unwrap().and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_bounds_are_inclusive() {
        let range = DateRange::from_args(Some("2024-01-01"), Some("2024-01-31")).unwrap();

        let inside = EventTime::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let first = EventTime::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let after = EventTime::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

        assert!(range.contains(&inside));
        assert!(range.contains(&first));
        assert!(!range.contains(&after));
    }

    #[test]
    fn start_keyword_unbounds_the_past() {
        let range = DateRange::from_args(Some("start"), Some("2024-01-31")).unwrap();
        let ancient = EventTime::Date(NaiveDate::from_ymd_opt(1995, 6, 1).unwrap());
        assert!(range.contains(&ancient));
    }

    #[test]
    fn bad_dates_are_rejected() {
        assert!(DateRange::from_args(Some("tomorrow-ish"), None).is_err());
    }
}
