//! The calendar event model.
//!
//! Events come in two time shapes: all-day events carry calendar dates with
//! no time-of-day, timed events carry exact UTC instants. The `timezone`
//! field records the IANA zone the event was authored in and is used only
//! for display and defaulting.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};

/// Start or end of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    /// All-day: a calendar date with no time-of-day.
    Date(NaiveDate),
    /// Timed: an exact instant.
    DateTime(DateTime<Utc>),
}

impl EventTime {
    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// The calendar date this time falls on.
    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::Date(d) => *d,
            EventTime::DateTime(dt) => dt.date_naive(),
        }
    }

    /// Collapse to a UTC instant (all-day dates become midnight UTC).
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            EventTime::Date(d) => d.and_hms_opt(0, 0, 0).unwrap().and_utc(),
            EventTime::DateTime(dt) => *dt,
        }
    }
}

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Recurrence rule attached to a base event.
///
/// `interval` must be at least 1; rules with `interval == 0` are treated as
/// malformed input wherever they surface. `end_date` is inclusive: an
/// occurrence landing exactly on it is still generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// A calendar event as held in the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned identifier (opaque).
    pub id: String,
    pub title: String,
    pub start: EventTime,
    pub end: EventTime,
    /// IANA timezone name the event was authored in.
    pub timezone: String,
    pub recurring: Option<RecurrenceRule>,
}

impl Event {
    pub fn all_day(&self) -> bool {
        self.start.is_all_day()
    }
}

/// Event fields without an id: input to create and to the full update.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub start: EventTime,
    pub end: EventTime,
    pub timezone: String,
    pub recurring: Option<RecurrenceRule>,
}

impl EventDraft {
    /// Client-side validation, applied before any remote call.
    pub fn validate(&self) -> CalGridResult<()> {
        if self.title.trim().is_empty() {
            return Err(CalGridError::Validation(
                "event title must not be empty".to_string(),
            ));
        }
        if self.start.is_all_day() != self.end.is_all_day() {
            return Err(CalGridError::Validation(
                "start and end must both be all-day or both timed".to_string(),
            ));
        }
        if self.end.to_utc() < self.start.to_utc() {
            return Err(CalGridError::Validation(
                "event end must not be before its start".to_string(),
            ));
        }
        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(CalGridError::Validation(format!(
                "unknown timezone: {}",
                self.timezone
            )));
        }
        if let Some(rule) = &self.recurring {
            if rule.interval == 0 {
                return Err(CalGridError::Validation(
                    "recurrence interval must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            timezone: self.timezone,
            recurring: self.recurring,
        }
    }
}

/// Time fields for a drag/resize update. A missing `end` means a single-point
/// drop; the coordinator anchors a zero-duration event at the drop point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeChange {
    pub start: EventTime,
    pub end: Option<EventTime>,
}

impl TimeChange {
    pub fn resolved_end(&self) -> EventTime {
        self.end.unwrap_or(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> EventDraft {
        EventDraft {
            title: "Team standup".to_string(),
            start: EventTime::DateTime(Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap()),
            end: EventTime::DateTime(Utc.with_ymd_and_hms(2024, 3, 20, 9, 30, 0).unwrap()),
            timezone: "Europe/Stockholm".to_string(),
            recurring: None,
        }
    }

    #[test]
    fn accepts_valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn rejects_empty_title() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert!(matches!(d.validate(), Err(CalGridError::Validation(_))));
    }

    #[test]
    fn rejects_end_before_start() {
        let mut d = draft();
        d.end = EventTime::DateTime(Utc.with_ymd_and_hms(2024, 3, 20, 8, 0, 0).unwrap());
        assert!(matches!(d.validate(), Err(CalGridError::Validation(_))));
    }

    #[test]
    fn rejects_mixed_time_kinds() {
        let mut d = draft();
        d.end = EventTime::Date(NaiveDate::from_ymd_opt(2024, 3, 21).unwrap());
        assert!(matches!(d.validate(), Err(CalGridError::Validation(_))));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let mut d = draft();
        d.timezone = "Mars/Olympus_Mons".to_string();
        assert!(matches!(d.validate(), Err(CalGridError::Validation(_))));
    }

    #[test]
    fn rejects_zero_interval() {
        let mut d = draft();
        d.recurring = Some(RecurrenceRule {
            frequency: Frequency::Weekly,
            interval: 0,
            end_date: None,
        });
        assert!(matches!(d.validate(), Err(CalGridError::Validation(_))));
    }

    #[test]
    fn zero_duration_drop_resolves_to_start() {
        let start = EventTime::Date(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        let change = TimeChange { start, end: None };
        assert_eq!(change.resolved_end(), start);
    }
}
