//! Wire format of the event service.
//!
//! The service speaks camelCase JSON. All-day events carry `YYYY-MM-DD`
//! date strings, timed events RFC 3339 instants, with an `allDay` flag
//! deciding the interpretation. The `recurring` field arrives either as an
//! object or as a JSON-encoded string (older rows were persisted
//! stringified); it is decoded exactly once here, so the rest of the crate
//! only ever sees `Option<RecurrenceRule>`.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};
use crate::event::{Event, EventDraft, EventTime, RecurrenceRule, TimeChange};
use crate::session::UserProfile;

/// An event as returned by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub recurring: Option<serde_json::Value>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl EventPayload {
    pub fn into_event(self) -> CalGridResult<Event> {
        let start = parse_event_time(&self.start, self.all_day)?;
        let end = parse_event_time(&self.end, self.all_day)?;
        let recurring = self
            .recurring
            .as_ref()
            .and_then(|value| decode_recurring(value, &self.id));

        Ok(Event {
            id: self.id,
            title: self.title,
            start,
            end,
            timezone: self.timezone,
            recurring,
        })
    }
}

/// Decode the object-or-string shape of `recurring`. Malformed payloads are
/// reported and dropped; they never fail the containing event.
fn decode_recurring(value: &serde_json::Value, event_id: &str) -> Option<RecurrenceRule> {
    let parsed = match value {
        serde_json::Value::Null => return None,
        serde_json::Value::String(raw) => serde_json::from_str(raw),
        other => serde_json::from_value(other.clone()),
    };

    match parsed {
        Ok(rule) => Some(rule),
        Err(err) => {
            tracing::warn!(event_id, error = %err, "ignoring malformed recurrence rule");
            None
        }
    }
}

fn parse_event_time(raw: &str, all_day: bool) -> CalGridResult<EventTime> {
    if all_day {
        // The service may hand back a bare date or a full timestamp
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(EventTime::Date(date));
        }
        let instant = parse_instant(raw)?;
        return Ok(EventTime::Date(instant.date_naive()));
    }
    Ok(EventTime::DateTime(parse_instant(raw)?))
}

fn parse_instant(raw: &str) -> CalGridResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| CalGridError::Serialization(format!("invalid timestamp '{}': {}", raw, err)))
}

fn format_event_time(time: EventTime) -> String {
    match time {
        EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
        EventTime::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

/// Body of `POST /events` and `PUT /events/{id}` (full update).
///
/// `recurring` is serialized even when absent so an update can clear a rule.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPayload {
    pub title: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub timezone: String,
    pub recurring: Option<RecurrenceRule>,
}

impl From<&EventDraft> for DraftPayload {
    fn from(draft: &EventDraft) -> Self {
        DraftPayload {
            title: draft.title.clone(),
            start: format_event_time(draft.start),
            end: format_event_time(draft.end),
            all_day: draft.start.is_all_day(),
            timezone: draft.timezone.clone(),
            recurring: draft.recurring,
        }
    }
}

/// Body of `PUT /events/{id}` for a drag/resize: time fields only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePatchPayload {
    pub start: String,
    pub end: String,
    pub all_day: bool,
}

impl From<&TimeChange> for TimePatchPayload {
    fn from(times: &TimeChange) -> Self {
        TimePatchPayload {
            start: format_event_time(times.start),
            end: format_event_time(times.resolved_end()),
            all_day: times.start.is_all_day(),
        }
    }
}

/// Body of `GET /session`.
#[derive(Debug, Deserialize)]
pub struct SessionPayload {
    pub user: UserProfile,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Frequency;

    fn payload(start: &str, end: &str, all_day: bool, recurring: Option<serde_json::Value>) -> EventPayload {
        EventPayload {
            id: "e1".to_string(),
            title: "Test".to_string(),
            start: start.to_string(),
            end: end.to_string(),
            all_day,
            timezone: "UTC".to_string(),
            recurring,
        }
    }

    #[test]
    fn decodes_all_day_events_from_bare_dates() {
        let event = payload("2024-01-01", "2024-01-02", true, None).into_event().unwrap();
        assert_eq!(event.start, EventTime::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(event.all_day());
    }

    #[test]
    fn decodes_all_day_events_from_full_timestamps() {
        let event = payload("2024-01-01T00:00:00.000Z", "2024-01-01T23:59:59.000Z", true, None)
            .into_event()
            .unwrap();
        assert_eq!(event.start, EventTime::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert_eq!(event.end, EventTime::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    }

    #[test]
    fn decodes_timed_events_as_utc_instants() {
        let event = payload("2024-03-01T10:00:00+01:00", "2024-03-01T11:00:00+01:00", false, None)
            .into_event()
            .unwrap();
        match event.start {
            EventTime::DateTime(dt) => assert_eq!(dt.to_rfc3339(), "2024-03-01T09:00:00+00:00"),
            EventTime::Date(_) => panic!("expected a timed start"),
        }
    }

    #[test]
    fn decodes_recurring_from_object_form() {
        let rule = serde_json::json!({"frequency": "weekly", "interval": 2, "endDate": "2024-06-01"});
        let event = payload("2024-01-01", "2024-01-01", true, Some(rule)).into_event().unwrap();
        let rule = event.recurring.unwrap();
        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.end_date, Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
    }

    #[test]
    fn decodes_recurring_from_stringified_form() {
        let raw = serde_json::Value::String(r#"{"frequency":"monthly","interval":1}"#.to_string());
        let event = payload("2024-01-01", "2024-01-01", true, Some(raw)).into_event().unwrap();
        let rule = event.recurring.unwrap();
        assert_eq!(rule.frequency, Frequency::Monthly);
        assert_eq!(rule.end_date, None);
    }

    #[test]
    fn malformed_recurring_is_dropped_not_fatal() {
        let raw = serde_json::Value::String("not json at all".to_string());
        let event = payload("2024-01-01", "2024-01-01", true, Some(raw)).into_event().unwrap();
        assert!(event.recurring.is_none());
    }

    #[test]
    fn draft_payload_serializes_null_recurring() {
        let draft = EventDraft {
            title: "Test".to_string(),
            start: EventTime::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            end: EventTime::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            timezone: "UTC".to_string(),
            recurring: None,
        };
        let json = serde_json::to_value(DraftPayload::from(&draft)).unwrap();
        assert_eq!(json["recurring"], serde_json::Value::Null);
        assert_eq!(json["start"], "2024-01-01");
        assert_eq!(json["allDay"], true);
    }

    #[test]
    fn time_patch_resolves_single_point_drop() {
        let start = EventTime::Date(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        let patch = TimePatchPayload::from(&TimeChange { start, end: None });
        assert_eq!(patch.start, patch.end);
    }
}
