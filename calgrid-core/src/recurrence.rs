//! Expansion of recurring events into displayable instances.
//!
//! Expansion is pure and deterministic: the full instance list is recomputed
//! from the base event list on every pass, never updated in place. Month and
//! year steps use chrono's clamping arithmetic (Jan 31 + 1 month is Feb 28,
//! or 29 in leap years) and compound from the previous occurrence, so a
//! clamped day sticks: Jan 31 → Feb 29 → Mar 29.

use chrono::{Days, Months, NaiveDate};

use crate::constants::MAX_OCCURRENCES;
use crate::event::{Event, EventTime, Frequency, RecurrenceRule};

/// Fixed display palette; base event at index `i` gets `PALETTE[i % 8]`.
pub const PALETTE: [&str; 8] = [
    "#3b82f6", "#ef4444", "#22c55e", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

/// A displayable materialization of a base event: either the base event
/// itself or one generated repetition. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Base event id, or `<baseId>_recurring_<n>` for generated occurrences
    /// (`n` is the 0-based occurrence index, excluding the base).
    pub id: String,
    pub title: String,
    pub start: EventTime,
    pub end: EventTime,
    pub timezone: String,
    pub recurring: Option<RecurrenceRule>,
    pub background_color: &'static str,
    pub border_color: &'static str,
}

impl Instance {
    fn base(event: &Event, color: &'static str) -> Self {
        Instance {
            id: event.id.clone(),
            title: event.title.clone(),
            start: event.start,
            end: event.end,
            timezone: event.timezone.clone(),
            recurring: event.recurring,
            background_color: color,
            border_color: color,
        }
    }

    /// Whether this instance should appear on a day cell. Inclusive on both
    /// ends of the date span, for all-day and timed events alike.
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }

    /// True for generated repetitions, false for the base event itself.
    pub fn is_occurrence(&self) -> bool {
        self.id.contains("_recurring_")
    }
}

/// Expand base events into the flat display list: each base event followed by
/// its generated occurrences, in input order, colored by base index.
pub fn expand(events: &[Event]) -> Vec<Instance> {
    let mut instances = Vec::new();

    for (i, event) in events.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        instances.push(Instance::base(event, color));

        if let Some(rule) = &event.recurring {
            expand_rule(event, rule, color, &mut instances);
        }
    }

    instances
}

/// Generate the occurrences for one rule. Malformed rules are reported and
/// skipped without touching the rest of the batch.
fn expand_rule(event: &Event, rule: &RecurrenceRule, color: &'static str, out: &mut Vec<Instance>) {
    if rule.interval == 0 {
        tracing::warn!(
            event_id = %event.id,
            "recurrence interval must be at least 1, skipping expansion"
        );
        return;
    }

    // The duration is fixed by the base event and preserved across all
    // occurrences: a day span for all-day events, an exact duration otherwise.
    let day_span = (event.end.date() - event.start.date()).num_days();
    let duration = event.end.to_utc() - event.start.to_utc();

    let mut cursor = event.start;

    for count in 0..MAX_OCCURRENCES {
        cursor = match advance(cursor, rule.frequency, rule.interval) {
            Some(next) => next,
            None => {
                tracing::warn!(event_id = %event.id, "recurrence stepped past the supported date range");
                return;
            }
        };

        if let Some(end_date) = rule.end_date {
            if cursor.date() > end_date {
                return;
            }
        }

        let end = match cursor {
            EventTime::Date(d) => EventTime::Date(d + chrono::Duration::days(day_span)),
            EventTime::DateTime(dt) => EventTime::DateTime(dt + duration),
        };

        out.push(Instance {
            id: format!("{}_recurring_{}", event.id, count),
            title: event.title.clone(),
            start: cursor,
            end,
            timezone: event.timezone.clone(),
            recurring: None,
            background_color: color,
            border_color: color,
        });
    }
}

/// Advance a cursor by one rule period.
fn advance(time: EventTime, frequency: Frequency, interval: u32) -> Option<EventTime> {
    match time {
        EventTime::Date(d) => step_date(d, frequency, interval).map(EventTime::Date),
        EventTime::DateTime(dt) => {
            let next = match frequency {
                Frequency::Daily => dt.checked_add_days(Days::new(u64::from(interval))),
                Frequency::Weekly => dt.checked_add_days(Days::new(7 * u64::from(interval))),
                Frequency::Monthly => dt.checked_add_months(Months::new(interval)),
                Frequency::Yearly => dt.checked_add_months(Months::new(interval.saturating_mul(12))),
            };
            next.map(EventTime::DateTime)
        }
    }
}

fn step_date(date: NaiveDate, frequency: Frequency, interval: u32) -> Option<NaiveDate> {
    match frequency {
        Frequency::Daily => date.checked_add_days(Days::new(u64::from(interval))),
        Frequency::Weekly => date.checked_add_days(Days::new(7 * u64::from(interval))),
        Frequency::Monthly => date.checked_add_months(Months::new(interval)),
        Frequency::Yearly => date.checked_add_months(Months::new(interval.saturating_mul(12))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn all_day_event(id: &str, start: NaiveDate, end: NaiveDate) -> Event {
        Event {
            id: id.to_string(),
            title: "Test".to_string(),
            start: EventTime::Date(start),
            end: EventTime::Date(end),
            timezone: "UTC".to_string(),
            recurring: None,
        }
    }

    #[test]
    fn non_recurring_event_yields_single_colored_instance() {
        let event = all_day_event("e1", date(2024, 1, 1), date(2024, 1, 2));
        let instances = expand(&[event.clone()]);

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].id, "e1");
        assert_eq!(instances[0].start, event.start);
        assert_eq!(instances[0].end, event.end);
        assert_eq!(instances[0].background_color, PALETTE[0]);
        assert_eq!(instances[0].border_color, PALETTE[0]);
    }

    #[test]
    fn weekly_rule_with_end_date_expands_to_expected_dates() {
        let mut event = all_day_event("e1", date(2024, 1, 1), date(2024, 1, 2));
        event.recurring = Some(RecurrenceRule {
            frequency: Frequency::Weekly,
            interval: 1,
            end_date: Some(date(2024, 1, 22)),
        });

        let instances = expand(&[event]);

        let starts: Vec<NaiveDate> = instances.iter().map(|i| i.start.date()).collect();
        assert_eq!(
            starts,
            vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22)]
        );
        // Each occurrence keeps the one-day span and the base color
        for instance in &instances {
            assert_eq!(instance.end.date() - instance.start.date(), chrono::Duration::days(1));
            assert_eq!(instance.background_color, PALETTE[0]);
        }
        assert_eq!(instances[1].id, "e1_recurring_0");
        assert_eq!(instances[3].id, "e1_recurring_2");
    }

    #[test]
    fn unbounded_monthly_rule_caps_at_fifty_occurrences() {
        let mut event = all_day_event("e1", date(2024, 1, 1), date(2024, 1, 1));
        event.recurring = Some(RecurrenceRule {
            frequency: Frequency::Monthly,
            interval: 1,
            end_date: None,
        });

        let instances = expand(&[event]);
        assert_eq!(instances.len(), 51);
        assert_eq!(instances[50].id, "e1_recurring_49");
    }

    #[test]
    fn far_end_date_never_exceeds_the_cap() {
        let mut event = all_day_event("e1", date(2024, 1, 1), date(2024, 1, 1));
        event.recurring = Some(RecurrenceRule {
            frequency: Frequency::Daily,
            interval: 1,
            end_date: Some(date(2999, 1, 1)),
        });

        let instances = expand(&[event]);
        assert_eq!(instances.len(), 51);
    }

    #[test]
    fn timed_occurrences_preserve_duration_exactly() {
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 9, 15, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 20, 10, 45, 0).unwrap();
        let event = Event {
            id: "e1".to_string(),
            title: "Standup".to_string(),
            start: EventTime::DateTime(start),
            end: EventTime::DateTime(end),
            timezone: "UTC".to_string(),
            recurring: Some(RecurrenceRule {
                frequency: Frequency::Daily,
                interval: 3,
                end_date: None,
            }),
        };

        let instances = expand(&[event]);
        assert_eq!(instances.len(), 51);
        for instance in &instances {
            assert_eq!(
                instance.end.to_utc() - instance.start.to_utc(),
                chrono::Duration::minutes(90)
            );
        }
        assert_eq!(
            instances[1].start,
            EventTime::DateTime(Utc.with_ymd_and_hms(2024, 3, 23, 9, 15, 0).unwrap())
        );
    }

    #[test]
    fn expansion_is_idempotent() {
        let mut event = all_day_event("e1", date(2024, 1, 1), date(2024, 1, 2));
        event.recurring = Some(RecurrenceRule {
            frequency: Frequency::Weekly,
            interval: 2,
            end_date: None,
        });
        let events = [event];

        assert_eq!(expand(&events), expand(&events));
    }

    #[test]
    fn palette_cycles_after_eight_events() {
        let events: Vec<Event> = (0..10)
            .map(|i| all_day_event(&format!("e{}", i), date(2024, 1, 1), date(2024, 1, 1)))
            .collect();

        let instances = expand(&events);
        assert_eq!(instances[8].background_color, PALETTE[0]);
        assert_eq!(instances[9].background_color, PALETTE[1]);
    }

    #[test]
    fn zero_interval_rule_is_isolated_to_its_event() {
        let mut bad = all_day_event("bad", date(2024, 1, 1), date(2024, 1, 1));
        bad.recurring = Some(RecurrenceRule {
            frequency: Frequency::Daily,
            interval: 0,
            end_date: None,
        });
        let mut good = all_day_event("good", date(2024, 1, 1), date(2024, 1, 1));
        good.recurring = Some(RecurrenceRule {
            frequency: Frequency::Weekly,
            interval: 1,
            end_date: Some(date(2024, 1, 8)),
        });

        let instances = expand(&[bad, good]);

        // The malformed rule contributes only its base instance; the good
        // event still expands.
        assert_eq!(instances.iter().filter(|i| i.id.starts_with("bad")).count(), 1);
        assert_eq!(instances.iter().filter(|i| i.id.starts_with("good")).count(), 2);
    }

    #[test]
    fn monthly_steps_clamp_and_compound() {
        let mut event = all_day_event("e1", date(2024, 1, 31), date(2024, 1, 31));
        event.recurring = Some(RecurrenceRule {
            frequency: Frequency::Monthly,
            interval: 1,
            end_date: Some(date(2024, 4, 30)),
        });

        let instances = expand(&[event]);
        let starts: Vec<NaiveDate> = instances.iter().map(|i| i.start.date()).collect();
        // Jan 31 clamps to Feb 29 (leap year) and the clamped day sticks
        assert_eq!(
            starts,
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 29), date(2024, 4, 29)]
        );
    }

    #[test]
    fn occurrence_on_end_date_is_included() {
        let mut event = all_day_event("e1", date(2024, 1, 1), date(2024, 1, 1));
        event.recurring = Some(RecurrenceRule {
            frequency: Frequency::Daily,
            interval: 7,
            end_date: Some(date(2024, 1, 8)),
        });

        let instances = expand(&[event]);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[1].start.date(), date(2024, 1, 8));
    }

    #[test]
    fn occupies_spans_inclusive_dates() {
        let event = all_day_event("e1", date(2024, 1, 1), date(2024, 1, 3));
        let instances = expand(&[event]);

        assert!(instances[0].occupies(date(2024, 1, 1)));
        assert!(instances[0].occupies(date(2024, 1, 2)));
        assert!(instances[0].occupies(date(2024, 1, 3)));
        assert!(!instances[0].occupies(date(2024, 1, 4)));
    }
}
