pub mod delete;
pub mod edit;
pub mod events;
pub mod login;
pub mod logout;
pub mod new;
pub mod note;
pub mod reschedule;
pub mod view;
pub mod whoami;

use std::time::Duration;

use anyhow::{Result, anyhow};
use calgrid_core::event::EventTime;
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use indicatif::ProgressBar;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Parse a calendar date: YYYY-MM-DD first, then fuzzy input like
/// "tomorrow" or "next friday".
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    let parsed = fuzzydate::parse(input)
        .map_err(|e| anyhow!("Could not parse date '{}': {:?}", input, e))?;
    Ok(parsed.date())
}

/// Parse an event time. A bare date becomes an all-day time; anything with a
/// time-of-day is interpreted as wall-clock in `tz` and stored as UTC.
pub fn parse_event_time(input: &str, tz: &Tz) -> Result<EventTime> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(EventTime::Date(date));
    }

    let naive = parse_naive_datetime(input)?;
    Ok(EventTime::DateTime(to_utc(naive, tz, input)?))
}

fn parse_naive_datetime(input: &str) -> Result<NaiveDateTime> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M") {
        return Ok(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(naive);
    }
    fuzzydate::parse(input).map_err(|e| anyhow!("Could not parse time '{}': {:?}", input, e))
}

fn to_utc(naive: NaiveDateTime, tz: &Tz, input: &str) -> Result<chrono::DateTime<Utc>> {
    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| anyhow!("Time '{}' does not exist in {}", input, tz))?;
    Ok(local.with_timezone(&Utc))
}

/// Resolve a timezone argument, bailing early on unknown names.
pub fn resolve_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow!("Unknown timezone: {}", name))
}
