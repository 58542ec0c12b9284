use anyhow::Result;
use calgrid_core::event::{EventDraft, EventTime};
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;

use super::{create_spinner, parse_event_time, resolve_timezone};
use crate::context::AppContext;

/// Full-field edit: prompts are prefilled with the current values, and the
/// whole draft is sent even for fields left untouched. Recurrence is carried
/// over unchanged.
pub async fn run(id: &str) -> Result<()> {
    let mut context = AppContext::load().await?;

    let current = match context.coordinator.event(id) {
        Some(event) => event.clone(),
        None => anyhow::bail!("Event '{}' not found", id),
    };
    let tz = resolve_timezone(&current.timezone)?;

    let title: String = Input::new()
        .with_prompt("  Title")
        .with_initial_text(current.title.clone())
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("title must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let all_day = Confirm::new()
        .with_prompt("  All day?")
        .default(current.all_day())
        .interact()?;

    let start = prompt_time("  Start", format_for_edit(current.start, all_day, &tz), all_day, &tz)?;
    let end = prompt_time("  End", format_for_edit(current.end, all_day, &tz), all_day, &tz)?;

    let draft = EventDraft {
        title,
        start,
        end,
        timezone: current.timezone.clone(),
        recurring: current.recurring,
    };
    draft.validate()?;

    let spinner = create_spinner(format!("Updating {}", draft.title));
    let result = context.coordinator.update(id, draft).await;
    spinner.finish_and_clear();

    result?;
    println!("{}", format!("  Updated ({})", id).green());
    Ok(())
}

/// Prompt for a time, retrying until it parses and matches the all-day kind.
fn prompt_time(
    prompt: &str,
    initial: String,
    all_day: bool,
    tz: &chrono_tz::Tz,
) -> Result<EventTime> {
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .with_initial_text(initial.clone())
            .interact_text()?;

        match parse_event_time(&input, tz) {
            Ok(time) if time.is_all_day() == all_day => return Ok(time),
            Ok(_) if all_day => {
                eprintln!("  {}", "Use a bare date (YYYY-MM-DD) for all-day events".red());
            }
            Ok(_) => {
                eprintln!("  {}", "Include a time of day (e.g. 2025-03-20T15:00)".red());
            }
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Prefill text the prompt parser round-trips: bare dates for all-day,
/// wall-clock in the event's timezone otherwise.
fn format_for_edit(time: EventTime, all_day: bool, tz: &chrono_tz::Tz) -> String {
    match time {
        EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
        EventTime::DateTime(dt) if all_day => dt.date_naive().format("%Y-%m-%d").to_string(),
        EventTime::DateTime(dt) => dt.with_timezone(tz).format("%Y-%m-%dT%H:%M").to_string(),
    }
}
