use anyhow::Result;
use calgrid_core::event::TimeChange;
use owo_colors::OwoColorize;

use super::{create_spinner, parse_event_time, resolve_timezone};
use crate::context::AppContext;

/// Move an event to a new start. With no `--end` the event collapses to a
/// zero-duration drop at the new start; the coordinator rolls the change back
/// if the store rejects it.
pub async fn run(id: &str, start: &str, end: Option<&str>) -> Result<()> {
    let mut context = AppContext::load().await?;

    let current = match context.coordinator.event(id) {
        Some(event) => event.clone(),
        None => anyhow::bail!("Event '{}' not found", id),
    };
    let tz = resolve_timezone(&current.timezone)?;

    let change = TimeChange {
        start: parse_event_time(start, &tz)?,
        end: end.map(|e| parse_event_time(e, &tz)).transpose()?,
    };

    let spinner = create_spinner(format!("Moving {}", current.title));
    let result = context.coordinator.reschedule(id, change).await;
    spinner.finish_and_clear();

    result?;

    let moved = context
        .coordinator
        .event(id)
        .expect("event exists after a successful reschedule");
    println!(
        "{}",
        format!(
            "  Moved {} to {}",
            moved.title,
            moved.start.date().format("%Y-%m-%d")
        )
        .green()
    );
    Ok(())
}
