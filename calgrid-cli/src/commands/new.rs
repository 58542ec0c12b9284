use anyhow::{Result, anyhow};
use calgrid_core::event::{EventDraft, EventTime, Frequency, RecurrenceRule};
use chrono::Duration;
use chrono_tz::Tz;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{create_spinner, parse_date, parse_event_time, resolve_timezone};
use crate::FrequencyArg;
use crate::context::AppContext;

pub struct NewArgs {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub timezone: Option<String>,
    pub every: Option<FrequencyArg>,
    pub interval: u32,
    pub until: Option<String>,
}

pub async fn run(args: NewArgs) -> Result<()> {
    let mut context = AppContext::load().await?;
    let interactive = args.title.is_none() || args.start.is_none();

    let tz_name = args.timezone.unwrap_or_else(|| context.timezone());
    let tz = resolve_timezone(&tz_name)?;

    // --- Title ---
    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("title must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    // --- Start ---
    let start = match args.start {
        Some(s) => parse_event_time(&s, &tz)?,
        None => prompt_with_retry("  When?", |input| parse_event_time(input, &tz))?,
    };

    // --- End ---
    let default_hint = if start.is_all_day() { "same day" } else { "1 hour" };
    let end = if let Some(end_input) = args.end {
        parse_event_time(&end_input, &tz)?
    } else if let Some(duration_input) = args.duration {
        apply_duration(start, &duration_input)?
    } else if interactive {
        prompt_end(start, &tz, default_hint)?
    } else {
        default_end(start)
    };

    // --- Recurrence ---
    let recurring = match args.every {
        Some(freq) => Some(RecurrenceRule {
            frequency: frequency(freq),
            interval: args.interval,
            end_date: args.until.as_deref().map(parse_date).transpose()?,
        }),
        None => None,
    };

    let draft = EventDraft {
        title,
        start,
        end,
        timezone: tz_name,
        recurring,
    };
    draft.validate()?;

    let spinner = create_spinner(format!("Creating {}", draft.title));
    let result = context.coordinator.create(draft).await;
    spinner.finish_and_clear();

    let id = result?;
    if interactive {
        println!();
    }
    println!("{}", format!("  Created ({})", id).green());

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<F>(prompt: &str, parse: F) -> Result<EventTime>
where
    F: Fn(&str) -> Result<EventTime>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Prompt for an end time or a duration, with retry on parse errors.
fn prompt_end(start: EventTime, tz: &Tz, default_hint: &str) -> Result<EventTime> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("  Until? ({})", default_hint))
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(default_end(start));
        }
        match parse_event_time(&input, tz).or_else(|_| apply_duration(start, &input)) {
            Ok(end) => return Ok(end),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Interpret input like "1h" or "2days" as a duration from the start.
fn apply_duration(start: EventTime, input: &str) -> Result<EventTime> {
    let parsed = humantime::parse_duration(input)
        .map_err(|e| anyhow!("Could not parse duration '{}': {}", input, e))?;
    let duration = Duration::from_std(parsed).map_err(|_| anyhow!("Duration '{}' is too large", input))?;

    Ok(match start {
        // All-day events span whole days inclusively: "1 day" stays on the
        // start date, "2 days" ends the day after.
        EventTime::Date(d) => EventTime::Date(d + Duration::days((duration.num_days() - 1).max(0))),
        EventTime::DateTime(dt) => EventTime::DateTime(dt + duration),
    })
}

fn default_end(start: EventTime) -> EventTime {
    match start {
        EventTime::Date(d) => EventTime::Date(d),
        EventTime::DateTime(dt) => EventTime::DateTime(dt + Duration::hours(1)),
    }
}

fn frequency(arg: FrequencyArg) -> Frequency {
    match arg {
        FrequencyArg::Daily => Frequency::Daily,
        FrequencyArg::Weekly => Frequency::Weekly,
        FrequencyArg::Monthly => Frequency::Monthly,
        FrequencyArg::Yearly => Frequency::Yearly,
    }
}
