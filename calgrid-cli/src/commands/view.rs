use anyhow::Result;
use calgrid_core::grid::{MonthGrid, week_of};
use calgrid_core::recurrence::Instance;
use chrono::Local;

use super::parse_date;
use crate::ViewMode;
use crate::context::AppContext;
use crate::render;

pub async fn run(mode: Option<ViewMode>, date: Option<&str>) -> Result<()> {
    let context = AppContext::load().await?;
    let notebook = context.notebook()?;

    let mode = mode.unwrap_or_else(|| default_mode(&context));
    let today = Local::now().date_naive();
    let anchor = match date {
        Some(input) => parse_date(input)?,
        None => today,
    };

    let mut instances = context.coordinator.instances();
    sort_by_start(&mut instances);

    let output = match mode {
        ViewMode::Month => {
            render::render_month(&MonthGrid::containing(anchor), &instances, &notebook, today)
        }
        ViewMode::Week => render::render_week(&week_of(anchor), &instances, &notebook, today),
        ViewMode::Day => render::render_day(anchor, &instances, &notebook, today),
    };

    println!("{}", output);
    Ok(())
}

fn default_mode(context: &AppContext) -> ViewMode {
    match context.config.default_view.as_deref() {
        Some("week") => ViewMode::Week,
        Some("day") => ViewMode::Day,
        _ => ViewMode::Month,
    }
}

fn sort_by_start(instances: &mut [Instance]) {
    instances.sort_by_key(|i| i.start.to_utc());
}
