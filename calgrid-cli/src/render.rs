//! Terminal rendering for calendar grids and event lists.
//!
//! Instance colors are the palette hex values from calgrid-core, painted as
//! truecolor when the terminal supports it.

use calgrid_core::event::EventTime;
use calgrid_core::grid::{MonthGrid, WEEKDAY_LABELS};
use calgrid_core::notes::NoteBook;
use calgrid_core::recurrence::Instance;
use chrono::{Datelike, NaiveDate};
use owo_colors::{DynColors, OwoColorize};

const CELL_WIDTH: usize = 6;
/// Event dots shown per day cell before collapsing into a count.
const CELL_DOTS: usize = 2;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Instance {
    /// One agenda line: date, time, colored title, id.
    fn render(&self) -> String {
        let marker = if self.recurring.is_some() || self.is_occurrence() {
            " ↻"
        } else {
            ""
        };
        format!(
            "{}  {:<13} {}{}  {}",
            self.start.date().format("%Y-%m-%d"),
            time_label(self),
            paint(self.background_color, &self.title),
            marker,
            format!("({})", self.id).dimmed(),
        )
    }
}

/// Color text by a `#rrggbb` palette entry, falling back to plain text if the
/// value does not parse.
pub fn paint(hex: &str, text: &str) -> String {
    match hex.parse::<DynColors>() {
        Ok(color) => text.color(color).to_string(),
        Err(_) => text.to_string(),
    }
}

fn time_label(instance: &Instance) -> String {
    match (instance.start, instance.end) {
        (EventTime::DateTime(start), EventTime::DateTime(end)) => {
            format!("{}–{}", start.format("%H:%M"), end.format("%H:%M"))
        }
        _ => "all day".to_string(),
    }
}

/// Month grid: weekday header, one row per week, a dot per event on each day,
/// a `+` marker on days carrying a note, then a legend of the month's events.
pub fn render_month(
    grid: &MonthGrid,
    instances: &[Instance],
    notes: &NoteBook,
    today: NaiveDate,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!("   {}", grid.label().bold()));
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{:<width$}", label, width = CELL_WIDTH))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in &grid.weeks {
        let mut row = String::new();
        for slot in week {
            match slot {
                Some(date) => row.push_str(&render_cell(*date, instances, notes, today)),
                None => row.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        lines.push(row);
    }

    let legend = render_legend(grid, instances);
    if !legend.is_empty() {
        lines.push(String::new());
        lines.extend(legend);
    }

    lines.join("\n")
}

fn render_cell(date: NaiveDate, instances: &[Instance], notes: &NoteBook, today: NaiveDate) -> String {
    let day = format!("{:>2}", date.day());
    let mut cell = if date == today {
        day.reversed().to_string()
    } else {
        day
    };
    let mut used = 2;

    let on_day: Vec<&Instance> = instances.iter().filter(|i| i.occupies(date)).collect();
    for instance in on_day.iter().take(CELL_DOTS) {
        cell.push_str(&paint(instance.background_color, "•"));
        used += 1;
    }
    if on_day.len() > CELL_DOTS {
        cell.push('…');
        used += 1;
    }
    if notes.has_note(date) {
        cell.push('+');
        used += 1;
    }

    cell.push_str(&" ".repeat(CELL_WIDTH.saturating_sub(used)));
    cell
}

/// One legend line per base event visible in the month.
fn render_legend(grid: &MonthGrid, instances: &[Instance]) -> Vec<String> {
    let first = grid.first_day();
    let days = calgrid_core::grid::days_in_month(grid.year, grid.month);
    let last = first + chrono::Duration::days(i64::from(days) - 1);

    instances
        .iter()
        .filter(|i| !i.is_occurrence())
        .filter(|i| {
            // Visible if the base event or any of its occurrences touches the month.
            // Occurrences share the base id prefix.
            instances
                .iter()
                .filter(|other| other.id == i.id || other.id.starts_with(&format!("{}_recurring_", i.id)))
                .any(|other| other.start.date() <= last && other.end.date() >= first)
        })
        .map(|i| {
            let marker = if i.recurring.is_some() { " ↻" } else { "" };
            format!(
                "   {} {}{} {}",
                paint(i.background_color, "•"),
                i.title,
                marker,
                format!("({})", i.id).dimmed(),
            )
        })
        .collect()
}

/// Week view: a heading per day with that day's events and note below it.
pub fn render_week(
    days: &[NaiveDate; 7],
    instances: &[Instance],
    notes: &NoteBook,
    today: NaiveDate,
) -> String {
    let mut lines = Vec::new();

    for date in days {
        lines.push(day_heading(*date, today));
        lines.extend(day_body(*date, instances, notes));
    }

    lines.join("\n")
}

/// Day view: one heading with the full detail below it.
pub fn render_day(date: NaiveDate, instances: &[Instance], notes: &NoteBook, today: NaiveDate) -> String {
    let mut lines = vec![day_heading(date, today)];
    let body = day_body(date, instances, notes);
    if body.is_empty() {
        lines.push("   No events".dimmed().to_string());
    } else {
        lines.extend(body);
    }
    lines.join("\n")
}

fn day_heading(date: NaiveDate, today: NaiveDate) -> String {
    let heading = date.format("%a %b %-d").to_string();
    if date == today {
        format!("{} {}", heading.bold(), "(today)".dimmed())
    } else {
        heading.bold().to_string()
    }
}

fn day_body(date: NaiveDate, instances: &[Instance], notes: &NoteBook) -> Vec<String> {
    let mut lines = Vec::new();

    for instance in instances.iter().filter(|i| i.occupies(date)) {
        lines.push(format!(
            "   {:<13} {} {}",
            time_label(instance),
            paint(instance.background_color, &instance.title),
            format!("({})", instance.id).dimmed(),
        ));
    }
    if let Some(note) = notes.get(date) {
        lines.push(format!("   {}", format!("✎ {}", note).dimmed()));
    }

    lines
}
