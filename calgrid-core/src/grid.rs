//! Calendar grid geometry.
//!
//! Sunday-first layout: a month grid is a sequence of 7-slot weeks where
//! slots before the 1st and after the last day are blank.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::{CalGridError, CalGridResult};

/// One month laid out as rows of 7 day slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    pub weeks: Vec<[Option<NaiveDate>; 7]>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> CalGridResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CalGridError::Validation(format!("invalid month: {}-{}", year, month)))?;

        let leading = first.weekday().num_days_from_sunday() as usize;
        let days = days_in_month(year, month);

        let mut weeks = Vec::new();
        let mut week: [Option<NaiveDate>; 7] = [None; 7];
        let mut slot = leading;

        for day in 1..=days {
            week[slot] = NaiveDate::from_ymd_opt(year, month, day);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }

        Ok(MonthGrid { year, month, weeks })
    }

    /// The grid for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        // A date's own year/month always form a valid grid
        Self::new(date.year(), date.month()).expect("date has a valid year and month")
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("grid holds a valid month")
    }

    /// Display label, e.g. "January 2024".
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Grid for the previous month.
    pub fn previous(&self) -> Self {
        let anchor = self.first_day() - Duration::days(1);
        Self::containing(anchor)
    }

    /// Grid for the next month.
    pub fn next(&self) -> Self {
        let days = days_in_month(self.year, self.month);
        let anchor = self.first_day() + Duration::days(i64::from(days));
        Self::containing(anchor)
    }
}

/// Number of days in a month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next_first) {
        (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
        _ => 0,
    }
}

/// The 7 days of the Sunday-started week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let offset = date.weekday().num_days_from_sunday() as i64;
    let sunday = date - Duration::days(offset);
    std::array::from_fn(|i| sunday + Duration::days(i as i64))
}

/// Weekday headers in grid order.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Position of a weekday in the Sunday-first grid.
pub fn grid_column(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}
