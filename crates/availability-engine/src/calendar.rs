//! Month scaffolding for presentation: day lists and Monday-first week grids.
//!
//! Pure proleptic Gregorian date math with no dependency on availability data.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Days in `year`-`month`, computed as "day 0 of the next month".
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    first_of_month(year, month)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or(ValidationError::InvalidMonth { year, month })?;
    Ok(last.day())
}

/// First day of the month, or `InvalidMonth` if the month is out of range.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ValidationError::InvalidMonth { year, month })
}

/// Every date of the month, in order.
pub fn month_dates(year: i32, month: u32) -> Result<Vec<NaiveDate>> {
    let first = first_of_month(year, month)?;
    let count = days_in_month(year, month)?;
    Ok(first.iter_days().take(count as usize).collect())
}

/// Blank cells before day 1 in a Monday-first week row.
pub fn leading_blanks(year: i32, month: u32) -> Result<u32> {
    let first = first_of_month(year, month)?;
    Ok(match first.weekday() {
        Weekday::Sun => 6,
        other => other.num_days_from_sunday() - 1,
    })
}

/// Inclusive iterator over `start..=end`. Empty when `start > end`.
pub fn dates_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let mut next = (start <= end).then_some(start);
    std::iter::from_fn(move || {
        let current = next?;
        next = if current < end {
            current.checked_add_days(Days::new(1))
        } else {
            None
        };
        Some(current)
    })
}

/// Day scaffold of one month for week-aligned display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub leading_blanks: u32,
    /// `1..=days_in_month`.
    pub days: Vec<u32>,
    /// Monday-first rows; `None` pads before day 1 and after the last day.
    pub weeks: Vec<[Option<u32>; 7]>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let count = days_in_month(year, month)?;
        let blanks = leading_blanks(year, month)?;
        let days: Vec<u32> = (1..=count).collect();

        let cells: Vec<Option<u32>> = std::iter::repeat_n(None, blanks as usize)
            .chain(days.iter().copied().map(Some))
            .collect();
        let weeks = cells
            .chunks(7)
            .map(|chunk| {
                let mut row = [None; 7];
                row[..chunk.len()].copy_from_slice(chunk);
                row
            })
            .collect();

        Ok(Self {
            year,
            month,
            days_in_month: count,
            leading_blanks: blanks,
            days,
            weeks,
        })
    }

    /// The calendar date of `day`, if it is in this month.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}
