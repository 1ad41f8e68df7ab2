//! Day-granularity view: a member is available on a date iff they have no
//! busy slot that date. Reports presence only, never a merged time window.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{dates_between, month_dates};
use crate::error::Result;
use crate::event::UserId;
use crate::group::{check_range, member_days, percentage, rounded_mean};
use crate::snapshot::{schedules_submitted, MemberSchedule};
use crate::time::TimeSlot;

/// A member's entry in the available or unavailable list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPresence {
    pub user_id: UserId,
    /// The whole day for available members, the annotated busy slots otherwise.
    pub slots: Vec<TimeSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleDay {
    pub date: NaiveDate,
    pub day: u32,
    pub available_members: Vec<MemberPresence>,
    pub unavailable_members: Vec<MemberPresence>,
    pub availability_percentage: u8,
    /// Always empty in this view.
    pub time_slots: Vec<TimeSlot>,
}

/// Rollup of simple-view percentages over a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub total_days: usize,
    pub days_with_full_availability: usize,
    pub days_with_partial_availability: usize,
    pub days_with_no_availability: usize,
    pub average_availability: u8,
    pub member_count: usize,
    pub schedules_submitted: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<SimpleDay>,
    pub stats: MonthStats,
}

pub fn simple_day(members: &[MemberSchedule], date: NaiveDate) -> SimpleDay {
    let days = member_days(members, date);

    let mut available_members = Vec::new();
    let mut unavailable_members = Vec::new();
    for (member, day) in members.iter().zip(&days) {
        if day.is_fully_free() {
            available_members.push(MemberPresence {
                user_id: member.user_id.clone(),
                slots: vec![TimeSlot::whole_day()],
                note: member.note.clone(),
            });
        } else {
            unavailable_members.push(MemberPresence {
                user_id: member.user_id.clone(),
                slots: day.annotated_busy_slots(),
                note: member.note.clone(),
            });
        }
    }

    let availability_percentage = percentage(available_members.len(), members.len());

    SimpleDay {
        date,
        day: date.day(),
        available_members,
        unavailable_members,
        availability_percentage,
        time_slots: Vec::new(),
    }
}

/// [`simple_day`] for every date in `[start, end]`.
pub fn simple_range(
    members: &[MemberSchedule],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<SimpleDay>> {
    check_range(start, end)?;
    Ok(dates_between(start, end)
        .map(|date| simple_day(members, date))
        .collect())
}

/// Every day of `year`-`month` plus its [`MonthStats`].
pub fn simple_month(members: &[MemberSchedule], year: i32, month: u32) -> Result<SimpleMonth> {
    let dates = month_dates(year, month)?;
    tracing::debug!(year, month, members = members.len(), "computing month availability");

    let days: Vec<SimpleDay> = dates
        .into_iter()
        .map(|date| simple_day(members, date))
        .collect();

    let percentages: Vec<u8> = days.iter().map(|d| d.availability_percentage).collect();
    let stats = month_stats(
        &percentages,
        percentages.len(),
        members.len(),
        schedules_submitted(members),
    );

    Ok(SimpleMonth {
        year,
        month,
        days,
        stats,
    })
}

/// Reduce per-day percentages over a fixed day count.
///
/// Days at exactly 100 are full, at exactly 0 are none, anything else is
/// partial. The average divides by `total_days`.
pub fn month_stats(
    percentages: &[u8],
    total_days: usize,
    member_count: usize,
    schedules_submitted: usize,
) -> MonthStats {
    let full = percentages.iter().filter(|p| **p == 100).count();
    let none = percentages.iter().filter(|p| **p == 0).count();
    let partial = percentages.len() - full - none;

    MonthStats {
        total_days,
        days_with_full_availability: full,
        days_with_partial_availability: partial,
        days_with_no_availability: none,
        average_availability: rounded_mean(percentages, total_days),
        member_count,
        schedules_submitted,
    }
}
