//! Group aggregation: per-member day availability, common free time and
//! percentage rollups.
//!
//! Two percentage models coexist. `FullyFree` counts members with no busy
//! slot at all that day; `CommonWindow` measures how much of the day every
//! member shares as free time. They can disagree: a five-minute event makes a
//! member unavailable in the first model and costs five minutes in the second.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::dates_between;
use crate::day::{compute_day_availability, DayAvailability};
use crate::error::{Result, ValidationError};
use crate::event::{Event, UserId};
use crate::interval::{intersect_all, total_minutes};
use crate::snapshot::MemberSchedule;
use crate::time::{TimeSlot, DAY_END};

/// Which definition of `available_percentage` to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PercentageModel {
    /// Share of members with zero busy slots that day.
    #[default]
    FullyFree,
    /// Share of the day free for every member.
    CommonWindow,
}

/// Every member's day plus the group rollup for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDayAvailability {
    pub date: NaiveDate,
    pub per_member: BTreeMap<UserId, DayAvailability>,
    /// Always empty under [`PercentageModel::FullyFree`].
    pub common_free_slots: Vec<TimeSlot>,
    pub available_percentage: u8,
    pub model: PercentageModel,
}

/// `round(100 * part / whole)`, rounding halves up. Zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    ((200 * part + whole) / (2 * whole)) as u8
}

/// `round(mean(values))` over `count` entries, rounding halves up.
pub fn rounded_mean(values: &[u8], count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let sum: usize = values.iter().map(|v| usize::from(*v)).sum();
    ((2 * sum + count) / (2 * count)) as u8
}

/// Keep windows of at least `minimum_minutes` minutes.
///
/// Pass [`GroupSettings::minimum_minutes`](crate::GroupSettings::minimum_minutes)
/// to apply a group's threshold.
pub fn filter_min_duration(slots: &[TimeSlot], minimum_minutes: u32) -> Vec<TimeSlot> {
    slots
        .iter()
        .filter(|slot| slot.duration_minutes() >= minimum_minutes)
        .cloned()
        .collect()
}

/// Reject reversed query ranges.
pub(crate) fn check_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(ValidationError::InvalidSetting(format!(
            "query range start {start} is after end {end}"
        )));
    }
    Ok(())
}

/// Each member's day, in member order.
pub fn member_days(members: &[MemberSchedule], date: NaiveDate) -> Vec<DayAvailability> {
    members
        .iter()
        .map(|member| member_day(member, date))
        .collect()
}

/// One member's day, ignoring events whose range misses `date`.
pub fn member_day(member: &MemberSchedule, date: NaiveDate) -> DayAvailability {
    let relevant: Vec<Event> = member
        .events
        .iter()
        .filter(|e| e.overlaps_range(date, date))
        .cloned()
        .collect();
    compute_day_availability(&relevant, date)
}

/// Intersection of every member's free time on `date`.
pub fn common_free_slots(days: &[DayAvailability]) -> Vec<TimeSlot> {
    let free: Vec<&[TimeSlot]> = days.iter().map(|d| d.free_slots.as_slice()).collect();
    intersect_all(&free)
}

pub fn group_day_availability(
    members: &[MemberSchedule],
    date: NaiveDate,
    model: PercentageModel,
) -> GroupDayAvailability {
    let days = member_days(members, date);

    let (common_free_slots, available_percentage) = match model {
        PercentageModel::FullyFree => {
            let available = days.iter().filter(|d| d.is_fully_free()).count();
            (Vec::new(), percentage(available, days.len()))
        }
        PercentageModel::CommonWindow => {
            let common = common_free_slots(&days);
            let minutes = total_minutes(&common) as usize;
            (common, percentage(minutes, usize::from(DAY_END)))
        }
    };

    tracing::trace!(%date, members = members.len(), available_percentage, "group day computed");

    let per_member = members
        .iter()
        .map(|m| m.user_id.clone())
        .zip(days)
        .collect();

    GroupDayAvailability {
        date,
        per_member,
        common_free_slots,
        available_percentage,
        model,
    }
}

/// [`group_day_availability`] for every date in `[start, end]`.
pub fn group_range_availability(
    members: &[MemberSchedule],
    start: NaiveDate,
    end: NaiveDate,
    model: PercentageModel,
) -> Result<Vec<GroupDayAvailability>> {
    check_range(start, end)?;
    tracing::debug!(%start, %end, members = members.len(), ?model, "computing group range");
    Ok(dates_between(start, end)
        .map(|date| group_day_availability(members, date, model))
        .collect())
}
