//! Interval-granularity view: each member's free time, the windows every
//! member shares, and the hours those windows add up to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::dates_between;
use crate::config::GroupSettings;
use crate::error::Result;
use crate::event::UserId;
use crate::group::{check_range, common_free_slots, filter_min_duration, member_days};
use crate::interval::total_hours;
use crate::snapshot::MemberSchedule;
use crate::time::TimeSlot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetail {
    pub user_id: UserId,
    /// Unmerged busy slots carrying their event title and color.
    pub busy_slots: Vec<TimeSlot>,
    pub available_slots: Vec<TimeSlot>,
    /// Hours of merged busy time; overlapping events count once.
    pub total_busy_hours: f64,
    pub total_available_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedDay {
    pub date: NaiveDate,
    pub member_details: Vec<MemberDetail>,
    /// Shared free windows of at least the group's minimum hours.
    pub common_time_slots: Vec<TimeSlot>,
    pub total_common_hours: f64,
    /// At least one qualifying common window exists.
    pub all_members_available: bool,
}

pub fn detailed_day(
    members: &[MemberSchedule],
    date: NaiveDate,
    settings: &GroupSettings,
) -> DetailedDay {
    let days = member_days(members, date);

    let common = common_free_slots(&days);
    let common_time_slots = filter_min_duration(&common, settings.minimum_minutes());
    tracing::trace!(
        %date,
        windows = common.len(),
        kept = common_time_slots.len(),
        minimum_hours = settings.minimum_availability_hours,
        "filtered common windows"
    );

    let member_details = members
        .iter()
        .zip(&days)
        .map(|(member, day)| MemberDetail {
            user_id: member.user_id.clone(),
            busy_slots: day.annotated_busy_slots(),
            available_slots: day.free_slots.clone(),
            total_busy_hours: day.total_busy_hours(),
            total_available_hours: day.total_free_hours(),
        })
        .collect();

    let total_common_hours = total_hours(&common_time_slots);
    let all_members_available = !common_time_slots.is_empty();

    DetailedDay {
        date,
        member_details,
        common_time_slots,
        total_common_hours,
        all_members_available,
    }
}

/// [`detailed_day`] for every date in `[start, end]`.
pub fn detailed_range(
    members: &[MemberSchedule],
    start: NaiveDate,
    end: NaiveDate,
    settings: &GroupSettings,
) -> Result<Vec<DetailedDay>> {
    check_range(start, end)?;
    settings.validate()?;
    tracing::debug!(
        %start,
        %end,
        members = members.len(),
        minimum_hours = settings.minimum_availability_hours,
        "computing detailed availability"
    );
    Ok(dates_between(start, end)
        .map(|date| detailed_day(members, date, settings))
        .collect())
}
