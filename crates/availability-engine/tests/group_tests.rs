//! Tests for group aggregation: the simple (day-granularity) and detailed
//! (interval-granularity) views, percentage models and month statistics.

use availability_engine::group::filter_min_duration;
use availability_engine::simple::{month_stats, simple_day, simple_range};
use availability_engine::{
    detailed_day, detailed_range, group_day_availability, group_range_availability, simple_month,
    Event, GroupSettings, MemberSchedule, PercentageModel, RecurrenceRule, TimeSlot,
};
use chrono::NaiveDate;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::parse(start, end).unwrap()
}

fn busy(user: &str, d: NaiveDate, slots: &[(&str, &str)]) -> MemberSchedule {
    let event = slots
        .iter()
        .fold(Event::on(user, d), |e, (s, t)| e.with_slot(slot(s, t)));
    MemberSchedule::new(user, vec![event])
}

fn free(user: &str) -> MemberSchedule {
    MemberSchedule::new(user, Vec::new())
}

// ── Simple view ─────────────────────────────────────────────────────────────

#[test]
fn one_fully_busy_one_free_is_fifty_percent() {
    let d = date(2026, 3, 16);
    let members = vec![
        MemberSchedule::new("alice", vec![Event::on("alice", d).all_day()]),
        free("bob"),
    ];

    let day = simple_day(&members, d);

    assert_eq!(day.availability_percentage, 50);
    assert_eq!(day.day, 16);
    assert_eq!(day.available_members.len(), 1);
    assert_eq!(day.available_members[0].user_id, "bob");
    assert_eq!(day.available_members[0].slots, vec![TimeSlot::whole_day()]);
    assert_eq!(day.unavailable_members[0].user_id, "alice");
    assert!(day.time_slots.is_empty());
}

#[test]
fn any_event_makes_a_member_unavailable_for_the_day() {
    let d = date(2026, 3, 16);
    let members = vec![busy("alice", d, &[("12:00", "12:05")]), free("bob")];

    let simple = simple_day(&members, d);
    assert_eq!(simple.availability_percentage, 50);

    // The detailed view still sees 1435 free minutes for alice.
    let detailed = detailed_day(&members, d, &GroupSettings::default());
    assert_eq!(detailed.member_details[0].available_slots.len(), 2);
    assert!(detailed.all_members_available);
}

#[test]
fn unavailable_members_carry_annotated_slots_and_notes() {
    let d = date(2026, 3, 16);
    let event = Event::on("alice", d)
        .with_title("Dentist")
        .with_color("#ff0000")
        .with_slot(slot("10:00", "11:00"));
    let members = vec![MemberSchedule::new("alice", vec![event]).with_note("back by noon")];

    let day = simple_day(&members, d);

    let alice = &day.unavailable_members[0];
    assert_eq!(alice.note.as_deref(), Some("back by noon"));
    assert_eq!(alice.slots[0].title.as_deref(), Some("Dentist"));
    assert_eq!(alice.slots[0].color.as_deref(), Some("#ff0000"));
    assert_eq!(day.availability_percentage, 0);
}

#[test]
fn percentage_rounds_to_nearest() {
    let d = date(2026, 3, 16);
    let members = vec![busy("a", d, &[("09:00", "10:00")]), free("b"), free("c")];
    assert_eq!(simple_day(&members, d).availability_percentage, 67);
}

#[test]
fn simple_range_covers_inclusive_dates() {
    let days = simple_range(&[free("a")], date(2026, 3, 30), date(2026, 4, 2)).unwrap();
    assert_eq!(days.len(), 4);
    assert_eq!(days.iter().map(|d| d.day).collect::<Vec<_>>(), vec![30, 31, 1, 2]);
}

#[test]
fn reversed_range_is_rejected() {
    assert!(simple_range(&[free("a")], date(2026, 3, 2), date(2026, 3, 1)).is_err());
}

// ── Month stats ─────────────────────────────────────────────────────────────

#[test]
fn month_view_counts_full_partial_and_empty_days() {
    // February 2026: 28 days. Alice is away on Mondays; Bob is away 2026-02-10.
    let alice = MemberSchedule::new(
        "alice",
        vec![Event::new("alice", date(2026, 2, 1), date(2026, 2, 28))
            .unwrap()
            .all_day()
            .with_recurrence(RecurrenceRule::weekly([1]))],
    );
    let bob = MemberSchedule::new("bob", vec![Event::on("bob", date(2026, 2, 10)).all_day()]);
    let members = vec![alice, bob, MemberSchedule::pending("carol")];

    let month = simple_month(&members, 2026, 2).unwrap();

    assert_eq!(month.days.len(), 28);
    assert_eq!(month.days[0].day, 1);
    // Mondays: 2, 9, 16, 23 → 67%; the 10th → 67%; every other day → 100%.
    assert_eq!(month.days[1].availability_percentage, 67);
    assert_eq!(month.days[9].availability_percentage, 67);
    assert_eq!(month.stats.total_days, 28);
    assert_eq!(month.stats.days_with_full_availability, 23);
    assert_eq!(month.stats.days_with_partial_availability, 5);
    assert_eq!(month.stats.days_with_no_availability, 0);
    // (23 * 100 + 5 * 67) / 28 = 94.1
    assert_eq!(month.stats.average_availability, 94);
    assert_eq!(month.stats.member_count, 3);
    assert_eq!(month.stats.schedules_submitted, 2);
}

#[test]
fn month_stats_buckets_and_average() {
    let stats = month_stats(&[100, 0, 50, 100], 4, 2, 2);
    assert_eq!(stats.days_with_full_availability, 2);
    assert_eq!(stats.days_with_partial_availability, 1);
    assert_eq!(stats.days_with_no_availability, 1);
    assert_eq!(stats.average_availability, 63); // 62.5 rounds up
}

#[test]
fn month_view_rejects_invalid_month() {
    assert!(simple_month(&[free("a")], 2026, 13).is_err());
    assert!(simple_month(&[free("a")], 2026, 0).is_err());
}

// ── Detailed view ───────────────────────────────────────────────────────────

#[test]
fn fully_busy_member_leaves_no_common_window() {
    let d = date(2026, 3, 16);
    let members = vec![
        MemberSchedule::new("alice", vec![Event::on("alice", d).all_day()]),
        free("bob"),
    ];

    let day = detailed_day(&members, d, &GroupSettings::default());

    assert!(day.common_time_slots.is_empty());
    assert_eq!(day.total_common_hours, 0.0);
    assert!(!day.all_members_available);
    assert_eq!(day.member_details[0].total_busy_hours, 24.0);
    assert_eq!(day.member_details[1].total_available_hours, 24.0);
}

#[test]
fn common_windows_intersect_every_member() {
    let d = date(2026, 3, 16);
    let members = vec![
        busy("alice", d, &[("00:00", "09:00"), ("12:00", "13:00"), ("18:00", "23:59")]),
        busy("bob", d, &[("00:00", "10:00"), ("16:00", "23:59")]),
    ];

    let day = detailed_day(&members, d, &GroupSettings::default());

    // alice free 09-12, 13-18; bob free 10-16 → 10-12, 13-16
    assert_eq!(
        day.common_time_slots,
        vec![slot("10:00", "12:00"), slot("13:00", "16:00")]
    );
    assert_eq!(day.total_common_hours, 5.0);
    assert!(day.all_members_available);
}

#[test]
fn minimum_hours_filter_boundaries() {
    let d = date(2026, 3, 16);
    // Common free: 09:00-10:30 (90 min) and 14:00-16:00 (120 min).
    let members = vec![
        busy("alice", d, &[("00:00", "09:00"), ("10:30", "14:00"), ("16:00", "23:59")]),
        free("bob"),
    ];

    let day = detailed_day(&members, d, &GroupSettings::new(2).unwrap());
    assert_eq!(day.common_time_slots, vec![slot("14:00", "16:00")]);
    assert_eq!(day.total_common_hours, 2.0);

    let lenient = detailed_day(&members, d, &GroupSettings::new(1).unwrap());
    assert_eq!(lenient.common_time_slots.len(), 2);
    assert_eq!(lenient.total_common_hours, 3.5);
}

#[test]
fn filter_min_duration_is_inclusive() {
    let slots = vec![slot("09:00", "10:30"), slot("12:00", "14:00")];
    let minimum = GroupSettings::default().minimum_minutes();
    assert_eq!(minimum, 120);
    assert_eq!(filter_min_duration(&slots, minimum), vec![slot("12:00", "14:00")]);
}

#[test]
fn detailed_member_busy_slots_are_annotated() {
    let d = date(2026, 3, 16);
    let event = Event::on("alice", d)
        .with_title("Review")
        .with_slot(slot("09:00", "10:00"))
        .with_slot(slot("09:30", "11:00"));
    let day = detailed_day(&[MemberSchedule::new("alice", vec![event])], d, &GroupSettings::default());

    let alice = &day.member_details[0];
    assert_eq!(alice.busy_slots.len(), 2);
    assert_eq!(alice.busy_slots[0].title.as_deref(), Some("Review"));
    // Overlap counted once.
    assert_eq!(alice.total_busy_hours, 2.0);
}

#[test]
fn detailed_range_one_result_per_date() {
    let members = vec![free("a"), free("b")];
    let days = detailed_range(
        &members,
        date(2026, 3, 1),
        date(2026, 3, 7),
        &GroupSettings::default(),
    )
    .unwrap();
    assert_eq!(days.len(), 7);
    assert!(days.iter().all(|d| d.total_common_hours == 24.0));
}

#[test]
fn no_members_has_no_common_time() {
    let day = detailed_day(&[], date(2026, 3, 16), &GroupSettings::default());
    assert!(day.common_time_slots.is_empty());
    assert!(!day.all_members_available);
    assert_eq!(simple_day(&[], date(2026, 3, 16)).availability_percentage, 0);
}

// ── Percentage models ───────────────────────────────────────────────────────

#[test]
fn fully_free_model_reports_no_window() {
    let d = date(2026, 3, 16);
    let members = vec![busy("alice", d, &[("09:00", "10:00")]), free("bob")];

    let group = group_day_availability(&members, d, PercentageModel::FullyFree);

    assert_eq!(group.available_percentage, 50);
    assert!(group.common_free_slots.is_empty());
    assert_eq!(group.per_member.len(), 2);
    assert_eq!(group.per_member["alice"].busy_slots, vec![slot("09:00", "10:00")]);
}

#[test]
fn common_window_model_measures_shared_free_time() {
    let d = date(2026, 3, 16);
    // Shared free time: 24h - 12h busy = 12h → 50%.
    let members = vec![busy("alice", d, &[("06:00", "18:00")]), free("bob")];

    let group = group_day_availability(&members, d, PercentageModel::CommonWindow);

    assert_eq!(group.available_percentage, 50);
    assert_eq!(
        group.common_free_slots,
        vec![TimeSlot::new(0, 360).unwrap(), TimeSlot::new(1080, 1440).unwrap()]
    );
}

#[test]
fn group_range_is_inclusive_and_validated() {
    let members = vec![free("a")];
    let days = group_range_availability(
        &members,
        date(2026, 3, 1),
        date(2026, 3, 3),
        PercentageModel::FullyFree,
    )
    .unwrap();
    assert_eq!(days.len(), 3);
    assert!(days.iter().all(|d| d.available_percentage == 100));

    assert!(group_range_availability(
        &members,
        date(2026, 3, 3),
        date(2026, 3, 1),
        PercentageModel::FullyFree
    )
    .is_err());
}
