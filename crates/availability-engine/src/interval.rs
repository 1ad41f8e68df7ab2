//! Interval algebra over half-open minute slots within one day.
//!
//! Merging sorts by start and folds touching or overlapping intervals
//! together. Intersection keeps only positive-length overlaps and re-merges,
//! since pairwise overlaps can produce adjacent fragments.

use crate::time::{Minutes, TimeSlot, DAY_END, DAY_START};

/// Merge overlapping or adjacent slots.
///
/// Returns a sorted, non-overlapping, minimal list. Display metadata is dropped.
/// Ends past the day boundary are clipped to 1440; empty slots are dropped.
pub fn merge_overlapping(slots: &[TimeSlot]) -> Vec<TimeSlot> {
    let mut intervals: Vec<(Minutes, Minutes)> = slots
        .iter()
        .map(|s| (s.start, s.end.min(DAY_END)))
        .filter(|(start, end)| start < end)
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    // Sort by start (then end for stability).
    intervals.sort_unstable();

    let mut merged: Vec<(Minutes, Minutes)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
        .into_iter()
        .map(|(start, end)| TimeSlot::span(start, end))
        .collect()
}

/// Free gaps between busy slots inside `[day_start, day_end)`.
///
/// `busy` is merged first, so callers may pass raw slots. Slots outside the
/// window are clipped. An empty `busy` yields the whole window. `day_end` is
/// clipped to 1440.
pub fn complement(busy: &[TimeSlot], day_start: Minutes, day_end: Minutes) -> Vec<TimeSlot> {
    let day_end = day_end.min(DAY_END);
    if day_start >= day_end {
        return Vec::new();
    }

    let merged = merge_overlapping(busy);

    let mut free = Vec::new();
    let mut cursor = day_start;

    for slot in &merged {
        let busy_start = slot.start.max(day_start);
        let busy_end = slot.end.min(day_end);
        if busy_start >= busy_end {
            continue;
        }
        if cursor < busy_start {
            free.push(TimeSlot::span(cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }

    // Trailing gap after the last busy slot.
    if cursor < day_end {
        free.push(TimeSlot::span(cursor, day_end));
    }

    free
}

/// [`complement`] over the full day `[0, 1440)`.
pub fn complement_day(busy: &[TimeSlot]) -> Vec<TimeSlot> {
    complement(busy, DAY_START, DAY_END)
}

/// Intersection of two slot sets.
///
/// Overlap of `a` and `b` is `[max(a.start, b.start), min(a.end, b.end))`.
/// Zero-length overlaps are discarded.
pub fn intersect(a: &[TimeSlot], b: &[TimeSlot]) -> Vec<TimeSlot> {
    let mut overlaps = Vec::new();

    for x in a {
        for y in b {
            let start = x.start.max(y.start);
            let end = x.end.min(y.end).min(DAY_END);
            if start < end {
                overlaps.push(TimeSlot::span(start, end));
            }
        }
    }

    merge_overlapping(&overlaps)
}

/// Left-fold [`intersect`] over every set.
///
/// Zero sets have no common time and return `[]`. One set returns it merged.
/// Stops as soon as the accumulator is empty.
pub fn intersect_all<S: AsRef<[TimeSlot]>>(sets: &[S]) -> Vec<TimeSlot> {
    let Some((first, rest)) = sets.split_first() else {
        return Vec::new();
    };

    let mut acc = merge_overlapping(first.as_ref());
    for set in rest {
        if acc.is_empty() {
            break;
        }
        acc = intersect(&acc, set.as_ref());
    }
    acc
}

/// `(end - start) / 60`.
pub fn duration_hours(slot: &TimeSlot) -> f64 {
    slot.duration_hours()
}

/// Sum of slot durations in minutes.
pub fn total_minutes(slots: &[TimeSlot]) -> u32 {
    slots.iter().map(TimeSlot::duration_minutes).sum()
}

/// Sum of slot durations in hours.
pub fn total_hours(slots: &[TimeSlot]) -> f64 {
    f64::from(total_minutes(slots)) / 60.0
}
