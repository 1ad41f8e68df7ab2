//! WASM bindings for availability-engine.
//!
//! Exposes per-user day availability, the simple month view, the detailed
//! range view and the month grid to JavaScript via `wasm-bindgen`. Complex
//! types cross the boundary as JSON strings in the same camelCase shape the
//! engine serializes.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/availability-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use availability_engine::{
    compute_range_availability, detailed_range, simple_month, Event, GroupSettings,
    GroupSnapshot, MonthGrid,
};
use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse a `YYYY-MM-DD` date.
fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Parse and validate a JSON array of events.
fn parse_events_json(json: &str) -> Result<Vec<Event>, JsValue> {
    let events: Vec<Event> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))?;
    for event in &events {
        event.validate().map_err(js_error)?;
    }
    Ok(events)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// One user's busy/free split for each date in `[start, end]`.
///
/// `events_json` is a JSON array of events. Returns a JSON array of
/// `{date, busySlots, freeSlots, busyEntries}` objects.
#[wasm_bindgen(js_name = "userAvailability")]
pub fn user_availability(events_json: &str, start: &str, end: &str) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(JsValue::from_str(&format!(
            "Invalid range: {} is after {}",
            start, end
        )));
    }

    to_json(&compute_range_availability(&events, start, end))
}

/// Day-granularity view of a month with its stats block.
///
/// `snapshot_json` is a group snapshot `{members, settings}`.
#[wasm_bindgen(js_name = "monthAvailability")]
pub fn month_availability(snapshot_json: &str, year: i32, month: u32) -> Result<String, JsValue> {
    let snapshot = GroupSnapshot::from_json(snapshot_json).map_err(js_error)?;
    let view = simple_month(&snapshot.members, year, month).map_err(js_error)?;
    to_json(&view)
}

/// Interval-granularity view for each date in `[start, end]`.
///
/// `min_hours` overrides the snapshot's `minimumAvailabilityHours` when given.
#[wasm_bindgen(js_name = "rangeAvailability")]
pub fn range_availability(
    snapshot_json: &str,
    start: &str,
    end: &str,
    min_hours: Option<u8>,
) -> Result<String, JsValue> {
    let snapshot = GroupSnapshot::from_json(snapshot_json).map_err(js_error)?;
    let settings = match min_hours {
        Some(hours) => GroupSettings::new(hours).map_err(js_error)?,
        None => snapshot.settings,
    };
    let days = detailed_range(
        &snapshot.members,
        parse_date(start)?,
        parse_date(end)?,
        &settings,
    )
    .map_err(js_error)?;
    to_json(&days)
}

/// Month scaffold: day list, leading blanks and Monday-first week rows.
#[wasm_bindgen(js_name = "monthGrid")]
pub fn month_grid(year: i32, month: u32) -> Result<String, JsValue> {
    let grid = MonthGrid::new(year, month).map_err(js_error)?;
    to_json(&grid)
}
