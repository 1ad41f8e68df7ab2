//! # availability-engine
//!
//! Deterministic group availability for shared calendars.
//!
//! Given each member's calendar events (one-off, multi-day, all-day or
//! recurring), the engine computes every member's busy/free split for a date,
//! the free time the whole group shares, and percentage rollups over a month.
//! All inputs are immutable snapshots and every function is pure: the same
//! input always yields the same output.
//!
//! Times are naive minutes within a day (`0..=1440`); there is no timezone
//! handling.
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM` parsing/formatting and the `TimeSlot` interval
//! - [`interval`] — merge, complement, intersect over slot sets
//! - [`recurrence`] — whether an event applies on a date, and its slots there
//! - [`day`] — one user's busy/free partition of a day
//! - [`group`] — per-member days, common free time, percentage models
//! - [`simple`] — day-granularity month view and `MonthStats`
//! - [`detailed`] — interval-granularity range view with a minimum-hours filter
//! - [`calendar`] — month day lists and Monday-first week grids
//! - [`snapshot`] / [`config`] — input document and group settings
//! - [`error`] — Error types

pub mod calendar;
pub mod config;
pub mod day;
pub mod detailed;
pub mod error;
pub mod event;
pub mod group;
pub mod interval;
pub mod recurrence;
pub mod simple;
pub mod snapshot;
pub mod time;

pub use calendar::{days_in_month, leading_blanks, MonthGrid};
pub use config::GroupSettings;
pub use day::{compute_day_availability, compute_range_availability, DayAvailability};
pub use detailed::{detailed_day, detailed_range, DetailedDay};
pub use error::ValidationError;
pub use event::{Event, UserId};
pub use group::{group_day_availability, group_range_availability, PercentageModel};
pub use interval::{complement, intersect, intersect_all, merge_overlapping};
pub use recurrence::{is_active_on_date, slots_for_date, Frequency, RecurrenceRule};
pub use simple::{simple_month, MonthStats, SimpleMonth};
pub use snapshot::{GroupSnapshot, MemberSchedule};
pub use time::TimeSlot;
