//! # Slot grid
//!
//! Booking slots are fixed-length intervals generated from the configured
//! opening hour, closing hour and slot duration. Times are kept as minutes
//! since midnight and rendered as `HH:MM`.
//!
//! A slot is generated for every start strictly before the closing time, so
//! the last slot of a day may run past closing when the opening hours are not
//! a multiple of the duration. Slot ends are capped at `24:00`.
//!
//! Conflicts are found by a linear scan over the day's occupied intervals:
//! two intervals conflict when they are on the same physical surface, on the
//! same date and overlap.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::courts::Court;
use crate::errors::CourtError;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since midnight, `0..=1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Whole hour, clamped to `24:00`.
    pub const fn from_hours(hours: u8) -> Self {
        let hours = if hours > 24 { 24 } else { hours };
        TimeOfDay(hours as u16 * 60)
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(TimeOfDay(minutes))
    }

    pub fn from_hm(hours: u16, minutes: u16) -> Option<Self> {
        if minutes >= 60 {
            return None;
        }
        Self::from_minutes(hours.checked_mul(60)?.checked_add(minutes)?)
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Adds minutes, saturating at `24:00`.
    pub fn saturating_add(&self, minutes: u16) -> Self {
        TimeOfDay(self.0.saturating_add(minutes).min(MINUTES_PER_DAY))
    }

    /// Minutes from `self` until `later`, zero if `later` is not after `self`.
    pub fn minutes_until(&self, later: TimeOfDay) -> u16 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = CourtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CourtError::Validation(format!("Invalid time '{}', expected HH:MM", s));

        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        let hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;

        TimeOfDay::from_hm(hours, minutes).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = CourtError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub nocturnal: bool,
}

impl Slot {
    /// Stable identifier, e.g. `06:00-07:00`.
    pub fn id(&self) -> String {
        slot_id(self.start, self.end)
    }

    /// Human readable label, e.g. `06:00 - 07:00`.
    pub fn label(&self) -> String {
        slot_label(self.start, self.end)
    }

    pub fn overlaps(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.start < end && start < self.end
    }
}

pub fn slot_id(start: TimeOfDay, end: TimeOfDay) -> String {
    format!("{}-{}", start, end)
}

pub fn slot_label(start: TimeOfDay, end: TimeOfDay) -> String {
    format!("{} - {}", start, end)
}

/// Parameters of the daily slot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
    pub duration_minutes: u16,
    pub night_start: TimeOfDay,
}

impl SlotGrid {
    pub fn slots(&self) -> Vec<Slot> {
        generate_slots(self.open, self.close, self.duration_minutes, self.night_start)
    }

    /// The grid slot beginning at `start`, if any.
    pub fn slot_starting_at(&self, start: TimeOfDay) -> Option<Slot> {
        self.slots().into_iter().find(|slot| slot.start == start)
    }

    /// Whether `[start, end)` is made of whole consecutive grid slots.
    pub fn covers_whole_slots(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        let slots = self.slots();
        start < end
            && slots.iter().any(|slot| slot.start == start)
            && slots.iter().any(|slot| slot.end == end)
    }

    /// Whether any part of `[start, end)` falls in the nocturnal range.
    pub fn is_nocturnal(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        slots_in_range(&self.slots(), start, end)
            .iter()
            .any(|slot| slot.nocturnal)
            || start >= self.night_start
    }
}

/// Builds the ordered slot list for one day.
///
/// Returns an empty grid when `duration_minutes` is zero or `open` is not
/// before `close`.
pub fn generate_slots(
    open: TimeOfDay,
    close: TimeOfDay,
    duration_minutes: u16,
    night_start: TimeOfDay,
) -> Vec<Slot> {
    let mut slots = Vec::new();
    if duration_minutes == 0 || open >= close {
        return slots;
    }

    let mut start = open;
    while start < close {
        let end = start.saturating_add(duration_minutes);
        slots.push(Slot {
            start,
            end,
            nocturnal: start >= night_start,
        });
        if end == TimeOfDay::END_OF_DAY {
            break;
        }
        start = end;
    }

    slots
}

/// Grid slots overlapping `[start, end)`.
pub fn slots_in_range(slots: &[Slot], start: TimeOfDay, end: TimeOfDay) -> Vec<Slot> {
    slots
        .iter()
        .filter(|slot| slot.overlaps(start, end))
        .copied()
        .collect()
}

/// An interval of court time held by an active reservation or an
/// instructor booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub court: Court,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Occupancy {
    pub fn blocks(&self, court: Court, date: NaiveDate, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.date == date && self.court.shares_surface(court) && self.start < end && start < self.end
    }
}

/// First occupied interval clashing with `[start, end)` on `court` and `date`.
pub fn find_conflict(
    existing: &[Occupancy],
    court: Court,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
) -> Option<&Occupancy> {
    existing
        .iter()
        .find(|occupied| occupied.blocks(court, date, start, end))
}

pub fn is_slot_taken(
    existing: &[Occupancy],
    court: Court,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
) -> bool {
    find_conflict(existing, court, date, start, end).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub id: String,
    pub label: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub nocturnal: bool,
    pub available: bool,
    /// Night surcharge in cents, present for nocturnal slots only.
    pub night_price_cents: Option<i64>,
}

/// Annotates every grid slot with whether it is still free.
pub fn availability(
    grid: &SlotGrid,
    existing: &[Occupancy],
    court: Court,
    date: NaiveDate,
    night_price_cents: i64,
) -> Vec<SlotAvailability> {
    grid.slots()
        .into_iter()
        .map(|slot| SlotAvailability {
            id: slot.id(),
            label: slot.label(),
            start: slot.start,
            end: slot.end,
            nocturnal: slot.nocturnal,
            available: !is_slot_taken(existing, court, date, slot.start, slot.end),
            night_price_cents: slot.nocturnal.then_some(night_price_cents),
        })
        .collect()
}
