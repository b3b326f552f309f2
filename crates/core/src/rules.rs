//! # Booking rules
//!
//! Member reservations go through [`evaluate`], which applies the facility
//! policy in a fixed order and stops at the first violation:
//!
//! 1. members book only between 09:00 and 17:00 local time (admins exempt)
//! 2. the date is not in the past and starts at most 48 hours from now
//! 3. no active reservation on the day before or after
//! 4. the configured daily quota is not exhausted
//! 5. nobody else in the household holds a reservation that day
//! 6. one slot, or exactly two hours on courts that allow it
//! 7. the requested time is free on the physical court
//! 8. night bookings only Monday to Friday, with proof of payment when
//!    the facility requires it
//!
//! Administrators booking on behalf of a member skip all of this except the
//! conflict check, see [`admin_booking_range`].

use chrono::{DateTime, Datelike, Duration, NaiveTime, Timelike, Weekday};
use chrono_tz::Tz;
use thiserror::Error;

use crate::courts::Court;
use crate::models::reservation::{Reservation, ReservationStatus};
use crate::models::settings::ScheduleSettings;
use crate::slots::{is_slot_taken, Occupancy, TimeOfDay};

pub const BOOKING_WINDOW_OPENS_HOUR: u32 = 9;
pub const BOOKING_WINDOW_CLOSES_HOUR: u32 = 17;
pub const ADVANCE_LIMIT_HOURS: i64 = 48;
pub const TWO_HOUR_BOOKING_MINUTES: u16 = 120;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("reservations can only be made between {opens:02}:00 and {closes:02}:00")]
    OutsideBookingWindow { opens: u32, closes: u32 },

    #[error("the selected date is in the past")]
    DateInPast,

    #[error("reservations can be made at most {hours} hours in advance")]
    TooFarAhead { hours: i64 },

    #[error("you already have a reservation on {date}, consecutive days are not allowed")]
    ConsecutiveDay { date: chrono::NaiveDate },

    #[error("daily limit of {limit} reservation(s) reached")]
    DailyLimitReached { limit: u8 },

    #[error("another member of your household already has a reservation that day")]
    HouseholdAlreadyBooked,

    #[error("{court} cannot be booked for {minutes} minutes")]
    InvalidDuration { court: Court, minutes: u16 },

    #[error("{start} is not the start of a bookable slot")]
    NotOnGrid { start: TimeOfDay },

    #[error("the selected time is already taken")]
    SlotTaken,

    #[error("night reservations are only available Monday to Friday")]
    NocturnalOnWeekend,

    #[error("night reservations require a proof of payment")]
    PaymentProofRequired,

    #[error("instructors may hold at most {limit_hours} hours per day on {court}")]
    InstructorLimitExceeded { court: Court, limit_hours: u16 },
}

/// What the rules need to know about the member and the day being booked.
#[derive(Debug, Clone, Copy)]
pub struct BookingContext<'a> {
    /// Current instant at the facility.
    pub now: DateTime<Tz>,
    pub schedule: &'a ScheduleSettings,
    pub is_admin: bool,
    /// All reservations of the member placing the booking.
    pub own_reservations: &'a [Reservation],
    /// Reservations of other members of the same household.
    pub household_reservations: &'a [Reservation],
    /// Court time already held on the requested date.
    pub occupied: &'a [Occupancy],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    pub court: Court,
    pub date: chrono::NaiveDate,
    pub start: TimeOfDay,
    pub end: Option<TimeOfDay>,
    pub has_payment_proof: bool,
}

/// Accepted booking: resolved interval and initial status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingDecision {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub nocturnal: bool,
    pub status: ReservationStatus,
}

pub fn evaluate(
    ctx: &BookingContext<'_>,
    request: &BookingRequest,
) -> Result<BookingDecision, RuleViolation> {
    check_booking_window(ctx)?;
    check_advance_limit(ctx, request)?;
    check_consecutive_days(ctx, request)?;
    check_daily_quota(ctx, request)?;
    check_household(ctx, request)?;
    let (start, end) = resolve_range(ctx.schedule, request)?;

    if is_slot_taken(ctx.occupied, request.court, request.date, start, end) {
        return Err(RuleViolation::SlotTaken);
    }

    let nocturnal = ctx.schedule.grid().is_nocturnal(start, end);
    let status = if nocturnal {
        if matches!(request.date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Err(RuleViolation::NocturnalOnWeekend);
        }
        if ctx.schedule.require_night_payment {
            if !request.has_payment_proof {
                return Err(RuleViolation::PaymentProofRequired);
            }
            ReservationStatus::Pending
        } else {
            ReservationStatus::Confirmed
        }
    } else {
        ReservationStatus::Confirmed
    };

    Ok(BookingDecision {
        start,
        end,
        nocturnal,
        status,
    })
}

fn check_booking_window(ctx: &BookingContext<'_>) -> Result<(), RuleViolation> {
    if ctx.is_admin {
        return Ok(());
    }
    let hour = ctx.now.hour();
    if !(BOOKING_WINDOW_OPENS_HOUR..BOOKING_WINDOW_CLOSES_HOUR).contains(&hour) {
        return Err(RuleViolation::OutsideBookingWindow {
            opens: BOOKING_WINDOW_OPENS_HOUR,
            closes: BOOKING_WINDOW_CLOSES_HOUR,
        });
    }
    Ok(())
}

fn check_advance_limit(
    ctx: &BookingContext<'_>,
    request: &BookingRequest,
) -> Result<(), RuleViolation> {
    let now = ctx.now.naive_local();
    if request.date < now.date() {
        return Err(RuleViolation::DateInPast);
    }
    let day_start = request.date.and_time(NaiveTime::MIN);
    if day_start > now + Duration::hours(ADVANCE_LIMIT_HOURS) {
        return Err(RuleViolation::TooFarAhead {
            hours: ADVANCE_LIMIT_HOURS,
        });
    }
    Ok(())
}

fn check_consecutive_days(
    ctx: &BookingContext<'_>,
    request: &BookingRequest,
) -> Result<(), RuleViolation> {
    let neighbours = [request.date.pred_opt(), request.date.succ_opt()];
    let clash = ctx
        .own_reservations
        .iter()
        .filter(|r| r.status.is_active())
        .find(|r| neighbours.contains(&Some(r.date)));

    match clash {
        Some(reservation) => Err(RuleViolation::ConsecutiveDay {
            date: reservation.date,
        }),
        None => Ok(()),
    }
}

fn check_daily_quota(
    ctx: &BookingContext<'_>,
    request: &BookingRequest,
) -> Result<(), RuleViolation> {
    let booked = ctx
        .own_reservations
        .iter()
        .filter(|r| r.status.is_active() && r.date == request.date)
        .count();
    let limit = ctx.schedule.max_reservations_per_day;
    if booked >= usize::from(limit) {
        return Err(RuleViolation::DailyLimitReached { limit });
    }
    Ok(())
}

fn check_household(
    ctx: &BookingContext<'_>,
    request: &BookingRequest,
) -> Result<(), RuleViolation> {
    let taken = ctx
        .household_reservations
        .iter()
        .any(|r| r.status.is_active() && r.date == request.date);
    if taken {
        return Err(RuleViolation::HouseholdAlreadyBooked);
    }
    Ok(())
}

fn resolve_range(
    schedule: &ScheduleSettings,
    request: &BookingRequest,
) -> Result<(TimeOfDay, TimeOfDay), RuleViolation> {
    let grid = schedule.grid();
    let slot = grid
        .slot_starting_at(request.start)
        .ok_or(RuleViolation::NotOnGrid {
            start: request.start,
        })?;

    let end = request.end.unwrap_or(slot.end);
    if end == slot.end {
        return Ok((slot.start, slot.end));
    }

    let minutes = slot.start.minutes_until(end);
    let two_hours = request.court.allows_two_hour_booking()
        && minutes == TWO_HOUR_BOOKING_MINUTES
        && grid.covers_whole_slots(slot.start, end);
    if !two_hours {
        return Err(RuleViolation::InvalidDuration {
            court: request.court,
            minutes,
        });
    }
    Ok((slot.start, end))
}

/// Interval for a booking placed by an administrator. Any start time is
/// accepted; the duration defaults to one slot.
pub fn admin_booking_range(
    schedule: &ScheduleSettings,
    court: Court,
    start: TimeOfDay,
    duration_minutes: Option<u16>,
) -> Result<(TimeOfDay, TimeOfDay), RuleViolation> {
    let minutes = duration_minutes.unwrap_or(schedule.slot_duration_minutes);
    let end = start.saturating_add(minutes);
    if minutes == 0 || start.minutes_until(end) != minutes {
        return Err(RuleViolation::InvalidDuration { court, minutes });
    }
    Ok((start, end))
}

/// Daily cap on instructor hours per court, summed over all instructors.
pub fn check_instructor_limit(
    court: Court,
    booked_minutes: u32,
    requested_minutes: u16,
) -> Result<(), RuleViolation> {
    let limit_hours = court.instructor_daily_limit_hours();
    if booked_minutes + u32::from(requested_minutes) > u32::from(limit_hours) * 60 {
        return Err(RuleViolation::InstructorLimitExceeded { court, limit_hours });
    }
    Ok(())
}
