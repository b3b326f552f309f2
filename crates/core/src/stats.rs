//! Reservation statistics for the administration dashboard.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::courts::Court;
use crate::models::reservation::{Reservation, ReservationStatus};
use crate::models::stats::{CourtStats, Dashboard, PeriodStats, StatsReport};

pub const DAILY_WINDOW_DAYS: u32 = 14;
pub const WEEKLY_WINDOW_WEEKS: u32 = 8;
pub const MONTHLY_WINDOW_MONTHS: u32 = 6;

fn tally<'a>(label: String, reservations: impl Iterator<Item = &'a Reservation>) -> PeriodStats {
    let mut stats = PeriodStats {
        label,
        total: 0,
        confirmed: 0,
        pending: 0,
        other: 0,
    };
    for reservation in reservations {
        stats.total += 1;
        match reservation.status {
            ReservationStatus::Confirmed => stats.confirmed += 1,
            ReservationStatus::Pending => stats.pending += 1,
            _ => stats.other += 1,
        }
    }
    stats
}

fn in_range(reservations: &[Reservation], from: NaiveDate, until: NaiveDate) -> impl Iterator<Item = &Reservation> {
    reservations
        .iter()
        .filter(move |r| r.date >= from && r.date < until)
}

/// One row per day, oldest first, ending with `today`.
pub fn daily_stats(reservations: &[Reservation], today: NaiveDate, days: u32) -> Vec<PeriodStats> {
    (0..i64::from(days))
        .rev()
        .map(|offset| today - Duration::days(offset))
        .map(|day| {
            tally(
                day.format("%d/%m").to_string(),
                in_range(reservations, day, day + Duration::days(1)),
            )
        })
        .collect()
}

/// One row per Sunday-to-Saturday week, oldest first, ending with the
/// current week.
pub fn weekly_stats(reservations: &[Reservation], today: NaiveDate, weeks: u32) -> Vec<PeriodStats> {
    let current_week = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    (0..i64::from(weeks))
        .rev()
        .map(|offset| current_week - Duration::weeks(offset))
        .map(|start| {
            let end = start + Duration::days(6);
            tally(
                format!("{} - {}", start.format("%d/%m"), end.format("%d/%m")),
                in_range(reservations, start, start + Duration::weeks(1)),
            )
        })
        .collect()
}

/// One row per calendar month, oldest first, ending with the current month.
pub fn monthly_stats(reservations: &[Reservation], today: NaiveDate, months: u32) -> Vec<PeriodStats> {
    let Some(current_month) = today.with_day(1) else {
        return Vec::new();
    };
    (0..months)
        .rev()
        .filter_map(|offset| current_month.checked_sub_months(Months::new(offset)))
        .filter_map(|start| {
            let end = start.checked_add_months(Months::new(1))?;
            Some(tally(
                start.format("%Y-%m").to_string(),
                in_range(reservations, start, end),
            ))
        })
        .collect()
}

/// Totals per court, busiest first. Courts without reservations are omitted.
pub fn court_stats(reservations: &[Reservation]) -> Vec<CourtStats> {
    let mut rows: Vec<CourtStats> = Court::ALL
        .into_iter()
        .map(|court| {
            let stats = tally(String::new(), reservations.iter().filter(|r| r.court == court));
            CourtStats {
                court,
                court_name: court.display_name().to_string(),
                total: stats.total,
                confirmed: stats.confirmed,
                pending: stats.pending,
            }
        })
        .filter(|row| row.total > 0)
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

pub fn report(reservations: &[Reservation], today: NaiveDate) -> StatsReport {
    StatsReport {
        daily: daily_stats(reservations, today, DAILY_WINDOW_DAYS),
        weekly: weekly_stats(reservations, today, WEEKLY_WINDOW_WEEKS),
        monthly: monthly_stats(reservations, today, MONTHLY_WINDOW_MONTHS),
        by_court: court_stats(reservations),
    }
}

pub fn dashboard(
    total_users: i64,
    pending_users: i64,
    reservations: &[Reservation],
    today: NaiveDate,
) -> Dashboard {
    Dashboard {
        total_users,
        pending_users,
        reservations_today: reservations
            .iter()
            .filter(|r| r.date == today && r.status.is_active())
            .count(),
        pending_reservations: reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Pending)
            .count(),
        last_seven_days: daily_stats(reservations, today, 7),
    }
}
