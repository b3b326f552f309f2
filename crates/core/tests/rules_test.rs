use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use courtside_core::clock::{local_now, MockClock, DEFAULT_TIMEZONE};
use courtside_core::courts::Court;
use courtside_core::models::reservation::{Reservation, ReservationStatus};
use courtside_core::models::settings::ScheduleSettings;
use courtside_core::rules::{
    admin_booking_range, check_instructor_limit, evaluate, BookingContext, BookingDecision,
    BookingRequest, RuleViolation,
};
use courtside_core::slots::{Occupancy, TimeOfDay};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

/// Facility local time on the given October 2026 day.
fn now_at(day: u32, hour: u32, minute: u32) -> chrono::DateTime<Tz> {
    let instant = DEFAULT_TIMEZONE
        .with_ymd_and_hms(2026, 10, day, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc);
    let mut clock = MockClock::new();
    clock.expect_now().times(1).return_const(instant);
    local_now(&clock, DEFAULT_TIMEZONE)
}

fn reservation(court: Court, day: u32, start: &str, end: &str, status: ReservationStatus) -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        court,
        date: date(day),
        start: t(start),
        end: t(end),
        status,
        created_by_admin: false,
        has_payment_proof: false,
        created_at: Utc::now(),
    }
}

fn request(court: Court, day: u32, start: &str) -> BookingRequest {
    BookingRequest {
        court,
        date: date(day),
        start: t(start),
        end: None,
        has_payment_proof: false,
    }
}

struct Fixture {
    schedule: ScheduleSettings,
    own: Vec<Reservation>,
    household: Vec<Reservation>,
    occupied: Vec<Occupancy>,
    is_admin: bool,
}

impl Fixture {
    fn new() -> Self {
        Self {
            schedule: ScheduleSettings::default(),
            own: Vec::new(),
            household: Vec::new(),
            occupied: Vec::new(),
            is_admin: false,
        }
    }

    fn evaluate(
        &self,
        now: chrono::DateTime<Tz>,
        request: BookingRequest,
    ) -> Result<BookingDecision, RuleViolation> {
        let ctx = BookingContext {
            now,
            schedule: &self.schedule,
            is_admin: self.is_admin,
            own_reservations: &self.own,
            household_reservations: &self.household,
            occupied: &self.occupied,
        };
        evaluate(&ctx, &request)
    }
}

// 2026-10-14 is a Wednesday.
#[test]
fn test_daytime_booking_is_confirmed() {
    let decision = Fixture::new()
        .evaluate(now_at(14, 10, 0), request(Court::Tenis1, 14, "08:00"))
        .unwrap();

    assert_eq!(
        decision,
        BookingDecision {
            start: t("08:00"),
            end: t("09:00"),
            nocturnal: false,
            status: ReservationStatus::Confirmed,
        }
    );
}

#[rstest]
#[case(8, 59)]
#[case(17, 0)]
#[case(22, 30)]
fn test_members_book_only_during_office_hours(#[case] hour: u32, #[case] minute: u32) {
    let result = Fixture::new().evaluate(now_at(14, hour, minute), request(Court::Tenis1, 15, "08:00"));

    assert_eq!(
        result,
        Err(RuleViolation::OutsideBookingWindow { opens: 9, closes: 17 })
    );
}

#[test]
fn test_admins_ignore_booking_window() {
    let mut fixture = Fixture::new();
    fixture.is_admin = true;

    let result = fixture.evaluate(now_at(14, 7, 0), request(Court::Tenis1, 15, "08:00"));
    assert!(result.is_ok());
}

#[test]
fn test_reject_past_date() {
    let result = Fixture::new().evaluate(now_at(14, 10, 0), request(Court::Tenis1, 13, "08:00"));

    assert_eq!(result, Err(RuleViolation::DateInPast));
}

#[test]
fn test_advance_limit_is_48_hours() {
    let fixture = Fixture::new();

    // Midnight of the 16th is 38 hours away.
    assert!(fixture.evaluate(now_at(14, 10, 0), request(Court::Tenis1, 16, "08:00")).is_ok());
    assert_eq!(
        fixture.evaluate(now_at(14, 10, 0), request(Court::Tenis1, 17, "08:00")),
        Err(RuleViolation::TooFarAhead { hours: 48 })
    );
}

#[rstest]
#[case(13)]
#[case(15)]
fn test_reject_consecutive_days(#[case] neighbour: u32) {
    let mut fixture = Fixture::new();
    fixture.own.push(reservation(Court::Futbol, neighbour, "10:00", "11:00", ReservationStatus::Confirmed));

    let result = fixture.evaluate(now_at(14, 10, 0), request(Court::Tenis1, 14, "12:00"));
    assert_eq!(result, Err(RuleViolation::ConsecutiveDay { date: date(neighbour) }));
}

#[test]
fn test_cancelled_reservation_does_not_block_neighbour_day() {
    let mut fixture = Fixture::new();
    fixture.own.push(reservation(Court::Futbol, 15, "10:00", "11:00", ReservationStatus::Cancelled));
    fixture.own.push(reservation(Court::Futbol, 13, "10:00", "11:00", ReservationStatus::Rejected));

    assert!(fixture.evaluate(now_at(14, 10, 0), request(Court::Tenis1, 14, "12:00")).is_ok());
}

#[test]
fn test_daily_quota() {
    let mut fixture = Fixture::new();
    fixture.own.push(reservation(Court::Futbol, 14, "10:00", "11:00", ReservationStatus::Pending));

    assert_eq!(
        fixture.evaluate(now_at(14, 10, 0), request(Court::Tenis1, 14, "12:00")),
        Err(RuleViolation::DailyLimitReached { limit: 1 })
    );

    fixture.schedule.max_reservations_per_day = 2;
    assert!(fixture.evaluate(now_at(14, 10, 0), request(Court::Tenis1, 14, "12:00")).is_ok());
}

#[test]
fn test_one_reservation_per_household_per_day() {
    let mut fixture = Fixture::new();
    fixture.household.push(reservation(Court::Tenis2, 14, "15:00", "16:00", ReservationStatus::Confirmed));

    assert_eq!(
        fixture.evaluate(now_at(14, 10, 0), request(Court::Tenis1, 14, "12:00")),
        Err(RuleViolation::HouseholdAlreadyBooked)
    );
}

#[test]
fn test_football_allows_two_hours() {
    let mut booking = request(Court::Futbol, 14, "08:00");
    booking.end = Some(t("10:00"));

    let decision = Fixture::new().evaluate(now_at(14, 10, 0), booking).unwrap();
    assert_eq!((decision.start, decision.end), (t("08:00"), t("10:00")));
}

#[rstest]
#[case(Court::Tenis1, "10:00", 120)]
#[case(Court::Futbol, "11:00", 180)]
#[case(Court::Futbol, "09:30", 90)]
fn test_reject_invalid_duration(#[case] court: Court, #[case] end: &str, #[case] minutes: u16) {
    let mut booking = request(court, 14, "08:00");
    booking.end = Some(t(end));

    assert_eq!(
        Fixture::new().evaluate(now_at(14, 10, 0), booking),
        Err(RuleViolation::InvalidDuration { court, minutes })
    );
}

#[test]
fn test_start_must_be_on_grid() {
    assert_eq!(
        Fixture::new().evaluate(now_at(14, 10, 0), request(Court::Tenis1, 14, "08:30")),
        Err(RuleViolation::NotOnGrid { start: t("08:30") })
    );
}

#[test]
fn test_shared_surface_is_taken() {
    let mut fixture = Fixture::new();
    fixture.occupied.push(Occupancy {
        court: Court::Voley,
        date: date(14),
        start: t("08:00"),
        end: t("09:00"),
    });

    assert_eq!(
        fixture.evaluate(now_at(14, 10, 0), request(Court::Basquet, 14, "08:00")),
        Err(RuleViolation::SlotTaken)
    );
    assert!(fixture.evaluate(now_at(14, 10, 0), request(Court::Tenis1, 14, "08:00")).is_ok());
}

#[test]
fn test_second_hour_must_be_free() {
    let mut fixture = Fixture::new();
    fixture.occupied.push(Occupancy {
        court: Court::Futbol,
        date: date(14),
        start: t("09:00"),
        end: t("10:00"),
    });
    let mut booking = request(Court::Futbol, 14, "08:00");
    booking.end = Some(t("10:00"));

    assert_eq!(fixture.evaluate(now_at(14, 10, 0), booking), Err(RuleViolation::SlotTaken));
}

#[test]
fn test_night_booking_requires_payment_proof() {
    let fixture = Fixture::new();
    let mut booking = request(Court::Tenis1, 14, "19:00");

    assert_eq!(
        fixture.evaluate(now_at(14, 10, 0), booking),
        Err(RuleViolation::PaymentProofRequired)
    );

    booking.has_payment_proof = true;
    let decision = fixture.evaluate(now_at(14, 10, 0), booking).unwrap();
    assert!(decision.nocturnal);
    assert_eq!(decision.status, ReservationStatus::Pending);
}

#[test]
fn test_night_booking_without_payment_requirement_is_confirmed() {
    let mut fixture = Fixture::new();
    fixture.schedule.require_night_payment = false;

    let decision = fixture
        .evaluate(now_at(14, 10, 0), request(Court::Tenis1, 14, "20:00"))
        .unwrap();
    assert!(decision.nocturnal);
    assert_eq!(decision.status, ReservationStatus::Confirmed);
}

#[test]
fn test_two_hour_booking_into_the_night_is_nocturnal() {
    let mut booking = request(Court::Futbol, 14, "18:00");
    booking.end = Some(t("20:00"));

    assert_eq!(
        Fixture::new().evaluate(now_at(14, 10, 0), booking),
        Err(RuleViolation::PaymentProofRequired)
    );
}

// 2026-10-16 is a Friday, the 17th a Saturday.
#[test]
fn test_no_night_bookings_on_weekends() {
    let mut booking = request(Court::Tenis1, 17, "19:00");
    booking.has_payment_proof = true;

    assert_eq!(
        Fixture::new().evaluate(now_at(16, 10, 0), booking),
        Err(RuleViolation::NocturnalOnWeekend)
    );
    assert!(Fixture::new().evaluate(now_at(16, 10, 0), request(Court::Tenis1, 17, "10:00")).is_ok());
}

#[test]
fn test_admin_booking_range() {
    let schedule = ScheduleSettings::default();

    assert_eq!(
        admin_booking_range(&schedule, Court::Tenis1, t("07:10"), Some(90)),
        Ok((t("07:10"), t("08:40")))
    );
    assert_eq!(
        admin_booking_range(&schedule, Court::Tenis1, t("05:00"), None),
        Ok((t("05:00"), t("06:00")))
    );
    assert_eq!(
        admin_booking_range(&schedule, Court::Tenis1, t("23:30"), Some(60)),
        Err(RuleViolation::InvalidDuration { court: Court::Tenis1, minutes: 60 })
    );
    assert!(admin_booking_range(&schedule, Court::Tenis1, t("10:00"), Some(0)).is_err());
}

#[rstest]
#[case(Court::Futbol, 120, 60, true)]
#[case(Court::Futbol, 120, 120, false)]
#[case(Court::Tenis1, 60, 60, true)]
#[case(Court::Voley, 60, 90, false)]
#[case(Court::Basquet, 0, 150, false)]
fn test_instructor_daily_limit(
    #[case] court: Court,
    #[case] booked: u32,
    #[case] requested: u16,
    #[case] allowed: bool,
) {
    assert_eq!(check_instructor_limit(court, booked, requested).is_ok(), allowed);
}
