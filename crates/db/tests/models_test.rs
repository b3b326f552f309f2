use chrono::{NaiveDate, Utc};
use courtside_core::courts::Court;
use courtside_core::models::instructor::InstructorBooking;
use courtside_core::models::notification::{Notification, NotificationKind};
use courtside_core::models::reservation::{Reservation, ReservationDetail, ReservationStatus};
use courtside_core::models::user::{Role, User, UserStatus};
use courtside_db::models::{
    convert_all, DbInstructorBooking, DbNotification, DbReservation, DbReservationDetail, DbUser,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

fn db_reservation(court: &str, start_minute: i32, end_minute: i32, status: &str) -> DbReservation {
    DbReservation {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        court: court.to_string(),
        reservation_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        start_minute,
        end_minute,
        status: status.to_string(),
        created_by_admin: false,
        has_payment_proof: true,
        created_at: Utc::now(),
    }
}

#[test]
fn test_user_row_converts() {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    let row = DbUser {
        id: Uuid::new_v4(),
        name: name.clone(),
        email: email.clone(),
        password_hash: "hash".to_string(),
        role: "admin".to_string(),
        status: "blocked".to_string(),
        manzana: "12".to_string(),
        villa: "4".to_string(),
        created_at: Utc::now(),
    };

    let user = User::try_from(row).unwrap();
    assert_eq!(user.name, name);
    assert_eq!(user.email, email);
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.status, UserStatus::Blocked);
    assert_eq!(user.household.manzana, "12");
}

#[test]
fn test_unknown_role_is_rejected() {
    let row = DbUser {
        id: Uuid::new_v4(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        password_hash: String::new(),
        role: "superuser".to_string(),
        status: "approved".to_string(),
        manzana: "1".to_string(),
        villa: "1".to_string(),
        created_at: Utc::now(),
    };

    assert!(User::try_from(row).is_err());
}

#[test]
fn test_reservation_row_converts() {
    let reservation = Reservation::try_from(db_reservation("futbol", 1080, 1200, "pending")).unwrap();

    assert_eq!(reservation.court, Court::Futbol);
    assert_eq!(reservation.start.to_string(), "18:00");
    assert_eq!(reservation.end.to_string(), "20:00");
    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert!(reservation.has_payment_proof);
}

#[rstest]
#[case("hockey", 600, 660, "confirmed")]
#[case("tenis1", -5, 60, "confirmed")]
#[case("tenis1", 600, 1500, "confirmed")]
#[case("tenis1", 600, 660, "archived")]
fn test_corrupt_reservation_rows_are_rejected(
    #[case] court: &str,
    #[case] start: i32,
    #[case] end: i32,
    #[case] status: &str,
) {
    assert!(Reservation::try_from(db_reservation(court, start, end, status)).is_err());
}

#[test]
fn test_detail_row_fills_display_fields() {
    let row = DbReservationDetail {
        reservation: db_reservation("tenis2", 480, 540, "confirmed"),
        user_name: "Luis".to_string(),
        user_email: "luis@example.com".to_string(),
        manzana: "3".to_string(),
        villa: "7".to_string(),
    };

    let detail = ReservationDetail::try_from(row).unwrap();
    assert_eq!(detail.court_name, "Tenis 2");
    assert_eq!(detail.slot_label, "08:00 - 09:00");
}

#[test]
fn test_instructor_and_notification_rows_convert() {
    let booking = InstructorBooking::try_from(DbInstructorBooking {
        id: Uuid::new_v4(),
        instructor_name: "Coach".to_string(),
        court: "basquet".to_string(),
        booking_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        start_minute: 420,
        end_minute: 510,
        created_by: Uuid::new_v4(),
        created_at: Utc::now(),
    })
    .unwrap();
    assert_eq!(booking.duration_minutes(), 90);

    let notification = Notification::try_from(DbNotification {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        title: "Reserva".to_string(),
        message: "Confirmada".to_string(),
        kind: "success".to_string(),
        is_read: true,
        created_at: Utc::now(),
    })
    .unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert!(notification.read);
}

#[test]
fn test_convert_all_fails_on_first_bad_row() {
    let rows = vec![
        db_reservation("tenis1", 480, 540, "confirmed"),
        db_reservation("tenis1", 480, 540, "unknown"),
    ];

    assert!(convert_all::<_, Reservation>(rows).is_err());

    let rows = vec![db_reservation("voley", 480, 540, "rejected")];
    let converted: Vec<Reservation> = convert_all(rows).unwrap();
    assert_eq!(converted.len(), 1);
}
