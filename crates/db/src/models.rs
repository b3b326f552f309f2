use chrono::{DateTime, NaiveDate, Utc};
use courtside_core::courts::Court;
use courtside_core::models::{
    audit::SystemChange,
    instructor::InstructorBooking,
    notification::Notification,
    reservation::{Cancellation, Reservation, ReservationDetail},
    user::{Household, User},
};
use courtside_core::slots::TimeOfDay;
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

fn time_of_day(minutes: i32) -> Result<TimeOfDay> {
    u16::try_from(minutes)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .ok_or_else(|| eyre!("Stored minute value {} is out of range", minutes))
}

fn court(value: &str) -> Result<Court> {
    value.parse().map_err(|e| eyre!("{}", e))
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub manzana: String,
    pub villa: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbUser> for User {
    type Error = eyre::Report;

    fn try_from(row: DbUser) -> Result<Self> {
        Ok(User {
            id: row.id,
            role: row.role.parse().map_err(|e| eyre!("{}", e))?,
            status: row.status.parse().map_err(|e| eyre!("{}", e))?,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            household: Household::new(row.manzana, row.villa),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub court: String,
    pub reservation_date: NaiveDate,
    pub start_minute: i32,
    pub end_minute: i32,
    pub status: String,
    pub created_by_admin: bool,
    pub has_payment_proof: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbReservation> for Reservation {
    type Error = eyre::Report;

    fn try_from(row: DbReservation) -> Result<Self> {
        Ok(Reservation {
            id: row.id,
            user_id: row.user_id,
            court: court(&row.court)?,
            date: row.reservation_date,
            start: time_of_day(row.start_minute)?,
            end: time_of_day(row.end_minute)?,
            status: row.status.parse().map_err(|e| eyre!("{}", e))?,
            created_by_admin: row.created_by_admin,
            has_payment_proof: row.has_payment_proof,
            created_at: row.created_at,
        })
    }
}

/// Reservation joined with the columns of its owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservationDetail {
    #[sqlx(flatten)]
    pub reservation: DbReservation,
    pub user_name: String,
    pub user_email: String,
    pub manzana: String,
    pub villa: String,
}

impl TryFrom<DbReservationDetail> for ReservationDetail {
    type Error = eyre::Report;

    fn try_from(row: DbReservationDetail) -> Result<Self> {
        let reservation = Reservation::try_from(row.reservation)?;
        Ok(ReservationDetail {
            court_name: reservation.court.display_name().to_string(),
            slot_label: reservation.slot_label(),
            reservation,
            user_name: row.user_name,
            user_email: row.user_email,
            manzana: row.manzana,
            villa: row.villa,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbPaymentProof {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCancellation {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub court: String,
    pub reservation_date: NaiveDate,
    pub slot_label: String,
    pub justification: String,
    pub cancelled_at: DateTime<Utc>,
}

impl TryFrom<DbCancellation> for Cancellation {
    type Error = eyre::Report;

    fn try_from(row: DbCancellation) -> Result<Self> {
        Ok(Cancellation {
            id: row.id,
            reservation_id: row.reservation_id,
            user_id: row.user_id,
            user_name: row.user_name,
            court: court(&row.court)?,
            reservation_date: row.reservation_date,
            slot_label: row.slot_label,
            justification: row.justification,
            cancelled_at: row.cancelled_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInstructorBooking {
    pub id: Uuid,
    pub instructor_name: String,
    pub court: String,
    pub booking_date: NaiveDate,
    pub start_minute: i32,
    pub end_minute: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbInstructorBooking> for InstructorBooking {
    type Error = eyre::Report;

    fn try_from(row: DbInstructorBooking) -> Result<Self> {
        Ok(InstructorBooking {
            id: row.id,
            instructor_name: row.instructor_name,
            court: court(&row.court)?,
            date: row.booking_date,
            start: time_of_day(row.start_minute)?,
            end: time_of_day(row.end_minute)?,
            created_by: row.created_by,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbNotification> for Notification {
    type Error = eyre::Report;

    fn try_from(row: DbNotification) -> Result<Self> {
        Ok(Notification {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            kind: row.kind.parse().map_err(|e| eyre!("{}", e))?,
            read: row.is_read,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSystemChange {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbSystemChange> for SystemChange {
    fn from(row: DbSystemChange) -> Self {
        SystemChange {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            action: row.action,
            details: row.details,
            created_at: row.created_at,
        }
    }
}

/// Converts a batch of rows, failing on the first bad one.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = eyre::Report>,
{
    rows.into_iter().map(T::try_from).collect()
}
