use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::courts::Court;
use crate::errors::{CourtError, CourtResult};
use crate::slots::{slot_id, slot_label, Occupancy, TimeOfDay};
use crate::validation::require;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pendiente",
            ReservationStatus::Confirmed => "Confirmada",
            ReservationStatus::Rejected => "Rechazada",
            ReservationStatus::Cancelled => "Anulada",
        }
    }

    /// Active reservations hold their court time.
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

impl FromStr for ReservationStatus {
    type Err = CourtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "rejected" => Ok(ReservationStatus::Rejected),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(CourtError::Validation(format!(
                "Unknown reservation status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub court: Court,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub status: ReservationStatus,
    pub created_by_admin: bool,
    pub has_payment_proof: bool,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn slot_id(&self) -> String {
        slot_id(self.start, self.end)
    }

    pub fn slot_label(&self) -> String {
        slot_label(self.start, self.end)
    }

    pub fn duration_minutes(&self) -> u16 {
        self.start.minutes_until(self.end)
    }

    /// Court time held by this reservation, `None` once it no longer counts.
    pub fn occupancy(&self) -> Option<Occupancy> {
        self.status.is_active().then_some(Occupancy {
            court: self.court,
            date: self.date,
            start: self.start,
            end: self.end,
        })
    }
}

/// Validated data for a reservation about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub user_id: Uuid,
    pub court: Court,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub status: ReservationStatus,
    pub created_by_admin: bool,
    pub payment_proof: Option<PaymentProof>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentProof {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Content types accepted as proof of payment, with the file extensions
/// that imply them when a client sends a generic type.
const PROOF_CONTENT_TYPES: [(&str, &[&str]); 5] = [
    ("application/pdf", &["pdf"]),
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/png", &["png"]),
    ("image/webp", &["webp"]),
    ("image/gif", &["gif"]),
];

impl PaymentProof {
    /// Canonical content type for an uploaded proof, or `None` when the file
    /// is neither a supported image nor a PDF document.
    pub fn accepted_content_type(content_type: &str, file_name: &str) -> Option<&'static str> {
        let content_type = content_type.trim().to_lowercase();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.trim().to_lowercase())
            .unwrap_or_default();

        PROOF_CONTENT_TYPES
            .iter()
            .find(|(mime, _)| *mime == content_type)
            .or_else(|| {
                PROOF_CONTENT_TYPES
                    .iter()
                    .find(|(_, extensions)| extensions.contains(&extension.as_str()))
            })
            .map(|(mime, _)| *mime)
    }
}

/// Proof of payment as sent by a client, with the file base64 encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProofUpload {
    pub file_name: String,
    pub content_type: String,
    pub data_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub court: Court,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    /// Omitted for a single grid slot.
    pub end: Option<TimeOfDay>,
    pub payment_proof: Option<PaymentProofUpload>,
}

/// Booking placed by an administrator for a member, outside the member rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminReservationRequest {
    pub user_id: Uuid,
    pub court: Court,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    /// Defaults to the configured slot duration.
    pub duration_minutes: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelReservationRequest {
    pub justification: String,
}

impl CancelReservationRequest {
    pub fn validate(&self) -> CourtResult<String> {
        Ok(require("justification", &self.justification)?.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}

impl UpdateReservationStatusRequest {
    pub fn validate(&self) -> CourtResult<ReservationStatus> {
        match self.status {
            ReservationStatus::Cancelled => Err(CourtError::Validation(
                "Reservations are cancelled by their owner with a justification".to_string(),
            )),
            status => Ok(status),
        }
    }
}

/// Reservation joined with its owner, as listed to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetail {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub user_name: String,
    pub user_email: String,
    pub manzana: String,
    pub villa: String,
    pub court_name: String,
    pub slot_label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
    pub court: Option<Court>,
    pub status: Option<ReservationStatus>,
}

impl ReservationFilter {
    pub fn matches(&self, detail: &ReservationDetail) -> bool {
        if let Some(date) = self.date {
            if detail.reservation.date != date {
                return false;
            }
        }
        if let Some(court) = self.court {
            if detail.reservation.court != court {
                return false;
            }
        }
        if let Some(status) = self.status {
            if detail.reservation.status != status {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let term = term.to_lowercase();
                [
                    detail.user_name.as_str(),
                    detail.user_email.as_str(),
                    detail.court_name.as_str(),
                    detail.manzana.as_str(),
                    detail.villa.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            }
            None => true,
        }
    }

    /// Keeps matching rows, newest reservation date first.
    pub fn apply(&self, details: Vec<ReservationDetail>) -> Vec<ReservationDetail> {
        let mut rows: Vec<_> = details.into_iter().filter(|d| self.matches(d)).collect();
        rows.sort_by(|a, b| {
            b.reservation
                .date
                .cmp(&a.reservation.date)
                .then(b.reservation.start.cmp(&a.reservation.start))
        });
        rows
    }
}

/// Record kept when a member cancels a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub court: Court,
    pub reservation_date: NaiveDate,
    pub slot_label: String,
    pub justification: String,
    pub cancelled_at: DateTime<Utc>,
}
