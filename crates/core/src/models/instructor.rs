use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::courts::Court;
use crate::errors::{CourtError, CourtResult};
use crate::slots::{slot_label, Occupancy, TimeOfDay};
use crate::validation::require;

/// Court time reserved for a coach giving lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorBooking {
    pub id: Uuid,
    pub instructor_name: String,
    pub court: Court,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl InstructorBooking {
    pub fn duration_minutes(&self) -> u16 {
        self.start.minutes_until(self.end)
    }

    pub fn slot_label(&self) -> String {
        slot_label(self.start, self.end)
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            court: self.court,
            date: self.date,
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInstructorBooking {
    pub instructor_name: String,
    pub court: Court,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInstructorBookingRequest {
    pub instructor_name: String,
    pub court: Court,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub duration_minutes: u16,
}

impl CreateInstructorBookingRequest {
    pub fn validate(&self, created_by: Uuid) -> CourtResult<NewInstructorBooking> {
        let instructor_name = require("instructor_name", &self.instructor_name)?;
        if self.duration_minutes == 0 {
            return Err(CourtError::Validation(
                "Duration must be greater than zero".to_string(),
            ));
        }
        let end = self.start.saturating_add(self.duration_minutes);
        if self.start.minutes_until(end) != self.duration_minutes {
            return Err(CourtError::Validation(
                "Instructor booking cannot run past midnight".to_string(),
            ));
        }

        Ok(NewInstructorBooking {
            instructor_name: instructor_name.to_string(),
            court: self.court,
            date: self.date,
            start: self.start,
            end,
            created_by,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructorBookingQuery {
    pub date: Option<NaiveDate>,
}
