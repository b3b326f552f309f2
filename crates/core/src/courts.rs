//! Court catalogue.
//!
//! The facility has a fixed set of courts. Basketball, volleyball and
//! pickleball are painted on the same multi-use surface, so a booking on any
//! of them blocks the other two for the same interval.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CourtError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Court {
    Tenis1,
    Tenis2,
    Futbol,
    Basquet,
    Voley,
    Picketball,
}

/// Physical playing surface. Courts on the same surface conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Tennis1,
    Tennis2,
    Football,
    Multiuse,
}

/// Category used to look up the night surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceCategory {
    Tennis,
    Football,
    Basketball,
    Volleyball,
}

impl Court {
    pub const ALL: [Court; 6] = [
        Court::Tenis1,
        Court::Tenis2,
        Court::Futbol,
        Court::Basquet,
        Court::Voley,
        Court::Picketball,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Court::Tenis1 => "tenis1",
            Court::Tenis2 => "tenis2",
            Court::Futbol => "futbol",
            Court::Basquet => "basquet",
            Court::Voley => "voley",
            Court::Picketball => "picketball",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Court::Tenis1 => "Tenis 1",
            Court::Tenis2 => "Tenis 2",
            Court::Futbol => "Fútbol",
            Court::Basquet => "Básquet",
            Court::Voley => "Vóley",
            Court::Picketball => "Picketball",
        }
    }

    pub fn surface(&self) -> Surface {
        match self {
            Court::Tenis1 => Surface::Tennis1,
            Court::Tenis2 => Surface::Tennis2,
            Court::Futbol => Surface::Football,
            Court::Basquet | Court::Voley | Court::Picketball => Surface::Multiuse,
        }
    }

    pub fn shares_surface(&self, other: Court) -> bool {
        self.surface() == other.surface()
    }

    pub fn price_category(&self) -> PriceCategory {
        match self {
            Court::Tenis1 | Court::Tenis2 => PriceCategory::Tennis,
            Court::Futbol => PriceCategory::Football,
            Court::Basquet => PriceCategory::Basketball,
            Court::Voley | Court::Picketball => PriceCategory::Volleyball,
        }
    }

    /// Whether members may take two consecutive hours in one booking.
    pub fn allows_two_hour_booking(&self) -> bool {
        matches!(self, Court::Futbol)
    }

    /// Maximum hours an instructor may hold on this court per day.
    pub fn instructor_daily_limit_hours(&self) -> u16 {
        match self {
            Court::Futbol => 3,
            _ => 2,
        }
    }

    pub fn info(&self) -> CourtInfo {
        CourtInfo {
            id: *self,
            name: self.display_name().to_string(),
            price_category: self.price_category(),
            allows_two_hour_booking: self.allows_two_hour_booking(),
            instructor_daily_limit_hours: self.instructor_daily_limit_hours(),
        }
    }
}

impl fmt::Display for Court {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Court {
    type Err = CourtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Court::ALL
            .into_iter()
            .find(|court| court.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CourtError::Validation(format!("Unknown court '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtInfo {
    pub id: Court,
    pub name: String,
    pub price_category: PriceCategory,
    pub allows_two_hour_booking: bool,
    pub instructor_daily_limit_hours: u16,
}
