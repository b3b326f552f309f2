use serde::{Deserialize, Serialize};

use crate::courts::Court;

/// Reservation counts for one day, week or month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub label: String,
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
    /// Neither confirmed nor pending.
    pub other: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtStats {
    pub court: Court,
    pub court_name: String,
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub daily: Vec<PeriodStats>,
    pub weekly: Vec<PeriodStats>,
    pub monthly: Vec<PeriodStats>,
    pub by_court: Vec<CourtStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_users: i64,
    pub pending_users: i64,
    pub reservations_today: usize,
    pub pending_reservations: usize,
    pub last_seven_days: Vec<PeriodStats>,
}
