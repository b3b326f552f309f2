//! Time source used by the booking rules.
//!
//! Every rule that depends on "now" (the booking window, the 48 hour advance
//! limit, statistics windows) reads the current instant through [`Clock`] so
//! tests can pin it with `MockClock`.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use mockall::automock;

/// Facility timezone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Guayaquil;

#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by `Utc::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Current instant expressed in the facility's local time.
pub fn local_now(clock: &dyn Clock, tz: Tz) -> DateTime<Tz> {
    clock.now().with_timezone(&tz)
}

/// Current calendar date at the facility.
pub fn local_today(clock: &dyn Clock, tz: Tz) -> NaiveDate {
    local_now(clock, tz).date_naive()
}
