use chrono::{NaiveDate, TimeZone, Timelike, Utc};
use courtside_core::clock::MockClock;
use pretty_assertions::assert_eq;

use crate::test_utils::build_state;

#[tokio::test]
async fn test_today_follows_facility_timezone() {
    // 03:30 UTC is still the previous evening in Guayaquil (UTC-5).
    let instant = Utc.with_ymd_and_hms(2026, 10, 16, 3, 30, 0).unwrap();
    let mut clock = MockClock::new();
    clock.expect_now().times(2).return_const(instant);

    let state = build_state(clock);

    assert_eq!(state.today(), NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
    assert_eq!(state.now().hour(), 22);
}
