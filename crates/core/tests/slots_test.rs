use chrono::NaiveDate;
use courtside_core::courts::Court;
use courtside_core::slots::{
    availability, find_conflict, generate_slots, is_slot_taken, slots_in_range, Occupancy,
    SlotGrid, TimeOfDay,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_test::{assert_de_tokens_error, assert_tokens, Token};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

fn default_grid() -> SlotGrid {
    SlotGrid {
        open: t("06:00"),
        close: t("22:00"),
        duration_minutes: 60,
        night_start: t("19:00"),
    }
}

#[rstest]
#[case("06:00", 360)]
#[case("6:30", 390)]
#[case("00:00", 0)]
#[case("23:59", 1439)]
#[case("24:00", 1440)]
fn test_parse_time_of_day(#[case] input: &str, #[case] minutes: u16) {
    assert_eq!(t(input).minutes(), minutes);
}

#[rstest]
#[case("")]
#[case("6")]
#[case("06:60")]
#[case("24:01")]
#[case("25:00")]
#[case("ab:cd")]
#[case("06:5")]
#[case("106:00")]
fn test_reject_invalid_time_of_day(#[case] input: &str) {
    assert!(input.parse::<TimeOfDay>().is_err());
}

#[test]
fn test_time_of_day_serde() {
    assert_tokens(&t("07:05"), &[Token::Str("07:05")]);
    assert_de_tokens_error::<TimeOfDay>(
        &[Token::Str("7h")],
        "Validation error: Invalid time '7h', expected HH:MM",
    );
}

#[test]
fn test_default_grid() {
    let slots = default_grid().slots();

    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0].id(), "06:00-07:00");
    assert_eq!(slots[0].label(), "06:00 - 07:00");
    assert_eq!(slots[15].id(), "21:00-22:00");
    assert!(!slots[12].nocturnal);
    assert_eq!(slots[12].start, t("18:00"));
    assert!(slots[13].nocturnal);
    assert_eq!(slots[13].start, t("19:00"));
}

#[test]
fn test_last_slot_may_run_past_closing() {
    let slots = generate_slots(t("06:00"), t("22:00"), 90, t("19:00"));

    let last = slots.last().unwrap();
    assert_eq!(last.id(), "21:00-22:30");
    assert_eq!(slots.len(), 11);
}

#[test]
fn test_slot_end_is_capped_at_midnight() {
    let slots = generate_slots(t("22:00"), t("24:00"), 90, t("19:00"));

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].id(), "23:30-24:00");
}

#[rstest]
#[case(0, "06:00", "22:00")]
#[case(60, "22:00", "06:00")]
#[case(60, "10:00", "10:00")]
fn test_empty_grid(#[case] duration: u16, #[case] open: &str, #[case] close: &str) {
    assert!(generate_slots(t(open), t(close), duration, t("19:00")).is_empty());
}

#[test]
fn test_slots_in_range() {
    let slots = default_grid().slots();

    let range = slots_in_range(&slots, t("08:30"), t("10:00"));
    let ids: Vec<String> = range.iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["08:00-09:00", "09:00-10:00"]);
}

#[test]
fn test_two_hour_range_covers_whole_slots() {
    let grid = default_grid();

    assert!(grid.covers_whole_slots(t("08:00"), t("10:00")));
    assert!(!grid.covers_whole_slots(t("08:00"), t("09:30")));
    assert!(!grid.covers_whole_slots(t("10:00"), t("08:00")));
    assert!(grid.is_nocturnal(t("18:00"), t("20:00")));
    assert!(!grid.is_nocturnal(t("17:00"), t("19:00")));
}

#[test]
fn test_conflict_on_same_court() {
    let existing = vec![Occupancy {
        court: Court::Tenis1,
        date: date(14),
        start: t("08:00"),
        end: t("09:00"),
    }];

    assert!(is_slot_taken(&existing, Court::Tenis1, date(14), t("08:00"), t("09:00")));
    assert!(is_slot_taken(&existing, Court::Tenis1, date(14), t("07:30"), t("08:30")));
    assert!(!is_slot_taken(&existing, Court::Tenis1, date(14), t("09:00"), t("10:00")));
    assert!(!is_slot_taken(&existing, Court::Tenis2, date(14), t("08:00"), t("09:00")));
    assert!(!is_slot_taken(&existing, Court::Tenis1, date(15), t("08:00"), t("09:00")));
}

#[rstest]
#[case(Court::Basquet, Court::Voley, true)]
#[case(Court::Voley, Court::Picketball, true)]
#[case(Court::Picketball, Court::Basquet, true)]
#[case(Court::Basquet, Court::Futbol, false)]
#[case(Court::Tenis1, Court::Tenis2, false)]
fn test_shared_court_pool(#[case] held: Court, #[case] requested: Court, #[case] taken: bool) {
    let existing = vec![Occupancy {
        court: held,
        date: date(14),
        start: t("10:00"),
        end: t("11:00"),
    }];

    assert_eq!(
        is_slot_taken(&existing, requested, date(14), t("10:00"), t("11:00")),
        taken
    );
}

#[test]
fn test_find_conflict_returns_first_clash() {
    let existing = vec![
        Occupancy { court: Court::Futbol, date: date(14), start: t("06:00"), end: t("08:00") },
        Occupancy { court: Court::Futbol, date: date(14), start: t("08:00"), end: t("09:00") },
    ];

    let clash = find_conflict(&existing, Court::Futbol, date(14), t("07:00"), t("09:00"));
    assert_eq!(clash, Some(&existing[0]));
}

#[test]
fn test_availability_marks_taken_and_prices_night_slots() {
    let existing = vec![Occupancy {
        court: Court::Voley,
        date: date(14),
        start: t("19:00"),
        end: t("20:00"),
    }];

    let grid = availability(&default_grid(), &existing, Court::Basquet, date(14), 1500);

    assert_eq!(grid.len(), 16);
    let taken = grid.iter().find(|s| s.id == "19:00-20:00").unwrap();
    assert!(!taken.available);
    assert_eq!(taken.night_price_cents, Some(1500));
    let morning = grid.iter().find(|s| s.id == "06:00-07:00").unwrap();
    assert!(morning.available);
    assert_eq!(morning.night_price_cents, None);
}
