#![forbid(unsafe_code)]
use cabinet::scheduler::{chamber_slots, doctor_slots};
use cabinet::{
    AvailabilityWindow, BreakPeriod, Chamber, DayOfWeek, Doctor, HospitalId, WorkingHours,
};
use chrono::NaiveDate;

// 2025-10-06 est un lundi
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()
}

fn morning_chamber() -> Chamber {
    let mut chamber = Chamber::new(HospitalId::new("h1"), "Cardio", "204", 75);
    chamber.availability.push(
        AvailabilityWindow::new(
            DayOfWeek::Monday,
            "09:00".parse().unwrap(),
            "12:00".parse().unwrap(),
        )
        .with_break(BreakPeriod::new("10:00".parse().unwrap(), "10:30".parse().unwrap()).unwrap()),
    );
    chamber
}

#[test]
fn morning_with_break_snapshot() {
    let slots = chamber_slots(&morning_chamber(), monday());
    let times: Vec<String> = slots.iter().map(|s| s.time.to_string()).collect();
    insta::assert_snapshot!(times.join(","), @"09:00,09:30,10:30,11:00,11:30");
}

#[test]
fn generation_is_idempotent() {
    let chamber = morning_chamber();
    assert_eq!(chamber_slots(&chamber, monday()), chamber_slots(&chamber, monday()));
}

#[test]
fn slots_serialize_with_hh_mm_time() {
    let slots = chamber_slots(&morning_chamber(), monday());
    let json = serde_json::to_value(&slots[0]).unwrap();
    assert_eq!(json["time"], "09:00");
    assert_eq!(json["duration"], 30);
    assert_eq!(json["fee"], 75);
    assert_eq!(json["hospital"], "h1");
}

#[test]
fn legacy_doctor_matches_equivalent_chamber() {
    let mut legacy = Doctor::new("Dr Flat", vec![]);
    legacy.fee = 75;
    legacy.working_hours = Some(WorkingHours {
        hospital: HospitalId::new("h1"),
        days: vec![DayOfWeek::Monday],
        start_time: "09:00".parse().unwrap(),
        end_time: "12:00".parse().unwrap(),
        slot_duration: 30,
        break_time: Some(BreakPeriod::new("10:00".parse().unwrap(), "10:30".parse().unwrap()).unwrap()),
    });

    let from_legacy: Vec<(String, u32)> = doctor_slots(&legacy, monday())
        .into_iter()
        .map(|s| (s.time.to_string(), s.fee))
        .collect();
    let from_chamber: Vec<(String, u32)> = chamber_slots(&morning_chamber(), monday())
        .into_iter()
        .map(|s| (s.time.to_string(), s.fee))
        .collect();
    assert_eq!(from_legacy, from_chamber);
}

#[test]
fn stored_oversized_duration_does_not_overflow() {
    let mut legacy = Doctor::new("Dr Flat", vec![]);
    legacy.working_hours = Some(WorkingHours {
        hospital: HospitalId::new("h1"),
        days: vec![DayOfWeek::Monday],
        start_time: "09:00".parse().unwrap(),
        end_time: "10:00".parse().unwrap(),
        slot_duration: 65000,
        break_time: None,
    });
    assert!(doctor_slots(&legacy, monday()).is_empty());

    let mut chamber = morning_chamber();
    chamber.availability[0].slot_duration = u16::MAX;
    assert!(chamber_slots(&chamber, monday()).is_empty());
}
