use super::{slots, Slot};
use crate::interval::DayOfWeek;
use crate::model::{Chamber, Doctor};
use chrono::NaiveDate;

/// Créneaux d'un cabinet pour un jour de la semaine.
/// Cabinet inactif ou sans fenêtre ce jour-là : liste vide.
pub(super) fn chamber_slots_on(chamber: &Chamber, day: DayOfWeek) -> Vec<Slot> {
    if !chamber.is_active {
        return Vec::new();
    }
    chamber
        .windows_on(day)
        .flat_map(|w| slots::window_slots(chamber, w))
        .collect()
}

pub fn chamber_slots(chamber: &Chamber, date: NaiveDate) -> Vec<Slot> {
    chamber_slots_on(chamber, DayOfWeek::of(date))
}

/// Tous les cabinets actifs d'un médecin, triés par heure.
/// Tri stable : à heure égale, l'ordre des cabinets est conservé.
pub fn doctor_slots(doctor: &Doctor, date: NaiveDate) -> Vec<Slot> {
    let day = DayOfWeek::of(date);
    let mut out: Vec<Slot> = doctor
        .effective_chambers()
        .iter()
        .flat_map(|c| chamber_slots_on(c, day))
        .collect();
    out.sort_by_key(|s| s.time);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AvailabilityWindow, HospitalId};

    // 2025-10-06 est un lundi
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()
    }

    fn chamber(hospital: &str, name: &str, windows: Vec<AvailabilityWindow>) -> Chamber {
        let mut c = Chamber::new(HospitalId::new(hospital), name, "1", 50);
        c.availability = windows;
        c
    }

    fn window(day: DayOfWeek, start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow::new(day, start.parse().unwrap(), end.parse().unwrap())
    }

    #[test]
    fn merges_chambers_sorted_with_stable_ties() {
        let mut doctor = Doctor::new("Dr A", vec![]);
        doctor.chambers.push(chamber("h1", "east", vec![window(DayOfWeek::Monday, "10:00", "11:00")]));
        doctor.chambers.push(chamber("h2", "west", vec![window(DayOfWeek::Monday, "09:30", "10:30")]));

        let slots = doctor_slots(&doctor, monday());
        let seen: Vec<(String, &str)> = slots
            .iter()
            .map(|s| (s.time.to_string(), s.chamber_name.as_str()))
            .collect();
        assert_eq!(
            seen,
            [
                ("09:30".to_string(), "west"),
                ("10:00".to_string(), "east"),
                ("10:00".to_string(), "west"),
                ("10:30".to_string(), "east"),
            ]
        );
    }

    #[test]
    fn inactive_chamber_and_windows_contribute_nothing() {
        let mut doctor = Doctor::new("Dr B", vec![]);
        let mut closed = chamber("h1", "closed", vec![window(DayOfWeek::Monday, "09:00", "12:00")]);
        closed.is_active = false;
        doctor.chambers.push(closed);
        doctor.chambers.push(chamber(
            "h1",
            "open",
            vec![window(DayOfWeek::Monday, "09:00", "12:00").inactive()],
        ));
        assert!(doctor_slots(&doctor, monday()).is_empty());
        assert!(chamber_slots(&doctor.chambers[0], monday()).is_empty());
    }

    #[test]
    fn same_weekday_dates_yield_identical_slots() {
        let c = chamber("h1", "c", vec![window(DayOfWeek::Monday, "08:00", "09:00")]);
        let next_monday = monday() + chrono::Duration::days(7);
        assert_eq!(chamber_slots(&c, monday()), chamber_slots(&c, next_monday));
        assert!(chamber_slots(&c, monday().succ_opt().unwrap()).is_empty());
    }
}
