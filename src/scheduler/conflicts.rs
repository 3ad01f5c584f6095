use super::SchedError;
use crate::interval;
use crate::model::{AvailabilityWindow, WindowId};

/// Vrai si les deux fenêtres tombent le même jour et se chevauchent.
pub fn windows_overlap(a: &AvailabilityWindow, b: &AvailabilityWindow) -> bool {
    a.day_of_week == b.day_of_week
        && interval::overlaps(
            a.start_time.minutes(),
            a.end_time.minutes(),
            b.start_time.minutes(),
            b.end_time.minutes(),
        )
}

/// Refuse `candidate` s'il chevauche une fenêtre active existante du même jour.
/// `exclude` écarte la fenêtre en cours de modification.
pub fn check_overlap(
    candidate: &AvailabilityWindow,
    existing: &[AvailabilityWindow],
    exclude: Option<&WindowId>,
) -> Result<(), SchedError> {
    let clash = existing
        .iter()
        .filter(|w| w.is_active && Some(&w.id) != exclude)
        .find(|w| windows_overlap(candidate, w));

    match clash {
        Some(w) => Err(SchedError::Overlap {
            day: candidate.day_of_week,
            start: candidate.start_time,
            end: candidate.end_time,
            existing: w.id.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::DayOfWeek;

    fn window(day: DayOfWeek, start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow::new(day, start.parse().unwrap(), end.parse().unwrap())
    }

    #[test]
    fn shared_boundary_is_not_an_overlap() {
        let existing = vec![window(DayOfWeek::Monday, "09:00", "11:00")];
        let candidate = window(DayOfWeek::Monday, "11:00", "13:00");
        assert!(check_overlap(&candidate, &existing, None).is_ok());
    }

    #[test]
    fn contained_candidate_is_rejected() {
        let existing = vec![window(DayOfWeek::Monday, "09:00", "11:00")];
        let candidate = window(DayOfWeek::Monday, "09:30", "10:30");
        let err = check_overlap(&candidate, &existing, None).unwrap_err();
        assert!(matches!(err, SchedError::Overlap { existing: ref id, .. } if id == &existing[0].id));
    }

    #[test]
    fn containing_candidate_is_rejected() {
        let existing = vec![window(DayOfWeek::Friday, "10:00", "10:30")];
        let candidate = window(DayOfWeek::Friday, "08:00", "12:00");
        assert!(check_overlap(&candidate, &existing, None).is_err());
    }

    #[test]
    fn other_days_and_inactive_windows_are_ignored() {
        let existing = vec![
            window(DayOfWeek::Tuesday, "09:00", "11:00"),
            window(DayOfWeek::Monday, "09:00", "11:00").inactive(),
        ];
        let candidate = window(DayOfWeek::Monday, "10:00", "12:00");
        assert!(check_overlap(&candidate, &existing, None).is_ok());
    }

    #[test]
    fn excluded_window_does_not_clash_with_itself() {
        let existing = vec![window(DayOfWeek::Monday, "09:00", "11:00")];
        let mut edited = existing[0].clone();
        edited.end_time = "12:00".parse().unwrap();
        assert!(check_overlap(&edited, &existing, Some(&existing[0].id)).is_ok());
    }

    #[test]
    fn overlap_relation_is_symmetric() {
        let windows = [
            window(DayOfWeek::Monday, "09:00", "11:00"),
            window(DayOfWeek::Monday, "10:59", "12:00"),
            window(DayOfWeek::Monday, "11:00", "13:00"),
            window(DayOfWeek::Monday, "08:00", "14:00"),
            window(DayOfWeek::Sunday, "08:00", "14:00"),
        ];
        for a in &windows {
            for b in &windows {
                assert_eq!(windows_overlap(a, b), windows_overlap(b, a));
            }
        }
    }
}
