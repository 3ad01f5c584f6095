use super::Slot;
use crate::interval::{BreakPeriod, TimeOfDay};
use crate::model::{AvailabilityWindow, Chamber};

/// Itérateur paresseux des créneaux d'une fenêtre, dans l'ordre croissant.
/// `Clone` permet de le rejouer depuis le début.
#[derive(Debug, Clone)]
pub struct WindowSlots<'a> {
    chamber: &'a Chamber,
    cursor: u16,
    end: u16,
    duration: u16,
    break_time: Option<BreakPeriod>,
}

impl<'a> WindowSlots<'a> {
    pub fn new(chamber: &'a Chamber, window: &AvailabilityWindow) -> Self {
        Self {
            chamber,
            cursor: window.start_time.minutes(),
            end: window.end_time.minutes(),
            duration: window.slot_duration,
            break_time: window.break_time,
        }
    }

    fn slot_at(&self, minutes: u16) -> Option<Slot> {
        Some(Slot {
            chamber: self.chamber.id.clone(),
            chamber_name: self.chamber.name.clone(),
            chamber_number: self.chamber.number.clone(),
            hospital: self.chamber.hospital.clone(),
            time: TimeOfDay::from_minutes(minutes)?,
            duration: self.duration,
            fee: self.chamber.fee,
        })
    }
}

impl Iterator for WindowSlots<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        // une durée nulle ne ferait jamais avancer le curseur
        if self.duration == 0 {
            return None;
        }
        // durée hors bornes lue depuis le stockage : on s'arrête au lieu de déborder
        while let Some(next) = self
            .cursor
            .checked_add(self.duration)
            .filter(|next| *next <= self.end)
        {
            let start = self.cursor;
            if let Some(brk) = self.break_time {
                if brk.intersects(start, self.duration) {
                    let resume = brk.end.minutes();
                    if resume <= start {
                        self.cursor = self.end;
                        return None;
                    }
                    self.cursor = resume;
                    continue;
                }
            }
            self.cursor = next;
            return self.slot_at(start);
        }
        None
    }
}

/// Créneaux d'une seule fenêtre.
pub fn window_slots<'a>(chamber: &'a Chamber, window: &AvailabilityWindow) -> WindowSlots<'a> {
    WindowSlots::new(chamber, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::DayOfWeek;
    use crate::model::HospitalId;

    fn chamber() -> Chamber {
        Chamber::new(HospitalId::new("h1"), "Cardio", "204", 75)
    }

    fn window(start: &str, end: &str, minutes: u16) -> AvailabilityWindow {
        AvailabilityWindow::new(DayOfWeek::Monday, start.parse().unwrap(), end.parse().unwrap())
            .with_slot_duration(minutes)
    }

    fn brk(start: &str, end: &str) -> BreakPeriod {
        BreakPeriod {
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
        }
    }

    fn times(slots: impl Iterator<Item = Slot>) -> Vec<String> {
        slots.map(|s| s.time.to_string()).collect()
    }

    #[test]
    fn break_suppresses_intersecting_slots() {
        let c = chamber();
        let w = window("09:00", "12:00", 30).with_break(brk("10:00", "10:30"));
        assert_eq!(
            times(window_slots(&c, &w)),
            ["09:00", "09:30", "10:30", "11:00", "11:30"]
        );
    }

    #[test]
    fn straddling_slot_is_dropped_not_truncated() {
        let c = chamber();
        let w = window("09:00", "11:00", 40).with_break(brk("10:00", "10:10"));
        // 09:40-10:20 chevauche la pause : on reprend à 10:10
        assert_eq!(times(window_slots(&c, &w)), ["09:00", "10:10"]);
    }

    #[test]
    fn count_matches_floor_without_break() {
        let c = chamber();
        for (start, end, minutes) in [("08:00", "12:00", 30), ("08:00", "12:10", 25), ("13:15", "14:00", 45)] {
            let w = window(start, end, minutes);
            let slots: Vec<Slot> = window_slots(&c, &w).collect();
            let span = w.end_time.minutes() - w.start_time.minutes();
            assert_eq!(slots.len(), usize::from(span / minutes));
            for pair in slots.windows(2) {
                assert_eq!(pair[1].time.minutes() - pair[0].time.minutes(), minutes);
            }
        }
    }

    #[test]
    fn slots_carry_chamber_projection() {
        let c = chamber();
        let w = window("09:00", "09:30", 30);
        let slot = window_slots(&c, &w).next().unwrap();
        assert_eq!(slot.chamber, c.id);
        assert_eq!(slot.chamber_number, "204");
        assert_eq!(slot.hospital, HospitalId::new("h1"));
        assert_eq!((slot.duration, slot.fee), (30, 75));
    }

    #[test]
    fn malformed_break_terminates() {
        let c = chamber();
        // pause hors fenêtre, et pause dont la fin précède le curseur
        let w = window("09:00", "10:00", 30).with_break(brk("08:00", "09:10"));
        assert_eq!(times(window_slots(&c, &w)), ["09:10"]);
        let mut w = window("09:00", "10:00", 30);
        w.break_time = Some(brk("09:20", "09:00"));
        assert_eq!(times(window_slots(&c, &w)), ["09:00", "09:30"]);
    }

    #[test]
    fn oversized_duration_yields_nothing() {
        let c = chamber();
        let w = window("09:00", "10:00", 65000);
        assert!(window_slots(&c, &w).next().is_none());
        let w = window("23:00", "23:59", u16::MAX).with_break(brk("23:10", "23:20"));
        assert!(window_slots(&c, &w).next().is_none());
        assert!(brk("23:10", "23:20").intersects(23 * 60, u16::MAX));
    }

    #[test]
    fn iterator_is_restartable() {
        let c = chamber();
        let w = window("09:00", "12:00", 20).with_break(brk("10:00", "10:40"));
        let it = window_slots(&c, &w);
        let first: Vec<Slot> = it.clone().collect();
        let second: Vec<Slot> = it.collect();
        assert_eq!(first, second);
        assert!(first
            .iter()
            .all(|s| !w.break_time.unwrap().intersects(s.time.minutes(), s.duration)));
    }
}
