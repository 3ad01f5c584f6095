use super::{ScheduleOptions, SchedError};
use crate::interval::{BreakPeriod, TimeOfDay};
use crate::model::{AvailabilityWindow, Chamber, ChamberId, WindowId, WorkingHours};

pub(super) fn find_chamber_index(chambers: &[Chamber], id: &ChamberId) -> Option<usize> {
    chambers.iter().position(|c| &c.id == id)
}

pub(super) fn find_window_index(windows: &[AvailabilityWindow], id: &WindowId) -> Option<usize> {
    windows.iter().position(|w| &w.id == id)
}

/// Contraintes propres à une fenêtre, indépendamment de ses voisines.
pub(super) fn validate_window(
    window: &AvailabilityWindow,
    opts: ScheduleOptions,
) -> Result<(), SchedError> {
    validate_span(
        window.start_time,
        window.end_time,
        window.slot_duration,
        window.break_time,
        opts,
    )
}

/// Mêmes contraintes pour les horaires à plat, plus au moins un jour.
pub(super) fn validate_working_hours(
    hours: &WorkingHours,
    opts: ScheduleOptions,
) -> Result<(), SchedError> {
    if hours.days.is_empty() {
        return Err(SchedError::Validation(
            "working hours need at least one day".to_string(),
        ));
    }
    validate_span(
        hours.start_time,
        hours.end_time,
        hours.slot_duration,
        hours.break_time,
        opts,
    )
}

fn validate_span(
    start: TimeOfDay,
    end: TimeOfDay,
    slot_duration: u16,
    break_time: Option<BreakPeriod>,
    opts: ScheduleOptions,
) -> Result<(), SchedError> {
    if start >= end {
        return Err(SchedError::Validation(format!(
            "start time {start} must be before end time {end}"
        )));
    }
    if !(opts.min_slot_minutes..=opts.max_slot_minutes).contains(&slot_duration) {
        return Err(SchedError::Validation(format!(
            "slot duration {} must be between {} and {} minutes",
            slot_duration, opts.min_slot_minutes, opts.max_slot_minutes
        )));
    }
    if let Some(brk) = break_time {
        if brk.start >= brk.end {
            return Err(SchedError::Validation(
                "break start must be before break end".to_string(),
            ));
        }
        if brk.start < start || brk.end > end {
            return Err(SchedError::Validation(format!(
                "break {}-{} must lie within {start}-{end}",
                brk.start, brk.end
            )));
        }
    }
    Ok(())
}
