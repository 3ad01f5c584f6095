//! Éditions pures de l'agrégat Doctor : chaque fonction prend l'agrégat par
//! valeur et rend la nouvelle version, sans toucher au stockage.

use super::{conflicts, util, ChamberPatch, ScheduleOptions, SchedError, WindowPatch};
use crate::model::{
    AvailabilityWindow, Chamber, ChamberId, Doctor, HospitalId, WindowId, WorkingHours,
};

pub fn link_hospital(mut doctor: Doctor, hospital: &HospitalId) -> Doctor {
    if !doctor.works_at(hospital) {
        doctor.hospitals.push(hospital.clone());
    }
    doctor
}

/// Retire l'hôpital et, en cascade, tous les cabinets qui y sont rattachés
/// ainsi que les horaires à plat qui le visent.
pub fn unlink_hospital(mut doctor: Doctor, hospital: &HospitalId) -> Doctor {
    #[cfg(feature = "logging")]
    let before = doctor.chambers.len();
    doctor.hospitals.retain(|h| h != hospital);
    doctor.chambers.retain(|c| &c.hospital != hospital);
    if doctor
        .working_hours
        .as_ref()
        .is_some_and(|h| &h.hospital == hospital)
    {
        doctor.working_hours = None;
    }
    #[cfg(feature = "logging")]
    tracing::debug!(
        doctor = doctor.id.as_str(),
        hospital = hospital.as_str(),
        removed = before - doctor.chambers.len(),
        "hospital unlinked"
    );
    doctor
}

fn ensure_associated(doctor: &Doctor, hospital: &HospitalId) -> Result<(), SchedError> {
    if doctor.works_at(hospital) {
        return Ok(());
    }
    Err(SchedError::Association {
        doctor: doctor.id.as_str().to_string(),
        hospital: hospital.as_str().to_string(),
    })
}

fn ensure_unique_label(
    doctor: &Doctor,
    candidate: &Chamber,
    exclude: Option<&ChamberId>,
) -> Result<(), SchedError> {
    let taken = doctor.chambers.iter().any(|c| {
        Some(&c.id) != exclude
            && c.hospital == candidate.hospital
            && c.name == candidate.name
            && c.number == candidate.number
    });
    if taken {
        return Err(SchedError::Validation(format!(
            "chamber {} {} already exists in hospital {}",
            candidate.name, candidate.number, candidate.hospital
        )));
    }
    Ok(())
}

/// Ajoute un cabinet ; ses fenêtres éventuelles passent par la même
/// validation qu'un ajout de fenêtre.
pub fn add_chamber(
    mut doctor: Doctor,
    mut chamber: Chamber,
    opts: ScheduleOptions,
) -> Result<(Doctor, ChamberId), SchedError> {
    ensure_associated(&doctor, &chamber.hospital)?;
    ensure_unique_label(&doctor, &chamber, None)?;
    if util::find_chamber_index(&doctor.chambers, &chamber.id).is_some() {
        return Err(SchedError::Validation(format!(
            "chamber id {} already in use",
            chamber.id
        )));
    }

    let windows = std::mem::take(&mut chamber.availability);
    for window in windows {
        util::validate_window(&window, opts)?;
        conflicts::check_overlap(&window, &chamber.availability, None)?;
        chamber.availability.push(window);
    }

    let id = chamber.id.clone();
    doctor.chambers.push(chamber);
    Ok((doctor, id))
}

pub fn update_chamber(
    mut doctor: Doctor,
    chamber_id: &ChamberId,
    patch: ChamberPatch,
) -> Result<Doctor, SchedError> {
    let pos = util::find_chamber_index(&doctor.chambers, chamber_id)
        .ok_or_else(|| SchedError::not_found("chamber", chamber_id))?;

    let mut updated = doctor.chambers[pos].clone();
    if let Some(hospital) = patch.hospital {
        ensure_associated(&doctor, &hospital)?;
        updated.hospital = hospital;
    }
    if let Some(name) = patch.name {
        updated.name = name;
    }
    if let Some(number) = patch.number {
        updated.number = number;
    }
    if let Some(floor) = patch.floor {
        updated.floor = floor;
    }
    if let Some(building) = patch.building {
        updated.building = building;
    }
    if let Some(ext) = patch.contact_ext {
        updated.contact_ext = ext;
    }
    if let Some(fee) = patch.fee {
        updated.fee = fee;
    }
    if let Some(cap) = patch.max_patients_per_day {
        updated.max_patients_per_day = cap;
    }
    if let Some(active) = patch.is_active {
        updated.is_active = active;
    }
    ensure_unique_label(&doctor, &updated, Some(chamber_id))?;

    doctor.chambers[pos] = updated;
    Ok(doctor)
}

pub fn remove_chamber(mut doctor: Doctor, chamber_id: &ChamberId) -> Result<Doctor, SchedError> {
    let pos = util::find_chamber_index(&doctor.chambers, chamber_id)
        .ok_or_else(|| SchedError::not_found("chamber", chamber_id))?;
    doctor.chambers.remove(pos);
    Ok(doctor)
}

pub fn add_window(
    mut doctor: Doctor,
    chamber_id: &ChamberId,
    window: AvailabilityWindow,
    opts: ScheduleOptions,
) -> Result<(Doctor, WindowId), SchedError> {
    let pos = util::find_chamber_index(&doctor.chambers, chamber_id)
        .ok_or_else(|| SchedError::not_found("chamber", chamber_id))?;
    let chamber = &mut doctor.chambers[pos];

    util::validate_window(&window, opts)?;
    if util::find_window_index(&chamber.availability, &window.id).is_some() {
        return Err(SchedError::Validation(format!(
            "window id {} already in use",
            window.id
        )));
    }
    if let Err(err) = conflicts::check_overlap(&window, &chamber.availability, None) {
        #[cfg(feature = "logging")]
        tracing::warn!(chamber = chamber_id.as_str(), error = %err, "window rejected");
        return Err(err);
    }

    let id = window.id.clone();
    chamber.availability.push(window);
    Ok((doctor, id))
}

/// Modifie une fenêtre en place. Le chevauchement avec les voisines n'est
/// revérifié que si `opts.revalidate_updates` est activé.
pub fn update_window(
    mut doctor: Doctor,
    chamber_id: &ChamberId,
    window_id: &WindowId,
    patch: WindowPatch,
    opts: ScheduleOptions,
) -> Result<Doctor, SchedError> {
    let pos = util::find_chamber_index(&doctor.chambers, chamber_id)
        .ok_or_else(|| SchedError::not_found("chamber", chamber_id))?;
    let chamber = &mut doctor.chambers[pos];
    let idx = util::find_window_index(&chamber.availability, window_id)
        .ok_or_else(|| SchedError::not_found("availability window", window_id))?;

    let mut updated = chamber.availability[idx].clone();
    if let Some(day) = patch.day_of_week {
        updated.day_of_week = day;
    }
    if let Some(start) = patch.start_time {
        updated.start_time = start;
    }
    if let Some(end) = patch.end_time {
        updated.end_time = end;
    }
    if let Some(minutes) = patch.slot_duration {
        updated.slot_duration = minutes;
    }
    if let Some(brk) = patch.break_time {
        updated.break_time = brk;
    }
    if let Some(active) = patch.is_active {
        updated.is_active = active;
    }

    util::validate_window(&updated, opts)?;
    if opts.revalidate_updates {
        conflicts::check_overlap(&updated, &chamber.availability, Some(window_id))?;
    }

    chamber.availability[idx] = updated;
    Ok(doctor)
}

pub fn remove_window(
    mut doctor: Doctor,
    chamber_id: &ChamberId,
    window_id: &WindowId,
) -> Result<Doctor, SchedError> {
    let pos = util::find_chamber_index(&doctor.chambers, chamber_id)
        .ok_or_else(|| SchedError::not_found("chamber", chamber_id))?;
    let chamber = &mut doctor.chambers[pos];
    let idx = util::find_window_index(&chamber.availability, window_id)
        .ok_or_else(|| SchedError::not_found("availability window", window_id))?;
    chamber.availability.remove(idx);
    Ok(doctor)
}

/// Horaires à plat (médecin sans cabinet). Mêmes règles qu'une fenêtre ;
/// les jours répétés ne comptent qu'une fois.
pub fn set_working_hours(
    mut doctor: Doctor,
    mut hours: WorkingHours,
    opts: ScheduleOptions,
) -> Result<Doctor, SchedError> {
    ensure_associated(&doctor, &hours.hospital)?;
    util::validate_working_hours(&hours, opts)?;
    let mut seen = Vec::with_capacity(hours.days.len());
    hours.days.retain(|day| {
        if seen.contains(day) {
            return false;
        }
        seen.push(*day);
        true
    });
    doctor.working_hours = Some(hours);
    Ok(doctor)
}

pub fn clear_working_hours(mut doctor: Doctor) -> Doctor {
    doctor.working_hours = None;
    doctor
}
