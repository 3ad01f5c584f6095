//! Adaptateur pour l'ancien schéma sans cabinet : les horaires à plat d'un
//! médecin deviennent un cabinet virtuel unique.

use crate::model::{AvailabilityWindow, Chamber, ChamberId, Doctor, WindowId};

pub const LEGACY_PREFIX: &str = "legacy";

/// Cabinet virtuel ; identifiants déterministes pour rester stables
/// d'une requête à l'autre.
pub fn as_chamber(doctor: &Doctor) -> Option<Chamber> {
    let hours = doctor.working_hours.as_ref()?;

    let availability = hours
        .days
        .iter()
        .map(|day| AvailabilityWindow {
            id: WindowId::new(format!("{LEGACY_PREFIX}-{}-{day}", doctor.id)),
            day_of_week: *day,
            start_time: hours.start_time,
            end_time: hours.end_time,
            slot_duration: hours.slot_duration,
            break_time: hours.break_time,
            is_active: true,
        })
        .collect();

    Some(Chamber {
        id: ChamberId::new(format!("{LEGACY_PREFIX}-{}", doctor.id)),
        hospital: hours.hospital.clone(),
        name: doctor.name.clone(),
        number: String::new(),
        floor: None,
        building: None,
        contact_ext: None,
        fee: doctor.fee,
        max_patients_per_day: None,
        is_active: doctor.is_active,
        availability,
    })
}
