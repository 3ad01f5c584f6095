use super::SchedError;
use crate::interval::DayOfWeek;
use crate::model::{Doctor, HospitalId};
use crate::repository::{DoctorRepository, HospitalRepository};
use chrono::NaiveDate;

/// Test d'existence : un cabinet actif dans cet hôpital avec une fenêtre
/// active ce jour-là. Aucun créneau n'est généré.
pub fn doctor_open_at(doctor: &Doctor, hospital: &HospitalId, day: DayOfWeek) -> bool {
    doctor
        .effective_chambers()
        .iter()
        .any(|c| &c.hospital == hospital && c.open_on(day))
}

/// Médecins ayant au moins une fenêtre ouverte à `hospital` le jour de `date`,
/// dans l'ordre renvoyé par le dépôt.
pub(super) fn available_doctors<R>(
    repo: &R,
    hospital: &HospitalId,
    date: NaiveDate,
    specialization: Option<&str>,
) -> Result<Vec<Doctor>, SchedError>
where
    R: DoctorRepository + HospitalRepository,
{
    repo.find_hospital(hospital)?;
    let day = DayOfWeek::of(date);
    let mut doctors = repo.find_by_hospital_and_specialization(hospital, specialization)?;
    doctors.retain(|d| doctor_open_at(d, hospital, day));

    #[cfg(feature = "logging")]
    tracing::debug!(
        hospital = hospital.as_str(),
        %day,
        found = doctors.len(),
        "available doctors resolved"
    );

    Ok(doctors)
}
