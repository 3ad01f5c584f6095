use crate::model::{Doctor, DoctorId, Hospital, HospitalId, Registry};
use crate::scheduler::SchedError;

/// Accès aux agrégats Doctor.
pub trait DoctorRepository {
    fn find_doctor(&self, id: &DoctorId) -> Result<Doctor, SchedError>;
    /// Médecins associés à l'hôpital, filtrés par spécialité exacte si fournie.
    fn find_by_hospital_and_specialization(
        &self,
        hospital: &HospitalId,
        specialization: Option<&str>,
    ) -> Result<Vec<Doctor>, SchedError>;
    /// Remplace l'agrégat complet (ou l'ajoute s'il est nouveau).
    fn save_doctor(&mut self, doctor: Doctor) -> Result<Doctor, SchedError>;
}

pub trait HospitalRepository {
    fn find_hospital(&self, id: &HospitalId) -> Result<Hospital, SchedError>;
}

impl DoctorRepository for Registry {
    fn find_doctor(&self, id: &DoctorId) -> Result<Doctor, SchedError> {
        self.find_doctor_by_id(id)
            .cloned()
            .ok_or_else(|| SchedError::not_found("doctor", id))
    }

    fn find_by_hospital_and_specialization(
        &self,
        hospital: &HospitalId,
        specialization: Option<&str>,
    ) -> Result<Vec<Doctor>, SchedError> {
        Ok(self
            .doctors
            .iter()
            .filter(|d| d.works_at(hospital))
            .filter(|d| specialization.map_or(true, |s| d.has_specialization(s)))
            .cloned()
            .collect())
    }

    fn save_doctor(&mut self, doctor: Doctor) -> Result<Doctor, SchedError> {
        match self.find_doctor_mut_by_id(&doctor.id) {
            Some(slot) => *slot = doctor.clone(),
            None => self.doctors.push(doctor.clone()),
        }
        Ok(doctor)
    }
}

impl HospitalRepository for Registry {
    fn find_hospital(&self, id: &HospitalId) -> Result<Hospital, SchedError> {
        self.find_hospital_by_id(id)
            .cloned()
            .ok_or_else(|| SchedError::not_found("hospital", id))
    }
}
