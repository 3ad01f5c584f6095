mod aggregate;
mod conflicts;
pub mod mutate;
mod query;
mod slots;
mod types;
mod util;

pub use aggregate::{chamber_slots, doctor_slots};
pub use conflicts::{check_overlap, windows_overlap};
pub use query::doctor_open_at;
pub use slots::{window_slots, WindowSlots};
pub use types::{ChamberPatch, ScheduleOptions, SchedError, Slot, WindowPatch};

use crate::model::{
    AvailabilityWindow, Chamber, ChamberId, Doctor, DoctorId, HospitalId, WindowId, WorkingHours,
};
use crate::repository::{DoctorRepository, HospitalRepository};
use chrono::NaiveDate;

/// Scheduler : charge l'agrégat Doctor, applique une édition pure, le
/// réécrit en entier. Les lectures sont recalculées à chaque appel.
#[derive(Debug, Default)]
pub struct Scheduler<R> {
    repo: R,
    opts: ScheduleOptions,
}

impl<R> Scheduler<R>
where
    R: DoctorRepository + HospitalRepository,
{
    pub fn new(repo: R) -> Self {
        Self::with_options(repo, ScheduleOptions::default())
    }

    pub fn with_options(repo: R, opts: ScheduleOptions) -> Self {
        Self { repo, opts }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }
    pub fn repo_mut(&mut self) -> &mut R {
        &mut self.repo
    }
    pub fn into_inner(self) -> R {
        self.repo
    }
    pub fn options(&self) -> ScheduleOptions {
        self.opts
    }

    fn edit<T>(
        &mut self,
        doctor_id: &DoctorId,
        f: impl FnOnce(Doctor) -> Result<(Doctor, T), SchedError>,
    ) -> Result<T, SchedError> {
        let doctor = self.repo.find_doctor(doctor_id)?;
        let (doctor, out) = f(doctor)?;
        self.repo.save_doctor(doctor)?;
        Ok(out)
    }

    pub fn link_hospital(&mut self, doctor: &DoctorId, hospital: &HospitalId) -> Result<(), SchedError> {
        self.repo.find_hospital(hospital)?;
        self.edit(doctor, |d| Ok((mutate::link_hospital(d, hospital), ())))
    }

    /// Retire l'hôpital du médecin et supprime ses cabinets qui y sont rattachés.
    pub fn unlink_hospital(&mut self, doctor: &DoctorId, hospital: &HospitalId) -> Result<(), SchedError> {
        self.repo.find_hospital(hospital)?;
        self.edit(doctor, |d| Ok((mutate::unlink_hospital(d, hospital), ())))
    }

    pub fn add_chamber(&mut self, doctor: &DoctorId, chamber: Chamber) -> Result<ChamberId, SchedError> {
        self.repo.find_hospital(&chamber.hospital)?;
        let opts = self.opts;
        self.edit(doctor, |d| mutate::add_chamber(d, chamber, opts))
    }

    pub fn update_chamber(
        &mut self,
        doctor: &DoctorId,
        chamber: &ChamberId,
        patch: ChamberPatch,
    ) -> Result<(), SchedError> {
        if let Some(hospital) = &patch.hospital {
            self.repo.find_hospital(hospital)?;
        }
        self.edit(doctor, |d| Ok((mutate::update_chamber(d, chamber, patch)?, ())))
    }

    pub fn remove_chamber(&mut self, doctor: &DoctorId, chamber: &ChamberId) -> Result<(), SchedError> {
        self.edit(doctor, |d| Ok((mutate::remove_chamber(d, chamber)?, ())))
    }

    pub fn chambers(&self, doctor: &DoctorId) -> Result<Vec<Chamber>, SchedError> {
        Ok(self.repo.find_doctor(doctor)?.chambers)
    }

    pub fn chamber(&self, doctor: &DoctorId, chamber: &ChamberId) -> Result<Chamber, SchedError> {
        self.repo
            .find_doctor(doctor)?
            .find_chamber(chamber)
            .cloned()
            .ok_or_else(|| SchedError::not_found("chamber", chamber))
    }

    pub fn add_window(
        &mut self,
        doctor: &DoctorId,
        chamber: &ChamberId,
        window: AvailabilityWindow,
    ) -> Result<WindowId, SchedError> {
        let opts = self.opts;
        self.edit(doctor, |d| mutate::add_window(d, chamber, window, opts))
    }

    pub fn update_window(
        &mut self,
        doctor: &DoctorId,
        chamber: &ChamberId,
        window: &WindowId,
        patch: WindowPatch,
    ) -> Result<(), SchedError> {
        let opts = self.opts;
        self.edit(doctor, |d| {
            Ok((mutate::update_window(d, chamber, window, patch, opts)?, ()))
        })
    }

    pub fn remove_window(
        &mut self,
        doctor: &DoctorId,
        chamber: &ChamberId,
        window: &WindowId,
    ) -> Result<(), SchedError> {
        self.edit(doctor, |d| Ok((mutate::remove_window(d, chamber, window)?, ())))
    }

    /// Horaires à plat d'un médecin sans cabinet.
    pub fn set_working_hours(&mut self, doctor: &DoctorId, hours: WorkingHours) -> Result<(), SchedError> {
        self.repo.find_hospital(&hours.hospital)?;
        let opts = self.opts;
        self.edit(doctor, |d| Ok((mutate::set_working_hours(d, hours, opts)?, ())))
    }

    pub fn clear_working_hours(&mut self, doctor: &DoctorId) -> Result<(), SchedError> {
        self.edit(doctor, |d| Ok((mutate::clear_working_hours(d), ())))
    }

    /// Créneaux d'un cabinet à une date ; cabinet inactif : liste vide.
    pub fn chamber_slots(
        &self,
        doctor: &DoctorId,
        chamber: &ChamberId,
        date: NaiveDate,
    ) -> Result<Vec<Slot>, SchedError> {
        let doctor = self.repo.find_doctor(doctor)?;
        let chambers = doctor.effective_chambers();
        let found = chambers
            .iter()
            .find(|c| &c.id == chamber)
            .ok_or_else(|| SchedError::not_found("chamber", chamber))?;
        Ok(aggregate::chamber_slots(found, date))
    }

    pub fn doctor_slots(&self, doctor: &DoctorId, date: NaiveDate) -> Result<Vec<Slot>, SchedError> {
        let doctor = self.repo.find_doctor(doctor)?;
        Ok(aggregate::doctor_slots(&doctor, date))
    }

    pub fn available_doctors(
        &self,
        hospital: &HospitalId,
        date: NaiveDate,
        specialization: Option<&str>,
    ) -> Result<Vec<Doctor>, SchedError> {
        query::available_doctors(&self.repo, hospital, date, specialization)
    }
}
