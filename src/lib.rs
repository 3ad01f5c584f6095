#![forbid(unsafe_code)]
//! Cabinet — moteur de disponibilités et de créneaux pour cabinets médicaux.
//!
//! - Fenêtres hebdomadaires par cabinet, avec pause optionnelle.
//! - Refus des fenêtres qui se chevauchent le même jour.
//! - Génération des créneaux d'une date, par cabinet ou par médecin.
//! - Recherche des médecins disponibles dans un hôpital.
//! - Stockage fichier (JSON) ; import/export CSV.

pub mod interval;
pub mod io;
pub mod legacy;
pub mod model;
pub mod repository;
pub mod scheduler;
pub mod storage;

pub use interval::{BreakPeriod, DayOfWeek, FormatError, TimeOfDay};
pub use model::{
    AvailabilityWindow, Chamber, ChamberId, Doctor, DoctorId, Hospital, HospitalId, Registry,
    WindowId, WorkingHours,
};
pub use repository::{DoctorRepository, HospitalRepository};
pub use scheduler::{
    ChamberPatch, ScheduleOptions, SchedError, Scheduler, Slot, WindowPatch,
};
pub use storage::{JsonStorage, Storage};
