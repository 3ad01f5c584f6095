use crate::interval::{BreakPeriod, DayOfWeek, FormatError, TimeOfDay};
use crate::model::{ChamberId, HospitalId, WindowId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options de planification
#[derive(Debug, Clone, Copy)]
pub struct ScheduleOptions {
    pub min_slot_minutes: u16,
    pub max_slot_minutes: u16,
    /// Revalide le chevauchement lors d'une modification de fenêtre
    /// (à l'insertion, la vérification est toujours faite).
    pub revalidate_updates: bool,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            min_slot_minutes: 10,
            max_slot_minutes: 120,
            revalidate_updates: false,
        }
    }
}

/// Créneau dérivé, recalculé à chaque requête, jamais persisté.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub chamber: ChamberId,
    pub chamber_name: String,
    pub chamber_number: String,
    pub hospital: HospitalId,
    pub time: TimeOfDay,
    pub duration: u16,
    pub fee: u32,
}

/// Modification partielle d'un cabinet ; `None` laisse le champ inchangé.
#[derive(Debug, Clone, Default)]
pub struct ChamberPatch {
    pub hospital: Option<HospitalId>,
    pub name: Option<String>,
    pub number: Option<String>,
    pub floor: Option<Option<String>>,
    pub building: Option<Option<String>>,
    pub contact_ext: Option<Option<String>>,
    pub fee: Option<u32>,
    pub max_patients_per_day: Option<Option<u32>>,
    pub is_active: Option<bool>,
}

/// Modification partielle d'une fenêtre.
#[derive(Debug, Clone, Default)]
pub struct WindowPatch {
    pub day_of_week: Option<DayOfWeek>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub slot_duration: Option<u16>,
    pub break_time: Option<Option<BreakPeriod>>,
    pub is_active: Option<bool>,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("window {day} {start}-{end} overlaps existing availability {existing}")]
    Overlap {
        day: DayOfWeek,
        start: TimeOfDay,
        end: TimeOfDay,
        existing: WindowId,
    },
    #[error("doctor {doctor} is not associated with hospital {hospital}")]
    Association { doctor: String, hospital: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SchedError {
    pub(crate) fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        SchedError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Erreurs de saisie (format ou contrainte de champ).
    pub fn is_validation(&self) -> bool {
        matches!(self, SchedError::Validation(_) | SchedError::Format(_))
    }
}
