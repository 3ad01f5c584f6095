use crate::interval::{BreakPeriod, DayOfWeek, TimeOfDay};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: AsRef<str>>(s: S) -> Self {
                Self(s.as_ref().to_owned())
            }
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifiant fort pour Doctor
    DoctorId
);
string_id!(
    /// Identifiant fort pour Hospital
    HospitalId
);
string_id!(
    /// Identifiant fort pour Chamber, stable dans l'agrégat Doctor
    ChamberId
);
string_id!(
    /// Identifiant fort pour AvailabilityWindow
    WindowId
);

pub const DEFAULT_SLOT_MINUTES: u16 = 30;

fn default_slot_duration() -> u16 {
    DEFAULT_SLOT_MINUTES
}

fn default_true() -> bool {
    true
}

/// Hôpital ; sert uniquement à valider les références des cabinets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialties: Vec<String>,
}

impl Hospital {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: HospitalId::random(),
            name: name.into(),
            address: String::new(),
            specialties: Vec::new(),
        }
    }
}

/// Plage hebdomadaire récurrente d'un cabinet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: WindowId,
    pub day_of_week: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default = "default_slot_duration")]
    pub slot_duration: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_time: Option<BreakPeriod>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl AvailabilityWindow {
    /// Crée une fenêtre active, durée de créneau par défaut (30 min).
    /// La validation complète se fait à l'insertion dans le cabinet.
    pub fn new(day_of_week: DayOfWeek, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            id: WindowId::random(),
            day_of_week,
            start_time,
            end_time,
            slot_duration: DEFAULT_SLOT_MINUTES,
            break_time: None,
            is_active: true,
        }
    }

    pub fn with_slot_duration(mut self, minutes: u16) -> Self {
        self.slot_duration = minutes;
        self
    }

    pub fn with_break(mut self, period: BreakPeriod) -> Self {
        self.break_time = Some(period);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn applies_on(&self, day: DayOfWeek) -> bool {
        self.is_active && self.day_of_week == day
    }
}

/// Cabinet de consultation d'un médecin dans un hôpital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chamber {
    pub id: ChamberId,
    pub hospital: HospitalId,
    pub name: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_ext: Option<String>,
    pub fee: u32,
    /// `None` : pas de plafond.
    #[serde(default)]
    pub max_patients_per_day: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

impl Chamber {
    pub fn new<N: Into<String>, R: Into<String>>(
        hospital: HospitalId,
        name: N,
        number: R,
        fee: u32,
    ) -> Self {
        Self {
            id: ChamberId::random(),
            hospital,
            name: name.into(),
            number: number.into(),
            floor: None,
            building: None,
            contact_ext: None,
            fee,
            max_patients_per_day: None,
            is_active: true,
            availability: Vec::new(),
        }
    }

    pub fn find_window(&self, id: &WindowId) -> Option<&AvailabilityWindow> {
        self.availability.iter().find(|w| &w.id == id)
    }

    /// Fenêtres actives pour un jour donné, dans l'ordre d'insertion.
    pub fn windows_on(&self, day: DayOfWeek) -> impl Iterator<Item = &AvailabilityWindow> + '_ {
        self.availability.iter().filter(move |w| w.applies_on(day))
    }

    /// Au moins une fenêtre active ce jour-là (sans générer de créneaux).
    pub fn open_on(&self, day: DayOfWeek) -> bool {
        self.is_active && self.windows_on(day).next().is_some()
    }
}

/// Horaires « à plat » des médecins sans cabinet (ancien schéma).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub hospital: HospitalId,
    pub days: Vec<DayOfWeek>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default = "default_slot_duration")]
    pub slot_duration: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_time: Option<BreakPeriod>,
}

/// Médecin : agrégat propriétaire de ses cabinets et fenêtres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub hospitals: Vec<HospitalId>,
    #[serde(default)]
    pub chambers: Vec<Chamber>,
    #[serde(default)]
    pub fee: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<WorkingHours>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Doctor {
    pub fn new<N: Into<String>>(name: N, specializations: Vec<String>) -> Self {
        Self {
            id: DoctorId::random(),
            name: name.into(),
            specializations,
            hospitals: Vec::new(),
            chambers: Vec::new(),
            fee: 0,
            working_hours: None,
            is_active: true,
        }
    }

    pub fn works_at(&self, hospital: &HospitalId) -> bool {
        self.hospitals.contains(hospital)
    }

    pub fn has_specialization(&self, specialization: &str) -> bool {
        self.specializations.iter().any(|s| s == specialization)
    }

    pub fn find_chamber(&self, id: &ChamberId) -> Option<&Chamber> {
        self.chambers.iter().find(|c| &c.id == id)
    }

    /// Cabinets réels, ou le cabinet virtuel dérivé des horaires à plat
    /// si le médecin n'a aucun cabinet.
    pub fn effective_chambers(&self) -> Cow<'_, [Chamber]> {
        if self.chambers.is_empty() {
            if let Some(chamber) = crate::legacy::as_chamber(self) {
                return Cow::Owned(vec![chamber]);
            }
        }
        Cow::Borrowed(&self.chambers)
    }
}

/// Ensemble des documents persistés (médecins + hôpitaux).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Registry {
    #[serde(default)]
    pub hospitals: Vec<Hospital>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
}

impl Registry {
    pub fn find_hospital_by_id<'a>(&'a self, id: &HospitalId) -> Option<&'a Hospital> {
        self.hospitals.iter().find(|h| &h.id == id)
    }
    pub fn find_doctor_by_id<'a>(&'a self, id: &DoctorId) -> Option<&'a Doctor> {
        self.doctors.iter().find(|d| &d.id == id)
    }
    pub fn find_doctor_mut_by_id(&mut self, id: &DoctorId) -> Option<&mut Doctor> {
        self.doctors.iter_mut().find(|d| &d.id == id)
    }
}
