#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use cabinet::{
    interval::{BreakPeriod, DayOfWeek, TimeOfDay},
    io,
    model::{
        AvailabilityWindow, Chamber, ChamberId, Doctor, DoctorId, Hospital, HospitalId, WindowId,
        WorkingHours,
    },
    repository::DoctorRepository,
    scheduler::{ChamberPatch, ScheduleOptions, Scheduler, WindowPatch},
    storage::{JsonStorage, Storage},
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI des cabinets médicaux : disponibilités et créneaux
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du registre (médecins + hôpitaux)
    #[arg(long, global = true, default_value = "registry.json")]
    registry: String,

    /// Revalide les chevauchements lors des modifications de fenêtres
    #[arg(long, global = true)]
    strict_updates: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un hôpital
    AddHospital {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        address: String,
        /// Identifiant imposé (sinon UUID)
        #[arg(long)]
        id: Option<String>,
    },

    /// Créer un médecin
    AddDoctor {
        #[arg(long)]
        name: String,
        /// liste "cardiology,neurology"
        #[arg(long, value_delimiter = ',')]
        specialization: Vec<String>,
        #[arg(long, default_value_t = 0)]
        fee: u32,
        #[arg(long)]
        id: Option<String>,
    },

    /// Associer un médecin à un hôpital
    LinkHospital {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        hospital: String,
    },

    /// Dissocier un médecin d'un hôpital (supprime ses cabinets rattachés)
    UnlinkHospital {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        hospital: String,
    },

    /// Ajouter un cabinet
    AddChamber {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        hospital: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        number: String,
        #[arg(long)]
        fee: u32,
        #[arg(long)]
        max_patients: Option<u32>,
        #[arg(long)]
        floor: Option<String>,
        #[arg(long)]
        building: Option<String>,
        /// Poste téléphonique
        #[arg(long)]
        contact_ext: Option<String>,
        #[arg(long)]
        id: Option<String>,
    },

    /// Modifier un cabinet
    UpdateChamber {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        chamber: String,
        #[arg(long)]
        hospital: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        fee: Option<u32>,
        #[arg(long)]
        max_patients: Option<u32>,
        #[arg(long, conflicts_with = "max_patients")]
        clear_max_patients: bool,
        #[arg(long)]
        floor: Option<String>,
        #[arg(long, conflicts_with = "floor")]
        clear_floor: bool,
        #[arg(long)]
        building: Option<String>,
        #[arg(long, conflicts_with = "building")]
        clear_building: bool,
        #[arg(long)]
        contact_ext: Option<String>,
        #[arg(long, conflicts_with = "contact_ext")]
        clear_contact_ext: bool,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Supprimer un cabinet
    RemoveChamber {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        chamber: String,
    },

    /// Lister les cabinets d'un médecin
    ListChambers {
        #[arg(long)]
        doctor: String,
    },

    /// Ajouter une fenêtre hebdomadaire à un cabinet
    AddWindow {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        chamber: String,
        /// monday..sunday
        #[arg(long)]
        day: DayOfWeek,
        /// HH:MM
        #[arg(long)]
        start: TimeOfDay,
        /// HH:MM
        #[arg(long)]
        end: TimeOfDay,
        #[arg(long, default_value_t = 30)]
        slot_duration: u16,
        #[arg(long, requires = "break_end")]
        break_start: Option<TimeOfDay>,
        #[arg(long, requires = "break_start")]
        break_end: Option<TimeOfDay>,
        #[arg(long)]
        inactive: bool,
        #[arg(long)]
        id: Option<String>,
    },

    /// Modifier une fenêtre
    UpdateWindow {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        chamber: String,
        #[arg(long)]
        window: String,
        #[arg(long)]
        day: Option<DayOfWeek>,
        #[arg(long)]
        start: Option<TimeOfDay>,
        #[arg(long)]
        end: Option<TimeOfDay>,
        #[arg(long)]
        slot_duration: Option<u16>,
        #[arg(long, requires = "break_end")]
        break_start: Option<TimeOfDay>,
        #[arg(long, requires = "break_start")]
        break_end: Option<TimeOfDay>,
        /// Supprime la pause
        #[arg(long, conflicts_with = "break_start")]
        clear_break: bool,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Supprimer une fenêtre
    RemoveWindow {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        chamber: String,
        #[arg(long)]
        window: String,
    },

    /// Horaires à plat d'un médecin sans cabinet
    SetWorkingHours {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        hospital: String,
        /// liste "monday,wednesday"
        #[arg(long, value_delimiter = ',', required = true)]
        days: Vec<DayOfWeek>,
        /// HH:MM
        #[arg(long)]
        start: TimeOfDay,
        /// HH:MM
        #[arg(long)]
        end: TimeOfDay,
        #[arg(long, default_value_t = 30)]
        slot_duration: u16,
        #[arg(long, requires = "break_end")]
        break_start: Option<TimeOfDay>,
        #[arg(long, requires = "break_start")]
        break_end: Option<TimeOfDay>,
    },

    /// Supprimer les horaires à plat
    ClearWorkingHours {
        #[arg(long)]
        doctor: String,
    },

    /// Importer des fenêtres depuis un CSV (tout ou rien)
    ImportWindows {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        chamber: String,
        #[arg(long)]
        csv: String,
    },

    /// Créneaux d'un médecin (ou d'un seul cabinet) à une date
    Slots {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        chamber: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Médecins ayant une disponibilité dans un hôpital à une date
    AvailableDoctors {
        #[arg(long)]
        hospital: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        specialization: Option<String>,
    },
}

fn break_period(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> Result<Option<BreakPeriod>> {
    match (start, end) {
        (Some(s), Some(e)) => Ok(Some(BreakPeriod::new(s, e).map_err(anyhow::Error::msg)?)),
        (None, None) => Ok(None),
        _ => bail!("--break-start and --break-end go together"),
    }
}

/// `--x` / `--clear-x` vers un champ de patch effaçable.
fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.registry)?;
    let opts = ScheduleOptions {
        revalidate_updates: cli.strict_updates,
        ..ScheduleOptions::default()
    };
    let mut scheduler = Scheduler::with_options(storage.load_or_default()?, opts);

    let code = match cli.cmd {
        Commands::AddHospital { name, address, id } => {
            let mut hospital = Hospital::new(name);
            hospital.address = address;
            if let Some(id) = id {
                hospital.id = HospitalId::new(id);
            }
            if scheduler.repo().find_hospital_by_id(&hospital.id).is_some() {
                bail!("hospital {} already exists", hospital.id);
            }
            println!("{}", hospital.id);
            scheduler.repo_mut().hospitals.push(hospital);
            storage.save(scheduler.repo())?;
            0
        }
        Commands::AddDoctor {
            name,
            specialization,
            fee,
            id,
        } => {
            let mut doctor = Doctor::new(name, specialization);
            doctor.fee = fee;
            if let Some(id) = id {
                doctor.id = DoctorId::new(id);
            }
            if scheduler.repo().find_doctor_by_id(&doctor.id).is_some() {
                bail!("doctor {} already exists", doctor.id);
            }
            println!("{}", doctor.id);
            scheduler.repo_mut().save_doctor(doctor)?;
            storage.save(scheduler.repo())?;
            0
        }
        Commands::LinkHospital { doctor, hospital } => {
            scheduler.link_hospital(&DoctorId::new(doctor), &HospitalId::new(hospital))?;
            storage.save(scheduler.repo())?;
            0
        }
        Commands::UnlinkHospital { doctor, hospital } => {
            scheduler.unlink_hospital(&DoctorId::new(doctor), &HospitalId::new(hospital))?;
            storage.save(scheduler.repo())?;
            0
        }
        Commands::AddChamber {
            doctor,
            hospital,
            name,
            number,
            fee,
            max_patients,
            floor,
            building,
            contact_ext,
            id,
        } => {
            let mut chamber = Chamber::new(HospitalId::new(hospital), name, number, fee);
            chamber.max_patients_per_day = max_patients;
            chamber.floor = floor;
            chamber.building = building;
            chamber.contact_ext = contact_ext;
            if let Some(id) = id {
                chamber.id = ChamberId::new(id);
            }
            let id = scheduler.add_chamber(&DoctorId::new(doctor), chamber)?;
            println!("{id}");
            storage.save(scheduler.repo())?;
            0
        }
        Commands::UpdateChamber {
            doctor,
            chamber,
            hospital,
            name,
            number,
            fee,
            max_patients,
            clear_max_patients,
            floor,
            clear_floor,
            building,
            clear_building,
            contact_ext,
            clear_contact_ext,
            active,
        } => {
            let patch = ChamberPatch {
                hospital: hospital.map(HospitalId::new),
                name,
                number,
                floor: clearable(floor, clear_floor),
                building: clearable(building, clear_building),
                contact_ext: clearable(contact_ext, clear_contact_ext),
                fee,
                max_patients_per_day: clearable(max_patients, clear_max_patients),
                is_active: active,
            };
            scheduler.update_chamber(&DoctorId::new(doctor), &ChamberId::new(chamber), patch)?;
            storage.save(scheduler.repo())?;
            0
        }
        Commands::RemoveChamber { doctor, chamber } => {
            scheduler.remove_chamber(&DoctorId::new(doctor), &ChamberId::new(chamber))?;
            storage.save(scheduler.repo())?;
            0
        }
        Commands::ListChambers { doctor } => {
            for c in scheduler.chambers(&DoctorId::new(doctor))? {
                let state = if c.is_active { "active" } else { "inactive" };
                let cap = c
                    .max_patients_per_day
                    .map_or_else(|| "-".to_string(), |n| n.to_string());
                println!(
                    "{} | {} {} | {} | fee {} | max {} | floor {} | {} window(s) | {}",
                    c.id,
                    c.name,
                    c.number,
                    c.hospital,
                    c.fee,
                    cap,
                    c.floor.as_deref().unwrap_or("-"),
                    c.availability.len(),
                    state
                );
                for w in &c.availability {
                    println!(
                        "  {} | {} {}-{} /{}min",
                        w.id, w.day_of_week, w.start_time, w.end_time, w.slot_duration
                    );
                }
            }
            0
        }
        Commands::AddWindow {
            doctor,
            chamber,
            day,
            start,
            end,
            slot_duration,
            break_start,
            break_end,
            inactive,
            id,
        } => {
            let mut window = AvailabilityWindow::new(day, start, end).with_slot_duration(slot_duration);
            window.break_time = break_period(break_start, break_end)?;
            window.is_active = !inactive;
            if let Some(id) = id {
                window.id = WindowId::new(id);
            }
            let id = scheduler.add_window(&DoctorId::new(doctor), &ChamberId::new(chamber), window)?;
            println!("{id}");
            storage.save(scheduler.repo())?;
            0
        }
        Commands::UpdateWindow {
            doctor,
            chamber,
            window,
            day,
            start,
            end,
            slot_duration,
            break_start,
            break_end,
            clear_break,
            active,
        } => {
            let break_time = if clear_break {
                Some(None)
            } else {
                break_period(break_start, break_end)?.map(Some)
            };
            let patch = WindowPatch {
                day_of_week: day,
                start_time: start,
                end_time: end,
                slot_duration,
                break_time,
                is_active: active,
            };
            scheduler.update_window(
                &DoctorId::new(doctor),
                &ChamberId::new(chamber),
                &WindowId::new(window),
                patch,
            )?;
            storage.save(scheduler.repo())?;
            0
        }
        Commands::RemoveWindow {
            doctor,
            chamber,
            window,
        } => {
            scheduler.remove_window(
                &DoctorId::new(doctor),
                &ChamberId::new(chamber),
                &WindowId::new(window),
            )?;
            storage.save(scheduler.repo())?;
            0
        }
        Commands::SetWorkingHours {
            doctor,
            hospital,
            days,
            start,
            end,
            slot_duration,
            break_start,
            break_end,
        } => {
            let hours = WorkingHours {
                hospital: HospitalId::new(hospital),
                days,
                start_time: start,
                end_time: end,
                slot_duration,
                break_time: break_period(break_start, break_end)?,
            };
            scheduler.set_working_hours(&DoctorId::new(doctor), hours)?;
            storage.save(scheduler.repo())?;
            0
        }
        Commands::ClearWorkingHours { doctor } => {
            scheduler.clear_working_hours(&DoctorId::new(doctor))?;
            storage.save(scheduler.repo())?;
            0
        }
        Commands::ImportWindows {
            doctor,
            chamber,
            csv,
        } => {
            let windows = io::import_windows_csv(csv)?;
            let doctor = DoctorId::new(doctor);
            let chamber = ChamberId::new(chamber);
            let count = windows.len();
            for window in windows {
                scheduler.add_window(&doctor, &chamber, window)?;
            }
            storage.save(scheduler.repo())?;
            println!("imported {count} window(s)");
            0
        }
        Commands::Slots {
            doctor,
            chamber,
            date,
            out_json,
            out_csv,
        } => {
            let doctor = DoctorId::new(doctor);
            let slots = match chamber {
                Some(c) => scheduler.chamber_slots(&doctor, &ChamberId::new(c), date)?,
                None => scheduler.doctor_slots(&doctor, date)?,
            };
            if let Some(path) = out_json {
                io::export_slots_json(path, &slots)?;
            }
            if let Some(path) = out_csv {
                io::export_slots_csv(path, &slots)?;
            }
            // impression compacte
            for s in &slots {
                println!(
                    "{} | {}min | {} | {} {} | {}",
                    s.time, s.duration, s.fee, s.chamber_name, s.chamber_number, s.hospital
                );
            }
            0
        }
        Commands::AvailableDoctors {
            hospital,
            date,
            specialization,
        } => {
            let doctors = scheduler.available_doctors(
                &HospitalId::new(hospital),
                date,
                specialization.as_deref(),
            )?;
            if doctors.is_empty() {
                eprintln!("no doctor available on {} ({})", date, DayOfWeek::of(date));
                // Code 2 = aucun résultat
                2
            } else {
                for d in &doctors {
                    println!("{} | {} | {}", d.id, d.name, d.specializations.join(","));
                }
                0
            }
        }
    };

    std::process::exit(code);
}
