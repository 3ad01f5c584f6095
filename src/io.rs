use crate::interval::{BreakPeriod, DayOfWeek, TimeOfDay};
use crate::model::{AvailabilityWindow, DEFAULT_SLOT_MINUTES};
use crate::scheduler::Slot;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de fenêtres depuis CSV:
/// header `day_of_week,start_time,end_time[,slot_duration][,break_start,break_end][,is_active]`
///
/// Les fenêtres ne sont pas validées ici ; elles passent ensuite par
/// l'ajout normal (bornes, pause, chevauchement).
pub fn import_windows_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<AvailabilityWindow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let window = parse_window_row(&rec).with_context(|| format!("invalid row {}", line + 1))?;
        out.push(window);
    }
    Ok(out)
}

fn field<'r>(rec: &'r StringRecord, idx: usize) -> Option<&'r str> {
    rec.get(idx).filter(|raw| !raw.is_empty())
}

fn parse_window_row(rec: &StringRecord) -> anyhow::Result<AvailabilityWindow> {
    let day: DayOfWeek = field(rec, 0).context("missing day_of_week")?.parse()?;
    let start: TimeOfDay = field(rec, 1).context("missing start_time")?.parse()?;
    let end: TimeOfDay = field(rec, 2).context("missing end_time")?.parse()?;

    let mut window = AvailabilityWindow::new(day, start, end);
    window.slot_duration = match field(rec, 3) {
        Some(raw) => raw.parse().context("slot_duration must be a number of minutes")?,
        None => DEFAULT_SLOT_MINUTES,
    };
    window.break_time = match (field(rec, 4), field(rec, 5)) {
        (Some(bs), Some(be)) => {
            Some(BreakPeriod::new(bs.parse()?, be.parse()?).map_err(anyhow::Error::msg)?)
        }
        (None, None) => None,
        _ => bail!("break_start and break_end go together"),
    };
    if let Some(flag) = field(rec, 6) {
        window.is_active = parse_bool(flag).context("invalid is_active value")?;
    }
    Ok(window)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export JSON des créneaux (jolie mise en forme)
pub fn export_slots_json<P: AsRef<Path>>(path: P, slots: &[Slot]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(slots)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des créneaux:
/// header `time,duration,fee,chamber_id,chamber_name,chamber_number,hospital_id`
pub fn export_slots_csv<P: AsRef<Path>>(path: P, slots: &[Slot]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "time",
        "duration",
        "fee",
        "chamber_id",
        "chamber_name",
        "chamber_number",
        "hospital_id",
    ])?;
    let mut duration = itoa::Buffer::new();
    let mut fee = itoa::Buffer::new();
    for s in slots {
        let time = s.time.to_string();
        w.write_record([
            time.as_str(),
            duration.format(s.duration),
            fee.format(s.fee),
            s.chamber.as_str(),
            s.chamber_name.as_str(),
            s.chamber_number.as_str(),
            s.hospital.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chamber, HospitalId};
    use crate::scheduler::window_slots;
    use tempfile::tempdir;

    #[test]
    fn imports_windows_with_optional_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("windows.csv");
        fs::write(
            &path,
            "day_of_week,start_time,end_time,slot_duration,break_start,break_end,is_active\n\
             monday,09:00,12:00,20,10:00,10:20,yes\n\
             friday,14:00,16:00,,,,\n\
             sunday,08:00,09:00,15,,,non\n",
        )
        .unwrap();

        let windows = import_windows_csv(&path).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].slot_duration, 20);
        assert_eq!(windows[0].break_time.unwrap().end.to_string(), "10:20");
        assert_eq!(windows[1].day_of_week, DayOfWeek::Friday);
        assert_eq!(windows[1].slot_duration, DEFAULT_SLOT_MINUTES);
        assert!(windows[1].break_time.is_none());
        assert!(!windows[2].is_active);
    }

    #[test]
    fn rejects_bad_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "day_of_week,start_time,end_time\nfunday,09:00,10:00\n").unwrap();
        assert!(import_windows_csv(&path).is_err());

        fs::write(&path, "day_of_week,start_time,end_time,slot_duration,break_start\nmonday,09:00,10:00,30,09:30\n").unwrap();
        assert!(import_windows_csv(&path).is_err());
    }

    #[test]
    fn exports_slots_as_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slots.csv");
        let chamber = Chamber::new(HospitalId::new("h1"), "Cardio", "7", 45);
        let window = AvailabilityWindow::new(
            DayOfWeek::Monday,
            "09:00".parse().unwrap(),
            "10:00".parse().unwrap(),
        );
        let slots: Vec<Slot> = window_slots(&chamber, &window).collect();
        export_slots_csv(&path, &slots).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "time,duration,fee,chamber_id,chamber_name,chamber_number,hospital_id");
        assert!(lines[1].starts_with("09:00,30,45,"));
        assert!(lines[2].ends_with(",Cardio,7,h1"));
    }
}
