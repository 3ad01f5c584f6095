//! Modèle d'intervalles : heure du jour, jour de la semaine, pauses.
//!
//! Tout est exprimé en minutes depuis minuit, sans fuseau : une fenêtre
//! hebdomadaire ne dépend que du jour de la semaine, jamais de la date.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid time of day {0:?}: expected HH:MM (24-hour)")]
    Time(String),
    #[error("invalid day of week {0:?}: expected monday..sunday")]
    Day(String),
}

/// Heure du jour `HH:MM`, stockée en minutes depuis minuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, FormatError> {
        if hour > 23 || minute > 59 {
            return Err(FormatError::Time(format!("{hour}:{minute}")));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Construit depuis un nombre de minutes ; `None` au-delà de 23:59.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
    pub fn hour(self) -> u16 {
        self.0 / 60
    }
    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = FormatError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let err = || FormatError::Time(raw.to_string());
        let bytes = raw.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(err());
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(err());
        }
        let [h1, h2, m1, m2] = digits.map(|d| u16::from(d - b'0'));
        Self::from_hm(h1 * 10 + h2, m1 * 10 + m2).map_err(|_| err())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Clé jour de la semaine (nom anglais en minuscules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Jour de la semaine d'une date calendaire.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = FormatError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.as_str() == raw)
            .ok_or_else(|| FormatError::Day(raw.to_string()))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pause à l'intérieur d'une fenêtre, intervalle `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPeriod {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl BreakPeriod {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, String> {
        if end <= start {
            return Err("break end must be after break start".to_string());
        }
        Ok(Self { start, end })
    }

    /// Vrai si `[from, from + minutes)` touche la pause.
    pub fn intersects(&self, from: u16, minutes: u16) -> bool {
        overlaps(from, from.saturating_add(minutes), self.start.minutes(), self.end.minutes())
    }
}

/// Intersection d'intervalles semi-ouverts ; une borne partagée ne compte pas.
pub fn overlaps(a_start: u16, a_end: u16, b_start: u16, b_end: u16) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: &str) -> TimeOfDay {
        raw.parse().unwrap()
    }

    #[test]
    fn parses_and_formats_zero_padded() {
        assert_eq!(t("09:05").minutes(), 9 * 60 + 5);
        assert_eq!(t("00:00").to_string(), "00:00");
        assert_eq!(t("23:59").to_string(), "23:59");
        assert_eq!(TimeOfDay::from_hm(7, 0).unwrap().to_string(), "07:00");
    }

    #[test]
    fn rejects_malformed_times() {
        for raw in ["24:00", "12:60", "9:00", "09:0", "0900", "ab:cd", "", "09:00 "] {
            assert!(raw.parse::<TimeOfDay>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn day_of_week_from_date_and_name() {
        // 2025-10-06 est un lundi
        let monday = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        assert_eq!(DayOfWeek::of(monday), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::of(monday.succ_opt().unwrap()), DayOfWeek::Tuesday);
        assert_eq!("sunday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
        assert!("Monday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn overlap_is_symmetric_and_half_open() {
        let cases = [(540, 660, 660, 780), (540, 660, 570, 630), (0, 10, 5, 20), (100, 200, 300, 400)];
        for (a, b, c, d) in cases {
            assert_eq!(overlaps(a, b, c, d), overlaps(c, d, a, b));
        }
        assert!(!overlaps(540, 660, 660, 780));
        assert!(overlaps(540, 660, 570, 630));
    }

    #[test]
    fn serde_uses_hh_mm_strings() {
        let json = serde_json::to_string(&t("08:30")).unwrap();
        assert_eq!(json, "\"08:30\"");
        let back: TimeOfDay = serde_json::from_str("\"17:45\"").unwrap();
        assert_eq!(back, t("17:45"));
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
        assert_eq!(serde_json::to_string(&DayOfWeek::Friday).unwrap(), "\"friday\"");
    }
}
