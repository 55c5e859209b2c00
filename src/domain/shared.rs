// src/domain/shared.rs
//
// Constants and value types shared by every entity

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

pub const MAX_LENGTH_NAME: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_COMMENT_LENGTH: usize = 1000;
pub const MAX_USERNAME_LENGTH: usize = 200;
pub const MAX_PASSWORD_LENGTH: usize = 1000;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Lowest accepted academic period (first semester of 2000)
pub const MIN_PERIOD: i64 = 20001;

/// Schedule hours run from 0 to 24 inclusive
pub const MAX_HOUR: i64 = 24;

/// Day of the week a class meets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
            Weekday::Sun => "SUN",
        }
    }
}

impl std::str::FromStr for Weekday {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.code() == upper)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown weekday '{}'", s.trim())))
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One weekly meeting of a class, hours in `[0, 24]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: Weekday,
    pub start_time: i64,
    pub end_time: i64,
}

impl ScheduleSlot {
    pub fn new(day: Weekday, start_time: i64, end_time: i64) -> Self {
        Self {
            day,
            start_time,
            end_time,
        }
    }
}

impl std::fmt::Display for ScheduleSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start_time, self.end_time)
    }
}

fn slot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{3})\s+(\d{1,2})\s*-\s*(\d{1,2})$").expect("slot pattern is valid")
    })
}

/// Parse a schedule such as `"MON 9-11; WED 14-16"`.
///
/// Entries are separated by `;` or `,`. Hour ranges are not checked here,
/// class validation does that.
pub fn parse_schedule(input: &str) -> DomainResult<Vec<ScheduleSlot>> {
    let mut slots = Vec::new();

    for entry in input.split([';', ',']).map(str::trim).filter(|e| !e.is_empty()) {
        let caps = slot_pattern().captures(entry).ok_or_else(|| {
            DomainError::InvalidInput(format!("malformed schedule entry '{}'", entry))
        })?;

        let day: Weekday = caps[1].parse()?;
        let start_time: i64 = caps[2]
            .parse()
            .map_err(|_| DomainError::InvalidInput(format!("bad start hour in '{}'", entry)))?;
        let end_time: i64 = caps[3]
            .parse()
            .map_err(|_| DomainError::InvalidInput(format!("bad end hour in '{}'", entry)))?;

        slots.push(ScheduleSlot::new(day, start_time, end_time));
    }

    if slots.is_empty() {
        return Err(DomainError::InvalidInput("schedule is empty".to_string()));
    }
    Ok(slots)
}

/// Trimmed text must be non-empty and at most `max` characters
pub fn validate_bounded_text(field: &str, value: &str, max: usize) -> DomainResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::InvalidInput(format!(
            "{} exceeds {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Keys generated or chosen for records must be strictly positive
pub fn validate_positive_key(field: &str, key: i64) -> DomainResult<()> {
    if key <= 0 {
        return Err(DomainError::InvalidInput(format!(
            "{} must be a positive integer, got {}",
            field, key
        )));
    }
    Ok(())
}

/// Append `value` unless already present. Returns whether it was added.
pub(crate) fn push_unique(list: &mut Vec<i64>, value: i64) -> bool {
    if list.contains(&value) {
        return false;
    }
    list.push(value);
    true
}

/// Remove every occurrence of `value`. Returns whether anything was removed.
pub(crate) fn remove_value(list: &mut Vec<i64>, value: i64) -> bool {
    let before = list.len();
    list.retain(|v| *v != value);
    list.len() != before
}

/// Swap `old` for `new` keeping the list duplicate-free
pub(crate) fn replace_value(list: &mut Vec<i64>, old: i64, new: i64) -> bool {
    if !remove_value(list, old) {
        return false;
    }
    push_unique(list, new);
    true
}
