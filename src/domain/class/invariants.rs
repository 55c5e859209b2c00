use std::collections::HashSet;

use super::entity::Class;
use crate::domain::shared::{MAX_HOUR, MIN_PERIOD};
use crate::domain::{DomainError, DomainResult, ScheduleSlot};

const MAX_PERIOD: i64 = 99992;

/// Validates the invariants of a Class that need no other entity.
/// Foreign keys are resolved by the class repository.
pub fn validate_class_shape(class: &Class) -> DomainResult<()> {
    validate_period(class.period)?;
    validate_schedule(&class.schedule)?;
    validate_id_list("professors_ids", &class.professors_ids, false)?;
    validate_id_list("students_enrollments", &class.students_enrollments, true)?;
    Ok(())
}

/// Period is YYYYX: a plausible year followed by semester 1 or 2
fn validate_period(period: i64) -> DomainResult<()> {
    if !(MIN_PERIOD..=MAX_PERIOD).contains(&period) {
        return Err(DomainError::InvalidInput(format!(
            "period {} is not in YYYYX format",
            period
        )));
    }
    if !matches!(period % 10, 1 | 2) {
        return Err(DomainError::InvalidInput(format!(
            "period {} must end in semester 1 or 2",
            period
        )));
    }
    Ok(())
}

fn validate_schedule(schedule: &[ScheduleSlot]) -> DomainResult<()> {
    if schedule.is_empty() {
        return Err(DomainError::InvalidInput("schedule cannot be empty".to_string()));
    }
    for slot in schedule {
        if slot.start_time < 0 || slot.end_time > MAX_HOUR || slot.start_time >= slot.end_time {
            return Err(DomainError::InvalidInput(format!(
                "invalid schedule slot {}",
                slot
            )));
        }
    }
    Ok(())
}

fn validate_id_list(field: &str, ids: &[i64], may_be_empty: bool) -> DomainResult<()> {
    if ids.is_empty() && !may_be_empty {
        return Err(DomainError::InvalidInput(format!("{} cannot be empty", field)));
    }
    let mut seen = HashSet::new();
    for id in ids {
        if *id <= 0 {
            return Err(DomainError::InvalidInput(format!(
                "{} holds non-positive id {}",
                field, id
            )));
        }
        if !seen.insert(id) {
            return Err(DomainError::InvalidInput(format!(
                "{} holds {} twice",
                field, id
            )));
        }
    }
    Ok(())
}
