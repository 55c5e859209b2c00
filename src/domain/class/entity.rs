use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{ClassCode, Enrollment, ProfessorId, ReviewId, ScheduleSlot, SubjectCode};

/// A scheduled offering of a Subject, taught by one or more Professors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Sequential identifier assigned by the store
    pub code: ClassCode,

    pub subject_code: SubjectCode,

    /// Academic period, YYYYX
    pub period: i64,

    pub schedule: Vec<ScheduleSlot>,

    pub professors_ids: Vec<ProfessorId>,

    #[serde(default)]
    pub students_enrollments: Vec<Enrollment>,

    /// Reviews that target this class
    #[serde(default)]
    pub reviews_ids: Vec<ReviewId>,
}

#[derive(Debug, Clone)]
pub struct NewClass {
    pub subject_code: SubjectCode,
    pub period: i64,
    pub schedule: Vec<ScheduleSlot>,
    pub professors_ids: Vec<ProfessorId>,
    pub students_enrollments: Vec<Enrollment>,
}

/// Partial update for a Class. The code and review list are not patchable.
#[derive(Debug, Clone, Default)]
pub struct ClassPatch {
    pub subject_code: Option<SubjectCode>,
    pub period: Option<i64>,
    pub schedule: Option<Vec<ScheduleSlot>>,
    pub professors_ids: Option<Vec<ProfessorId>>,
    pub students_enrollments: Option<Vec<Enrollment>>,
}

impl Class {
    pub fn new(code: ClassCode, data: NewClass) -> Self {
        Self {
            code,
            subject_code: data.subject_code,
            period: data.period,
            schedule: data.schedule,
            professors_ids: data.professors_ids,
            students_enrollments: data.students_enrollments,
            reviews_ids: Vec::new(),
        }
    }

    pub fn apply(&mut self, patch: ClassPatch) {
        if let Some(subject_code) = patch.subject_code {
            self.subject_code = subject_code;
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
        if let Some(schedule) = patch.schedule {
            self.schedule = schedule;
        }
        if let Some(professors) = patch.professors_ids {
            self.professors_ids = professors;
        }
        if let Some(students) = patch.students_enrollments {
            self.students_enrollments = students;
        }
    }

    /// Same subject, same period and the same professor set, in any order
    pub fn is_same_offering(
        &self,
        subject_code: SubjectCode,
        period: i64,
        professors_ids: &[ProfessorId],
    ) -> bool {
        if self.subject_code != subject_code || self.period != period {
            return false;
        }
        let mine: HashSet<&ProfessorId> = self.professors_ids.iter().collect();
        let theirs: HashSet<&ProfessorId> = professors_ids.iter().collect();
        mine == theirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Weekday;

    fn class() -> Class {
        Class::new(
            1,
            NewClass {
                subject_code: 1301,
                period: 20242,
                schedule: vec![ScheduleSlot::new(Weekday::Mon, 9, 11)],
                professors_ids: vec![1, 2],
                students_enrollments: vec![],
            },
        )
    }

    #[test]
    fn test_same_offering_ignores_professor_order() {
        let c = class();
        assert!(c.is_same_offering(1301, 20242, &[2, 1]));
        assert!(!c.is_same_offering(1301, 20242, &[1]));
        assert!(!c.is_same_offering(1301, 20241, &[1, 2]));
        assert!(!c.is_same_offering(1302, 20242, &[1, 2]));
    }

    #[test]
    fn test_apply_keeps_reviews() {
        let mut c = class();
        c.reviews_ids.push(7);
        c.apply(ClassPatch {
            period: Some(20251),
            ..Default::default()
        });
        assert_eq!(c.period, 20251);
        assert_eq!(c.reviews_ids, vec![7]);
    }
}
