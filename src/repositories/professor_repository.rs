// src/repositories/professor_repository.rs
//
// Professor persistence, subject-teaching and received-review associations,
// and the average-rating aggregation.

use log::{debug, warn};

use super::merge_validate_apply;
use crate::db::{Sequence, Store};
use crate::domain::shared::{push_unique, remove_value, replace_value, validate_positive_key};
use crate::domain::{
    validate_professor, DomainError, NewProfessor, Professor, ProfessorId, ProfessorPatch,
    Review, ReviewId, Subject, SubjectCode,
};
use crate::error::{AppError, AppResult};

/// Returned by `calculate_review_average` when the professor does not exist
pub const MISSING_PROFESSOR_AVERAGE: f64 = -1.0;

pub struct ProfessorRepository<'a> {
    store: &'a mut Store,
}

impl<'a> ProfessorRepository<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    pub fn validate(&self, professor: &Professor) -> AppResult<()> {
        validate_professor(professor).map_err(AppError::Domain)
    }

    /// Register a professor under the next sequential id
    pub fn create(&mut self, data: NewProfessor) -> AppResult<ProfessorId> {
        let candidate = Professor::new(self.store.peek_id(Sequence::Professor)?, data);
        validate_professor(&candidate).inspect_err(|e| warn!("Professor rejected: {}", e))?;

        let id = self.store.next_id(Sequence::Professor)?;
        let professor = Professor { id, ..candidate };
        debug!("Creating professor {} ({})", id, professor.name);
        self.store.insert(professor);
        Ok(id)
    }

    pub fn retrieve(&self, id: ProfessorId) -> Option<&Professor> {
        self.store.find(id)
    }

    pub fn retrieve_all(&self) -> &[Professor] {
        self.store.all()
    }

    pub fn update(&mut self, id: ProfessorId, patch: ProfessorPatch) -> AppResult<()> {
        merge_validate_apply::<Professor, _, _>(
            self.store,
            id,
            |p| p.apply(patch),
            |_, p| validate_professor(p).map_err(AppError::Domain),
        )
        .inspect_err(|e| warn!("Professor {} update rejected: {}", id, e))
    }

    /// Remove the record only. Classes, subjects and reviews that point at
    /// this professor are left as they are.
    pub fn delete(&mut self, id: ProfessorId) -> AppResult<()> {
        validate_positive_key("professor id", id)?;
        self.store
            .remove::<Professor>(id)
            .ok_or_else(|| DomainError::not_found("professor", id))?;
        debug!("Deleted professor {}", id);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Subject associations
    // ------------------------------------------------------------------------

    pub fn create_professor_subject(&mut self, id: ProfessorId, code: SubjectCode) -> AppResult<()> {
        validate_positive_key("subject code", code)?;
        if !self.store.contains::<Subject>(code) {
            return Err(DomainError::missing("subject", code).into());
        }
        let professor = self.find_mut(id)?;
        if !push_unique(&mut professor.subjects, code) {
            return Err(DomainError::Duplicate(format!(
                "professor {} already teaches subject {}",
                id, code
            ))
            .into());
        }
        Ok(())
    }

    pub fn professor_teaches_subject(&self, id: ProfessorId, code: SubjectCode) -> bool {
        code > 0
            && self
                .retrieve(id)
                .is_some_and(|p| p.subjects.contains(&code))
    }

    pub fn retrieve_professor_subjects(&self, id: ProfessorId) -> Option<&[SubjectCode]> {
        self.retrieve(id).map(|p| p.subjects.as_slice())
    }

    /// Rename `old` to `new` in every professor's subject list.
    /// Fails when no professor had `old`.
    pub fn update_professor_subjects(&mut self, old: SubjectCode, new: SubjectCode) -> AppResult<()> {
        validate_positive_key("old subject code", old)?;
        validate_positive_key("new subject code", new)?;
        if !self.store.contains::<Subject>(new) {
            return Err(DomainError::missing("subject", new).into());
        }

        let mut renamed = 0;
        for professor in self.store.all_mut::<Professor>() {
            if replace_value(&mut professor.subjects, old, new) {
                renamed += 1;
            }
        }
        if renamed == 0 {
            return Err(DomainError::NotFound {
                entity: "professor subject",
                key: old,
            }
            .into());
        }
        debug!("Renamed subject {} to {} for {} professors", old, new, renamed);
        Ok(())
    }

    pub fn delete_professor_subject(&mut self, id: ProfessorId, code: SubjectCode) -> AppResult<()> {
        validate_positive_key("subject code", code)?;
        let professor = self.find_mut(id)?;
        if !remove_value(&mut professor.subjects, code) {
            return Err(DomainError::NotFound {
                entity: "professor subject",
                key: code,
            }
            .into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Received-review associations
    // ------------------------------------------------------------------------

    pub fn create_professor_review(&mut self, id: ProfessorId, review_id: ReviewId) -> AppResult<()> {
        validate_positive_key("review id", review_id)?;
        if !self.store.contains::<Review>(review_id) {
            return Err(DomainError::missing("review", review_id).into());
        }
        let professor = self.find_mut(id)?;
        if !push_unique(&mut professor.reviews, review_id) {
            return Err(DomainError::Duplicate(format!(
                "review {} already associated with professor {}",
                review_id, id
            ))
            .into());
        }
        Ok(())
    }

    pub fn retrieve_professor_reviews(&self, id: ProfessorId) -> Option<&[ReviewId]> {
        self.retrieve(id).map(|p| p.reviews.as_slice())
    }

    pub fn retrieve_professor_review(&self, id: ProfessorId, review_id: ReviewId) -> Option<ReviewId> {
        if review_id <= 0 {
            return None;
        }
        self.retrieve(id)
            .filter(|p| p.reviews.contains(&review_id))
            .map(|_| review_id)
    }

    /// Membership guard. Review fields are changed through the review repository.
    pub fn update_professor_review(&self, id: ProfessorId, review_id: ReviewId) -> AppResult<()> {
        self.retrieve_professor_review(id, review_id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("professor review", review_id).into())
    }

    pub fn delete_professor_review(&mut self, id: ProfessorId, review_id: ReviewId) -> AppResult<()> {
        validate_positive_key("review id", review_id)?;
        let professor = self.find_mut(id)?;
        if !remove_value(&mut professor.reviews, review_id) {
            return Err(DomainError::not_found("professor review", review_id).into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Aggregation
    // ------------------------------------------------------------------------

    /// Mean star rating over the professor's reviews, to one decimal.
    ///
    /// Reviews without stars are left out of the mean entirely. Returns
    /// `0.0` when nothing is rated and `-1.0` when the professor is unknown.
    pub fn calculate_review_average(&self, id: ProfessorId) -> f64 {
        let Some(professor) = self.retrieve(id) else {
            return MISSING_PROFESSOR_AVERAGE;
        };

        let (sum, count) = professor
            .reviews
            .iter()
            .filter_map(|rid| self.store.find::<Review>(*rid))
            .filter_map(|review| review.stars)
            .fold((0_i64, 0_i64), |(sum, count), stars| (sum + stars, count + 1));

        if count == 0 {
            return 0.0;
        }
        round_tenths_half_even(sum, count)
    }

    /// Average of every professor, in storage order
    pub fn review_averages(&self) -> Vec<(ProfessorId, f64)> {
        self.retrieve_all()
            .iter()
            .map(|p| (p.id, self.calculate_review_average(p.id)))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Cascade helpers
    // ------------------------------------------------------------------------

    pub(crate) fn remove_subject_from_all(&mut self, code: SubjectCode) {
        for professor in self.store.all_mut::<Professor>() {
            remove_value(&mut professor.subjects, code);
        }
    }

    pub(crate) fn remove_review_from_all(&mut self, review_id: ReviewId) {
        for professor in self.store.all_mut::<Professor>() {
            remove_value(&mut professor.reviews, review_id);
        }
    }

    fn find_mut(&mut self, id: ProfessorId) -> AppResult<&mut Professor> {
        self.store
            .find_mut::<Professor>(id)
            .ok_or_else(|| DomainError::not_found("professor", id).into())
    }
}

/// `sum / count` rounded to one decimal, ties to the even tenth.
/// Done in integers so that 4.25 rounds to 4.2 regardless of float representation.
fn round_tenths_half_even(sum: i64, count: i64) -> f64 {
    let scaled = sum * 10;
    let mut tenths = scaled.div_euclid(count);
    let twice_remainder = 2 * scaled.rem_euclid(count);

    if twice_remainder > count || (twice_remainder == count && tenths % 2 != 0) {
        tenths += 1;
    }
    tenths as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Class, Department, Enrollment, NewClass, NewReview, ReviewCategory, ScheduleSlot, Weekday,
    };

    fn general_review(id: ReviewId, author: Enrollment) -> Review {
        Review::new(
            id,
            NewReview {
                student_enrollment: author,
                title: "Bandejão".to_string(),
                comment: "Fila enorme".to_string(),
                category: ReviewCategory::Canteen,
                is_anonymous: false,
                stars: Some(3),
                class_target_code: None,
                mentions: String::new(),
            },
            "2024-05-02T10:00:00.000000".to_string(),
        )
    }

    fn store_with_professor() -> (Store, ProfessorId) {
        let mut store = Store::in_memory();
        let id = ProfessorRepository::new(&mut store)
            .create(NewProfessor::new("Ana Lima", Department::Inf))
            .unwrap();
        (store, id)
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let (mut store, first) = store_with_professor();
        let mut repo = ProfessorRepository::new(&mut store);
        let second = repo.create(NewProfessor::new("Bruno", Department::Math)).unwrap();

        assert_eq!((first, second), (1, 2));
        assert_eq!(repo.retrieve(2).unwrap().department, Department::Math);
    }

    #[test]
    fn test_invalid_create_does_not_consume_id() {
        let mut store = Store::in_memory();
        let mut repo = ProfessorRepository::new(&mut store);

        assert!(repo.create(NewProfessor::new("  ", Department::Inf)).is_err());
        assert_eq!(repo.create(NewProfessor::new("Ok", Department::Inf)).unwrap(), 1);
    }

    #[test]
    fn test_update_keeps_id_and_rejects_invalid_merge() {
        let (mut store, id) = store_with_professor();
        let mut repo = ProfessorRepository::new(&mut store);

        repo.update(
            id,
            ProfessorPatch {
                department: Some(Department::Ele),
                ..Default::default()
            },
        )
        .unwrap();
        let bad = repo.update(
            id,
            ProfessorPatch {
                name: Some(String::new()),
                ..Default::default()
            },
        );

        assert!(bad.is_err());
        let prof = repo.retrieve(id).unwrap();
        assert_eq!((prof.id, prof.name.as_str(), prof.department), (id, "Ana Lima", Department::Ele));
    }

    #[test]
    fn test_subject_association_rejects_repeat() {
        let (mut store, id) = store_with_professor();
        store.insert(Subject::new(1301, 4, "Modular"));
        let mut repo = ProfessorRepository::new(&mut store);

        repo.create_professor_subject(id, 1301).unwrap();
        assert!(repo.create_professor_subject(id, 1301).is_err());
        assert!(repo.create_professor_subject(id, 9999).is_err());
        assert_eq!(repo.retrieve_professor_subjects(id), Some(&[1301][..]));
        assert!(repo.professor_teaches_subject(id, 1301));
    }

    #[test]
    fn test_rename_subject_requires_a_holder() {
        let (mut store, id) = store_with_professor();
        store.insert(Subject::new(1301, 4, "Modular"));
        store.insert(Subject::new(1302, 4, "Modular II"));
        let mut repo = ProfessorRepository::new(&mut store);
        repo.create_professor_subject(id, 1301).unwrap();

        repo.update_professor_subjects(1301, 1302).unwrap();
        assert_eq!(repo.retrieve_professor_subjects(id), Some(&[1302][..]));
        assert!(repo.update_professor_subjects(1301, 1302).is_err());
    }

    #[test]
    fn test_rename_subject_to_unknown_code_is_rejected() {
        let (mut store, id) = store_with_professor();
        store.insert(Subject::new(1301, 4, "Modular"));
        let mut repo = ProfessorRepository::new(&mut store);
        repo.create_professor_subject(id, 1301).unwrap();

        let err = repo.update_professor_subjects(1301, 4040).unwrap_err();

        assert!(matches!(
            err.as_domain(),
            Some(DomainError::MissingReference { key: 4040, .. })
        ));
        assert_eq!(repo.retrieve_professor_subjects(id), Some(&[1301][..]));
    }

    #[test]
    fn test_delete_subject_association() {
        let (mut store, id) = store_with_professor();
        store.insert(Subject::new(1301, 4, "Modular"));
        let mut repo = ProfessorRepository::new(&mut store);
        repo.create_professor_subject(id, 1301).unwrap();

        repo.delete_professor_subject(id, 1301).unwrap();

        assert!(!repo.professor_teaches_subject(id, 1301));
        assert_eq!(repo.retrieve_professor_subjects(id), Some(&[][..]));
        assert!(repo.delete_professor_subject(id, 1301).unwrap_err().is_not_found());
        assert!(repo.delete_professor_subject(42, 1301).is_err());
    }

    #[test]
    fn test_review_association_lifecycle() {
        let (mut store, id) = store_with_professor();
        store.insert(general_review(7, 100));
        let mut repo = ProfessorRepository::new(&mut store);
        repo.create_professor_review(id, 7).unwrap();

        assert_eq!(repo.retrieve_professor_review(id, 7), Some(7));
        assert_eq!(repo.retrieve_professor_review(id, 8), None);
        assert!(repo.update_professor_review(id, 7).is_ok());

        repo.delete_professor_review(id, 7).unwrap();
        assert_eq!(repo.retrieve_professor_reviews(id), Some(&[][..]));
        assert_eq!(repo.retrieve_professor_review(id, 7), None);
        assert!(repo.update_professor_review(id, 7).is_err());
        assert!(repo.delete_professor_review(id, 7).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_keeps_class_backreference() {
        let (mut store, id) = store_with_professor();
        store.insert(Class::new(
            1,
            NewClass {
                subject_code: 1301,
                period: 20242,
                schedule: vec![ScheduleSlot::new(Weekday::Mon, 9, 11)],
                professors_ids: vec![id],
                students_enrollments: Vec::new(),
            },
        ));
        let mut repo = ProfessorRepository::new(&mut store);

        repo.delete(id).unwrap();
        assert!(repo.retrieve(id).is_none());
        assert!(repo.delete(id).unwrap_err().is_not_found());
        assert!(repo.delete(0).is_err());

        drop(repo);
        assert_eq!(store.find::<Class>(1).unwrap().professors_ids, vec![id]);
    }

    #[test]
    fn test_create_fails_when_ids_run_out() {
        let mut store = Store::in_memory();
        store.insert(Professor::new(i64::MAX, NewProfessor::new("Last", Department::Inf)));
        let mut repo = ProfessorRepository::new(&mut store);

        assert!(repo.create(NewProfessor::new("Next", Department::Inf)).is_err());
        assert_eq!(repo.retrieve_all().len(), 1);
    }

    #[test]
    fn test_half_even_rounding() {
        assert_eq!(round_tenths_half_even(17, 4), 4.2);
        assert_eq!(round_tenths_half_even(7, 2), 3.5);
        assert_eq!(round_tenths_half_even(35, 8), 4.4);
        assert_eq!(round_tenths_half_even(13, 3), 4.3);
        assert_eq!(round_tenths_half_even(5, 1), 5.0);
    }

    #[test]
    fn test_average_sentinels() {
        let (mut store, id) = store_with_professor();
        let repo = ProfessorRepository::new(&mut store);

        assert_eq!(repo.calculate_review_average(id), 0.0);
        assert_eq!(repo.calculate_review_average(42), MISSING_PROFESSOR_AVERAGE);
        assert_eq!(repo.review_averages(), vec![(id, 0.0)]);
    }
}
