// src/repositories/cascade_tests.rs
//
// CROSS-REPOSITORY TESTS: fan-out and cascading deletes
//
// PURPOSE:
// - Prove that review creation links author, class and every teaching professor
// - Prove that deletes leave no dangling review, subject or roster reference
// - Prove that a failing step inside a cascade leaves the graph untouched
//
// INVARIANTS TESTED:
// - Backreference lists stay duplicate-free
// - Subject delete removes its classes and strips the code everywhere
// - Student delete removes authored reviews from classes and professors
// - Professor delete leaves backreferences in place

#[cfg(test)]
mod cascade_scenarios {
    use crate::db::Store;
    use crate::domain::{
        Class, ClassCode, ClassPatch, Course, Department, Enrollment, NewClass, NewProfessor, NewReview,
        NewStudent, Professor, ProfessorId, Review, ReviewCategory, ReviewId, ScheduleSlot,
        Student, Subject, Weekday,
    };
    use crate::error::AppError;
    use crate::repositories::review_repository::MockClock;
    use crate::repositories::{
        ClassRepository, ProfessorRepository, ReviewRepository, StudentRepository,
        SubjectRepository,
    };

    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(|| "2024-10-01T08:00:00".to_string());
        clock
    }

    fn add_student(store: &mut Store, enrollment: Enrollment) {
        StudentRepository::new(store)
            .create(NewStudent {
                enrollment,
                username: format!("user{}", enrollment),
                password: "pw".to_string(),
                name: format!("Student {}", enrollment),
                institutional_email: format!("user{}@puc-rio.br", enrollment),
                course: Course::EngComp,
            })
            .unwrap();
    }

    fn add_professor(store: &mut Store, name: &str) -> ProfessorId {
        ProfessorRepository::new(store)
            .create(NewProfessor::new(name, Department::Inf))
            .unwrap()
    }

    fn add_class(store: &mut Store, subject_code: i64, professors: Vec<ProfessorId>) -> ClassCode {
        ClassRepository::new(store)
            .create(NewClass {
                subject_code,
                period: 20242,
                schedule: vec![ScheduleSlot::new(Weekday::Mon, 9, 11)],
                professors_ids: professors,
                students_enrollments: Vec::new(),
            })
            .unwrap()
    }

    fn add_review(
        store: &mut Store,
        author: Enrollment,
        class: Option<ClassCode>,
        stars: Option<i64>,
    ) -> ReviewId {
        let category = if class.is_some() {
            ReviewCategory::ProfGood
        } else {
            ReviewCategory::GeneralTopics
        };
        ReviewRepository::with_clock(store, clock())
            .create(NewReview {
                student_enrollment: author,
                title: "Review".to_string(),
                comment: "Comment".to_string(),
                category,
                is_anonymous: false,
                stars,
                class_target_code: class,
                mentions: String::new(),
            })
            .unwrap()
    }

    fn professor(store: &Store, id: ProfessorId) -> &Professor {
        store.find::<Professor>(id).unwrap()
    }

    /// Subject, professor, class, student, review; every backreference lands
    #[test]
    fn test_end_to_end_scenario() {
        let mut store = Store::in_memory();
        SubjectRepository::new(&mut store)
            .create(Subject::new(1301, 4, "Programação Modular"))
            .unwrap();
        let prof = add_professor(&mut store, "A");
        let class = add_class(&mut store, 1301, vec![prof]);
        add_student(&mut store, 100);
        let review = add_review(&mut store, 100, Some(class), Some(5));

        assert_eq!((prof, class, review), (1, 1, 1));
        assert_eq!(store.find::<Class>(1).unwrap().reviews_ids, vec![1]);
        assert_eq!(professor(&store, 1).reviews, vec![1]);
        assert_eq!(store.find::<Student>(100).unwrap().reviews, vec![1]);
    }

    #[test]
    fn test_review_fans_out_to_every_professor() {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        let p1 = add_professor(&mut store, "P1");
        let p2 = add_professor(&mut store, "P2");
        let class = add_class(&mut store, 1301, vec![p1, p2]);
        add_student(&mut store, 100);

        let id = add_review(&mut store, 100, Some(class), Some(4));

        assert_eq!(professor(&store, p1).reviews, vec![id]);
        assert_eq!(professor(&store, p2).reviews, vec![id]);
    }

    #[test]
    fn test_general_review_touches_only_author() {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        let p1 = add_professor(&mut store, "P1");
        let class = add_class(&mut store, 1301, vec![p1]);
        add_student(&mut store, 100);

        let id = add_review(&mut store, 100, None, None);

        assert_eq!(store.find::<Student>(100).unwrap().reviews, vec![id]);
        assert!(store.find::<Class>(class).unwrap().reviews_ids.is_empty());
        assert!(professor(&store, p1).reviews.is_empty());
    }

    #[test]
    fn test_professor_average_over_class_reviews() {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        let prof = add_professor(&mut store, "P");
        let class = add_class(&mut store, 1301, vec![prof]);
        add_student(&mut store, 100);

        for stars in [Some(4), Some(5), Some(3), Some(5), None] {
            add_review(&mut store, 100, Some(class), stars);
        }

        let repo = ProfessorRepository::new(&mut store);
        assert_eq!(repo.calculate_review_average(prof), 4.2);
        assert_eq!(repo.calculate_review_average(prof + 1), -1.0);
    }

    #[test]
    fn test_subject_delete_cascades() {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        store.insert(Subject::new(1302, 4, "Other"));
        let p1 = add_professor(&mut store, "P1");
        let p2 = add_professor(&mut store, "P2");
        let c1 = add_class(&mut store, 1301, vec![p1]);
        add_class(&mut store, 1301, vec![p1, p2]);
        let kept = add_class(&mut store, 1302, vec![p2]);
        add_student(&mut store, 100);
        let review = add_review(&mut store, 100, Some(c1), Some(5));

        StudentRepository::new(&mut store)
            .create_student_subject(100, 1301)
            .unwrap();
        ProfessorRepository::new(&mut store)
            .create_professor_subject(p1, 1301)
            .unwrap();
        ProfessorRepository::new(&mut store)
            .create_professor_subject(p2, 1302)
            .unwrap();

        SubjectRepository::new(&mut store).delete(1301).unwrap();

        assert!(store.find::<Subject>(1301).is_none());
        let classes: Vec<ClassCode> = store.all::<Class>().iter().map(|c| c.code).collect();
        assert_eq!(classes, vec![kept]);
        assert!(store.all::<Class>().iter().all(|c| c.subject_code != 1301));
        assert!(store.find::<Student>(100).unwrap().subjects.is_empty());
        assert!(professor(&store, p1).subjects.is_empty());
        assert_eq!(professor(&store, p2).subjects, vec![1302]);

        // reviews of a deleted class go with it
        assert!(store.find::<Review>(review).is_none());
        assert!(professor(&store, p1).reviews.is_empty());
        assert!(store.find::<Student>(100).unwrap().reviews.is_empty());
    }

    #[test]
    fn test_student_delete_cascades_through_reviews() {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        let p1 = add_professor(&mut store, "P1");
        let p2 = add_professor(&mut store, "P2");
        let class = add_class(&mut store, 1301, vec![p1, p2]);
        add_student(&mut store, 100);
        add_student(&mut store, 200);
        ClassRepository::new(&mut store)
            .update(
                class,
                ClassPatch {
                    students_enrollments: Some(vec![100, 200]),
                    ..Default::default()
                },
            )
            .unwrap();

        let r1 = add_review(&mut store, 100, Some(class), Some(1));
        add_review(&mut store, 100, None, None);
        let other = add_review(&mut store, 200, Some(class), Some(5));

        StudentRepository::new(&mut store).delete(100).unwrap();

        assert!(store.find::<Student>(100).is_none());
        assert!(store.find::<Review>(r1).is_none());
        assert_eq!(store.all::<Review>().len(), 1);

        let class = store.find::<Class>(class).unwrap();
        assert_eq!(class.reviews_ids, vec![other]);
        assert_eq!(class.students_enrollments, vec![200]);
        assert_eq!(professor(&store, p1).reviews, vec![other]);
        assert_eq!(professor(&store, p2).reviews, vec![other]);
    }

    #[test]
    fn test_class_delete_removes_its_reviews() {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        let p1 = add_professor(&mut store, "P1");
        let class = add_class(&mut store, 1301, vec![p1]);
        add_student(&mut store, 100);
        let targeted = add_review(&mut store, 100, Some(class), Some(3));
        let general = add_review(&mut store, 100, None, Some(4));

        ClassRepository::new(&mut store).delete(class).unwrap();

        assert!(store.find::<Review>(targeted).is_none());
        assert!(store.find::<Review>(general).is_some());
        assert_eq!(store.find::<Student>(100).unwrap().reviews, vec![general]);
        assert!(professor(&store, p1).reviews.is_empty());
    }

    #[test]
    fn test_professor_delete_leaves_backreferences() {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        let p1 = add_professor(&mut store, "P1");
        let class = add_class(&mut store, 1301, vec![p1]);
        add_student(&mut store, 100);

        ProfessorRepository::new(&mut store).delete(p1).unwrap();

        assert_eq!(store.find::<Class>(class).unwrap().professors_ids, vec![p1]);

        // a review on the orphaned class still links author and class
        let id = add_review(&mut store, 100, Some(class), Some(2));
        assert_eq!(store.find::<Class>(class).unwrap().reviews_ids, vec![id]);

        // the professor sequence is never reused
        assert_eq!(add_professor(&mut store, "P2"), p1 + 1);
    }

    #[test]
    fn test_failed_cascade_step_rolls_back() {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        let p1 = add_professor(&mut store, "P1");
        let class = add_class(&mut store, 1301, vec![p1]);
        add_student(&mut store, 100);
        add_review(&mut store, 100, Some(class), Some(3));
        let before = store.tables().clone();

        let result = store.transaction("test cascade", |s| {
            ReviewRepository::new(&mut *s).delete(1)?;
            SubjectRepository::new(&mut *s).delete(9999)
        });

        assert!(matches!(result, Err(AppError::Domain(_))));
        assert_eq!(store.tables(), &before);
    }

    #[test]
    fn test_repeated_association_is_rejected() {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        let p1 = add_professor(&mut store, "P1");
        let class = add_class(&mut store, 1301, vec![p1]);
        add_student(&mut store, 100);
        let id = add_review(&mut store, 100, Some(class), Some(3));

        assert!(ProfessorRepository::new(&mut store)
            .create_professor_review(p1, id)
            .is_err());
        assert!(StudentRepository::new(&mut store)
            .create_student_review(100, id)
            .is_err());
        assert_eq!(professor(&store, p1).reviews, vec![id]);
        assert_eq!(store.find::<Student>(100).unwrap().reviews, vec![id]);
    }
}
