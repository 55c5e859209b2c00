// src/services/credentialing_service.rs
//
// Account registration and login on top of the student repository

use log::{info, warn};

use crate::config::Config;
use crate::db::Store;
use crate::domain::{validate_student, DomainError, Enrollment, NewStudent, Student};
use crate::error::{AppError, AppResult};
use crate::repositories::StudentRepository;

pub struct CredentialingService<'a> {
    store: &'a mut Store,
    institutional_domain: String,
}

impl<'a> CredentialingService<'a> {
    pub fn new(store: &'a mut Store, config: &Config) -> Self {
        Self {
            store,
            institutional_domain: config.institutional_domain.clone(),
        }
    }

    /// Create a student account.
    ///
    /// The data must validate, the e-mail must belong to the institutional
    /// domain, and the username must be free.
    pub fn register(&mut self, data: NewStudent) -> AppResult<()> {
        let result = self.try_register(data);
        match &result {
            Ok(()) => info!("Account created"),
            Err(e) => warn!("Registration failed: {}", e),
        }
        result
    }

    fn try_register(&mut self, data: NewStudent) -> AppResult<()> {
        validate_student(&Student::new(data.clone()))?;

        if !self.has_institutional_link(data.enrollment, &data.institutional_email) {
            return Err(DomainError::InvalidInput(format!(
                "enrollment {} and e-mail are not linked to @{}",
                data.enrollment, self.institutional_domain
            ))
            .into());
        }

        let mut students = StudentRepository::new(&mut *self.store);
        if students.username_taken(&data.username, None) {
            return Err(DomainError::Duplicate(format!(
                "username '{}' already taken",
                data.username
            ))
            .into());
        }
        students.create(data)
    }

    /// The stored student when `password` matches exactly
    pub fn authenticate(&self, enrollment: Enrollment, password: &str) -> AppResult<&Student> {
        match self.store.find::<Student>(enrollment) {
            Some(student) if student.password == password => {
                info!("Login succeeded for {}", student.username);
                Ok(student)
            }
            Some(_) => {
                warn!("Login failed for {}: wrong password", enrollment);
                Err(AppError::Authentication)
            }
            None => {
                warn!("Login failed: enrollment {} not registered", enrollment);
                Err(AppError::Authentication)
            }
        }
    }

    fn has_institutional_link(&self, enrollment: Enrollment, email: &str) -> bool {
        let marker = format!("@{}", self.institutional_domain.to_lowercase());
        enrollment > 0 && email.to_lowercase().contains(&marker)
    }
}
