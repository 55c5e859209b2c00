use serde::{Deserialize, Serialize};

use crate::domain::{Course, Enrollment, ReviewId, SubjectCode};

/// A registered student, the only login principal of the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Primary key (matrícula)
    pub enrollment: Enrollment,

    /// Unique across all students, enforced at registration
    pub username: String,

    pub password: String,

    pub name: String,

    pub institutional_email: String,

    pub course: Course,

    /// Subject history in the order it was recorded
    #[serde(default)]
    pub subjects: Vec<SubjectCode>,

    /// Reviews authored by this student
    #[serde(default)]
    pub reviews: Vec<ReviewId>,

    #[serde(default = "default_private")]
    pub profile_private: bool,
}

fn default_private() -> bool {
    true
}

/// The six mandatory fields supplied at registration
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub enrollment: Enrollment,
    pub username: String,
    pub password: String,
    pub name: String,
    pub institutional_email: String,
    pub course: Course,
}

/// Partial update for a Student. Enrollment and association lists are not patchable.
#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub institutional_email: Option<String>,
    pub course: Option<Course>,
    pub profile_private: Option<bool>,
}

impl Student {
    /// New students start with empty histories and a private profile
    pub fn new(data: NewStudent) -> Self {
        Self {
            enrollment: data.enrollment,
            username: data.username,
            password: data.password,
            name: data.name,
            institutional_email: data.institutional_email,
            course: data.course,
            subjects: Vec::new(),
            reviews: Vec::new(),
            profile_private: true,
        }
    }

    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.institutional_email {
            self.institutional_email = email;
        }
        if let Some(course) = patch.course {
            self.course = course;
        }
        if let Some(private) = patch.profile_private {
            self.profile_private = private;
        }
    }
}
