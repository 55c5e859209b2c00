use serde::{Deserialize, Serialize};

use crate::domain::{Department, ProfessorId, ReviewId, SubjectCode};

/// A professor. Not a login principal; created by administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    /// Sequential identifier assigned by the store
    pub id: ProfessorId,

    pub name: String,

    pub department: Department,

    /// Codes of the subjects this professor teaches
    #[serde(default)]
    pub subjects: Vec<SubjectCode>,

    /// Reviews received through the classes this professor teaches
    #[serde(default)]
    pub reviews: Vec<ReviewId>,
}

/// Data supplied by an administrator to register a professor
#[derive(Debug, Clone)]
pub struct NewProfessor {
    pub name: String,
    pub department: Department,
}

/// Partial update for a Professor. Id and association lists are not patchable.
#[derive(Debug, Clone, Default)]
pub struct ProfessorPatch {
    pub name: Option<String>,
    pub department: Option<Department>,
}

impl NewProfessor {
    pub fn new(name: impl Into<String>, department: Department) -> Self {
        Self {
            name: name.into(),
            department,
        }
    }
}

impl Professor {
    /// Build the stored record; both association lists start empty
    pub fn new(id: ProfessorId, data: NewProfessor) -> Self {
        Self {
            id,
            name: data.name,
            department: data.department,
            subjects: Vec::new(),
            reviews: Vec::new(),
        }
    }

    pub fn apply(&mut self, patch: ProfessorPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
    }
}
