use serde::{Deserialize, Serialize};

use crate::domain::SubjectCode;

/// A subject (course unit) offered by the university
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Primary key, chosen by the administrator
    pub code: SubjectCode,

    pub credits: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,
}

/// Partial update for a Subject. The code is never patchable.
#[derive(Debug, Clone, Default)]
pub struct SubjectPatch {
    pub credits: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Subject {
    pub fn new(code: SubjectCode, credits: i64, name: impl Into<String>) -> Self {
        Self {
            code,
            credits,
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn apply(&mut self, patch: SubjectPatch) {
        if let Some(credits) = patch.credits {
            self.credits = credits;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}
