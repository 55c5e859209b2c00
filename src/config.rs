// src/config.rs
//
// Runtime configuration: where the snapshot lives and which e-mail domain
// counts as institutional.

use std::env;
use std::path::PathBuf;

use crate::db::default_database_path;

pub const DB_PATH_ENV: &str = "CAMPUS_REVIEWS_DB";
pub const EMAIL_DOMAIN_ENV: &str = "CAMPUS_REVIEWS_EMAIL_DOMAIN";
pub const DEFAULT_INSTITUTIONAL_DOMAIN: &str = "puc-rio.br";

/// Used when the platform has no data directory
const FALLBACK_DB_FILE: &str = "campus-reviews-db.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub institutional_domain: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path()
                .unwrap_or_else(|_| PathBuf::from(FALLBACK_DB_FILE)),
            institutional_domain: DEFAULT_INSTITUTIONAL_DOMAIN.to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `CAMPUS_REVIEWS_DB` and `CAMPUS_REVIEWS_EMAIL_DOMAIN`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(domain) = lookup(EMAIL_DOMAIN_ENV).filter(|v| !v.trim().is_empty()) {
            config.institutional_domain = domain.trim().trim_start_matches('@').to_string();
        }
        config
    }

    /// An explicit path (e.g. from the command line) wins over everything else
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database_path = path;
        }
        self
    }
}
