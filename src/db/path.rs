// src/db/path.rs
//
// Database file location
//
// PRINCIPLES:
// - Explicit paths, no hidden file creation
// - Clear error propagation

use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "campus-reviews";
const DB_FILE: &str = "db.json";

/// Default location of the snapshot.
///
/// Path structure: {APP_DATA}/campus-reviews/db.json
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join(APP_DIR).join(DB_FILE))
}

/// Create the directory that will hold `path`, if any
pub fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
