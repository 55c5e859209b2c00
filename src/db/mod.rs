// src/db/mod.rs
//
// Storage module
//
// Provides:
// - The in-memory store holding every collection
// - Full-snapshot JSON load/save
// - Database file location

pub mod path;
pub mod store;

pub use path::{default_database_path, ensure_parent_dir};
pub use store::{Record, Sequence, Store, Tables};
