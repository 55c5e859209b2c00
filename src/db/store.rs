// src/db/store.rs
//
// In-memory relational store
//
// CRITICAL RULES:
// - Holds the five collections and nothing else; no business rules here
// - Generic lookup by primary key so repositories never import each other for reads
// - Generated keys come from explicit monotonic sequences
// - Persistence is an explicit full-snapshot dump triggered by the caller

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::path::ensure_parent_dir;
use crate::domain::{Class, Professor, Review, Student, Subject};
use crate::error::{AppError, AppResult};

/// The durable document: one array per entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub professors: Vec<Professor>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Keys generated by the store rather than supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Professor,
    Class,
    Review,
}

impl Sequence {
    fn name(self) -> &'static str {
        match self {
            Sequence::Professor => "professor",
            Sequence::Class => "class",
            Sequence::Review => "review",
        }
    }
}

/// Next value of each sequence; `None` once the key space is used up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sequences {
    professor: Option<i64>,
    class: Option<i64>,
    review: Option<i64>,
}

impl Sequences {
    fn seeded(tables: &Tables) -> Self {
        fn next_after<T: Record>(records: &[T]) -> Option<i64> {
            records.iter().map(Record::key).max().unwrap_or(0).max(0).checked_add(1)
        }
        Self {
            professor: next_after(&tables.professors),
            class: next_after(&tables.classes),
            review: next_after(&tables.reviews),
        }
    }

    fn slot(&mut self, sequence: Sequence) -> &mut Option<i64> {
        match sequence {
            Sequence::Professor => &mut self.professor,
            Sequence::Class => &mut self.class,
            Sequence::Review => &mut self.review,
        }
    }
}

/// A record stored in one of the five collections
pub trait Record: Clone {
    /// Entity name used in logs and errors
    const ENTITY: &'static str;

    /// Sequence feeding this record's key, if the store generates it
    const SEQUENCE: Option<Sequence>;

    fn key(&self) -> i64;
    fn table(tables: &Tables) -> &Vec<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self>;
}

impl Record for Student {
    const ENTITY: &'static str = "student";
    const SEQUENCE: Option<Sequence> = None;

    fn key(&self) -> i64 {
        self.enrollment
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.students
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.students
    }
}

impl Record for Professor {
    const ENTITY: &'static str = "professor";
    const SEQUENCE: Option<Sequence> = Some(Sequence::Professor);

    fn key(&self) -> i64 {
        self.id
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.professors
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.professors
    }
}

impl Record for Subject {
    const ENTITY: &'static str = "subject";
    const SEQUENCE: Option<Sequence> = None;

    fn key(&self) -> i64 {
        self.code
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.subjects
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.subjects
    }
}

impl Record for Class {
    const ENTITY: &'static str = "class";
    const SEQUENCE: Option<Sequence> = Some(Sequence::Class);

    fn key(&self) -> i64 {
        self.code
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.classes
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.classes
    }
}

impl Record for Review {
    const ENTITY: &'static str = "review";
    const SEQUENCE: Option<Sequence> = Some(Sequence::Review);

    fn key(&self) -> i64 {
        self.id_aval
    }
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.reviews
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.reviews
    }
}

/// The five collections plus key sequences and the optional backing file.
///
/// Every repository borrows the store mutably for the duration of one
/// operation; there is no process-wide state.
#[derive(Debug)]
pub struct Store {
    tables: Tables,
    sequences: Sequences,
    path: Option<PathBuf>,
}

impl Default for Store {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Store {
    /// Empty store with no backing file
    pub fn in_memory() -> Self {
        Self::from_tables(Tables::default())
    }

    /// Store over existing collections, sequences seeded from the highest keys
    pub fn from_tables(tables: Tables) -> Self {
        let sequences = Sequences::seeded(&tables);
        Self {
            tables,
            sequences,
            path: None,
        }
    }

    /// Load the snapshot at `path`.
    ///
    /// A missing file is created holding an empty schema; an empty file
    /// loads as an empty schema. Neither is an error.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        if !path.exists() {
            info!(
                "Database file {} not found, starting with an empty database",
                path.display()
            );
            let mut store = Self::in_memory();
            store.path = Some(path);
            store.persist()?;
            return Ok(store);
        }

        let content = fs::read_to_string(&path)?;
        let tables = if content.trim().is_empty() {
            warn!(
                "Database file {} is empty, initializing empty structure",
                path.display()
            );
            Tables::default()
        } else {
            serde_json::from_str(&content)?
        };

        let mut store = Self::from_tables(tables);
        store.path = Some(path);
        info!(
            "Loaded {} students, {} professors, {} subjects, {} classes, {} reviews",
            store.tables.students.len(),
            store.tables.professors.len(),
            store.tables.subjects.len(),
            store.tables.classes.len(),
            store.tables.reviews.len()
        );
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the whole store back to the file it was opened from
    pub fn persist(&self) -> AppResult<()> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| AppError::Other("Store has no backing file".to_string()))?;
        self.persist_to(path)
    }

    /// Write the whole store to `path`.
    /// The snapshot goes to a sibling temporary file first and is then renamed over the target.
    pub fn persist_to(&self, path: &Path) -> AppResult<()> {
        ensure_parent_dir(path)?;

        let json = serde_json::to_string_pretty(&self.tables)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, path)?;

        info!("Database saved to {}", path.display());
        Ok(())
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Find a record by primary key. Non-positive keys never match.
    pub fn find<T: Record>(&self, key: i64) -> Option<&T> {
        if key <= 0 {
            return None;
        }
        T::table(&self.tables).iter().find(|r| r.key() == key)
    }

    pub fn find_mut<T: Record>(&mut self, key: i64) -> Option<&mut T> {
        if key <= 0 {
            return None;
        }
        T::table_mut(&mut self.tables)
            .iter_mut()
            .find(|r| r.key() == key)
    }

    pub fn contains<T: Record>(&self, key: i64) -> bool {
        self.find::<T>(key).is_some()
    }

    pub fn all<T: Record>(&self) -> &[T] {
        T::table(&self.tables)
    }

    pub(crate) fn all_mut<T: Record>(&mut self) -> &mut Vec<T> {
        T::table_mut(&mut self.tables)
    }

    /// Append a record. Callers check key uniqueness first.
    pub(crate) fn insert<T: Record>(&mut self, record: T) {
        if let Some(sequence) = T::SEQUENCE {
            let slot = self.sequences.slot(sequence);
            if matches!(*slot, Some(next) if record.key() >= next) {
                *slot = record.key().checked_add(1);
            }
        }
        debug!("Inserted {} {}", T::ENTITY, record.key());
        T::table_mut(&mut self.tables).push(record);
    }

    pub(crate) fn remove<T: Record>(&mut self, key: i64) -> Option<T> {
        let table = T::table_mut(&mut self.tables);
        let index = table.iter().position(|r| r.key() == key)?;
        debug!("Removed {} {}", T::ENTITY, key);
        Some(table.remove(index))
    }

    /// The key the next `next_id` call will hand out
    pub(crate) fn peek_id(&self, sequence: Sequence) -> AppResult<i64> {
        let mut sequences = self.sequences;
        let next = *sequences.slot(sequence);
        next.ok_or_else(|| {
            AppError::Other(format!("No {} keys left to generate", sequence.name()))
        })
    }

    pub(crate) fn next_id(&mut self, sequence: Sequence) -> AppResult<i64> {
        let id = self.peek_id(sequence)?;
        *self.sequences.slot(sequence) = id.checked_add(1);
        Ok(id)
    }

    /// Run a multi-step mutation as one unit.
    ///
    /// If `operation` fails, the collections and sequences are restored to
    /// their state before the call and the error is returned.
    pub fn transaction<T, F>(&mut self, label: &str, operation: F) -> AppResult<T>
    where
        F: FnOnce(&mut Store) -> AppResult<T>,
    {
        let tables = self.tables.clone();
        let sequences = self.sequences;

        match operation(self) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("{} rolled back: {}", label, e);
                self.tables = tables;
                self.sequences = sequences;
                Err(e)
            }
        }
    }
}
