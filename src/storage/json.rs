//! JSON storage for the list collection
//!
//! The collection is stored in `.todo/lists.json` in its serialized form.
//! Access is serialized through an advisory lock on `.todo/lists.lock`:
//! readers take it shared, writers and read-modify-write updates take it
//! exclusive.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{IdScheme, ToDoListCollection};

/// Store for the list collection
#[derive(Debug, Clone)]
pub struct CollectionStore {
    path: PathBuf,
    id_scheme: IdScheme,
}

impl CollectionStore {
    /// Creates a new store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            id_scheme: IdScheme::default(),
        }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".todo").join("lists.json"))
    }

    /// Sets the ID scheme applied to collections read from this store
    pub fn with_id_scheme(mut self, scheme: IdScheme) -> Self {
        self.id_scheme = scheme;
        self
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of the lock file guarding the store
    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    /// Opens the lock file, creating it and its directory when missing
    fn open_lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let lock_path = self.lock_path();
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))
    }

    fn lock_exclusive(&self) -> Result<File> {
        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .context("Failed to acquire write lock on list store")?;
        Ok(lock)
    }

    /// Reads the collection; a missing or blank file is an empty collection
    pub fn read(&self) -> Result<ToDoListCollection> {
        if !self.path.exists() {
            return Ok(ToDoListCollection::new().with_id_scheme(self.id_scheme));
        }

        let lock = self.open_lock()?;
        lock.lock_shared()
            .context("Failed to acquire read lock on list store")?;

        // Lock is released when `lock` is dropped
        self.load()
    }

    /// Writes the collection (full rewrite)
    pub fn write(&self, collection: &ToDoListCollection) -> Result<()> {
        let _lock = self.lock_exclusive()?;
        self.save(collection)
    }

    /// Reads the collection, applies `f`, and writes it back if `f` succeeds
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut ToDoListCollection) -> Result<T>,
    {
        self.try_update(f)
    }

    /// Like [`Self::update`], for callers with their own error type.
    ///
    /// The exclusive lock is held from the read until the write has been
    /// renamed into place, so concurrent updates never overwrite each other.
    pub fn try_update<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut ToDoListCollection) -> std::result::Result<T, E>,
        E: From<anyhow::Error>,
    {
        let _lock = self.lock_exclusive()?;
        let mut collection = self.load()?;
        let value = f(&mut collection)?;
        self.save(&collection)?;
        Ok(value)
    }

    /// Reads the store file; the caller holds the lock
    fn load(&self) -> Result<ToDoListCollection> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read list store: {}", self.path.display())
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(ToDoListCollection::new().with_id_scheme(self.id_scheme));
        }

        let collection = ToDoListCollection::from_json(&content)
            .with_context(|| format!("Failed to parse list store: {}", self.path.display()))?;
        Ok(collection.with_id_scheme(self.id_scheme))
    }

    /// Writes through a temp file and renames it into place; the caller
    /// holds the lock
    fn save(&self, collection: &ToDoListCollection) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let json = collection.to_json().context("Failed to serialize lists")?;

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.write_all(json.as_bytes())
                .context("Failed to write lists")?;
            file.flush().context("Failed to flush list store")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}
