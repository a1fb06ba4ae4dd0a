//! Project management
//!
//! Handles project initialization and provides access to the store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{CollectionStore, Config};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a todo project. Run 'todo init' first.")]
    NotInProject,
}

/// A directory holding `.todo/` with the list data and configuration
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(".todo").is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let todo_dir = root.join(".todo");

        fs::create_dir_all(&todo_dir).with_context(|| {
            format!("Failed to create .todo directory: {}", todo_dir.display())
        })?;

        // Create default config
        let config_path = todo_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# todo-lists configuration

# Numbering of new list and task IDs: "positional" (length + 1) or
# "monotonic" (one past the largest ID in use)
id_scheme = "positional"

[server]
host = "127.0.0.1"
port = 4000
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        // Create empty data file
        let store = CollectionStore::for_project(&root);
        if !store.path().exists() {
            fs::write(store.path(), "[]")
                .with_context(|| format!("Failed to write data file: {}", store.path().display()))?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .todo directory path
    pub fn todo_dir(&self) -> PathBuf {
        self.root.join(".todo")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the list store, numbering IDs per the project config
    pub fn store(&self) -> CollectionStore {
        CollectionStore::for_project(&self.root).with_id_scheme(self.config.project.id_scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IdScheme;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.todo_dir().is_dir());
        assert!(project.todo_dir().join("config.toml").is_file());
        assert_eq!(
            fs::read_to_string(project.todo_dir().join("lists.json")).unwrap(),
            "[]"
        );
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();

        let project = Project::init(dir.path()).unwrap();
        project
            .store()
            .update(|c| {
                c.add("Home Work")?;
                Ok(())
            })
            .unwrap();

        // Second init keeps existing data
        let project = Project::init(dir.path()).unwrap();
        assert_eq!(project.store().read().unwrap().len(), 1);
    }

    #[test]
    fn open_existing_project() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.root(), dir.path());
        assert_eq!(project.config().project.server.port, 4000);
    }

    #[test]
    fn open_non_project_fails() {
        let dir = TempDir::new().unwrap();
        let err = Project::open(dir.path()).err().unwrap();

        assert!(matches!(
            err.downcast_ref::<ProjectError>(),
            Some(ProjectError::NotInProject)
        ));
    }

    #[test]
    fn store_uses_configured_scheme() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();
        fs::write(
            dir.path().join(".todo/config.toml"),
            "id_scheme = \"monotonic\"\n",
        )
        .unwrap();

        let project = Project::open(dir.path()).unwrap();
        let store = project.store();
        assert!(store.path().ends_with("lists.json"));
        assert_eq!(store.read().unwrap().id_scheme(), IdScheme::Monotonic);
    }
}
