//! # Storage Layer
//!
//! Persistence for the list collection and configuration.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Lists and tasks | JSON array | `.todo/lists.json` |
//! | Config | TOML | `.todo/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`CollectionStore`] uses file locking (`fs2`) for concurrent access
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a project directory
//! - [`CollectionStore`] - Read/write the serialized collection
//! - [`Config`] - Project and global configuration

mod json;
mod config;
mod project;

pub use json::CollectionStore;
pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, ServerConfig, DEFAULT_PORT};
pub use project::{Project, ProjectError};
