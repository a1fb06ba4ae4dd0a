//! Sequential IDs for lists and tasks
//!
//! ID Format:
//! - List IDs: `tl-{n}` (e.g., `tl-2`)
//! - Task IDs: `task-{n}` (e.g., `task-5`), unique only within their list
//!
//! `n` is one-based. How `n` is chosen for a new entity is decided by
//! [`IdScheme`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid list ID format: expected 'tl-{{n}}', got '{0}'")]
    InvalidListId(String),

    #[error("Invalid task ID format: expected 'task-{{n}}', got '{0}'")]
    InvalidTaskId(String),
}

/// Strategy for numbering newly created lists and tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    /// `len + 1` of the containing sequence at creation time.
    ///
    /// Suffixes freed by deletions are handed out again, and a new id can
    /// duplicate a surviving one (e.g. delete `tl-1` out of `[tl-1, tl-2]`,
    /// then add: the new list is `tl-2` too).
    #[default]
    Positional,
    /// One past the largest suffix currently present.
    Monotonic,
}

impl IdScheme {
    /// Picks the next sequence number given the suffixes already in use.
    ///
    /// Returns `None` once the numbering would run past `u32::MAX`.
    pub fn next(&self, existing: impl ExactSizeIterator<Item = u32>) -> Option<u32> {
        let current = match self {
            IdScheme::Positional => u32::try_from(existing.len()).ok()?,
            IdScheme::Monotonic => existing.max().unwrap_or(0),
        };
        current.checked_add(1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdScheme::Positional => "positional",
            IdScheme::Monotonic => "monotonic",
        }
    }
}

/// Parses the numeric part after `prefix`; zero and leading zeros are rejected
fn parse_sequence(s: &str, prefix: &str) -> Option<u32> {
    let digits = s.strip_prefix(prefix)?;
    if digits.starts_with('0') || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// List ID in the format `tl-{n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListId(u32);

impl ListId {
    pub fn new(sequence: u32) -> Self {
        Self(sequence)
    }

    /// Returns the numeric suffix
    pub fn sequence(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tl-{}", self.0)
    }
}

impl FromStr for ListId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sequence(s, "tl-")
            .map(Self)
            .ok_or_else(|| IdError::InvalidListId(s.to_string()))
    }
}

impl TryFrom<String> for ListId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ListId> for String {
    fn from(id: ListId) -> Self {
        id.to_string()
    }
}

/// Task ID in the format `task-{n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(u32);

impl TaskId {
    pub fn new(sequence: u32) -> Self {
        Self(sequence)
    }

    /// Returns the numeric suffix
    pub fn sequence(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sequence(s, "task-")
            .map(Self)
            .ok_or_else(|| IdError::InvalidTaskId(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}
