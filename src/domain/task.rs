//! Task domain model
//!
//! A task is a single actionable item inside a to-do list.

use serde::{Deserialize, Serialize};

use super::id::TaskId;

/// A single actionable item with a completion flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub has_done: bool,
}

impl Task {
    /// Creates a new, not yet done task
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self::with_status(id, text, false)
    }

    pub fn with_status(id: TaskId, text: impl Into<String>, has_done: bool) -> Self {
        Self {
            id,
            text: text.into(),
            has_done,
        }
    }

    /// Flips the completion flag, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.has_done = !self.has_done;
        self.has_done
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
