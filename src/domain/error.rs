//! Errors raised by collection operations

use thiserror::Error;

use super::id::{ListId, TaskId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("To-do list not found: {0}")]
    ListNotFound(ListId),

    #[error("Task not found: {task} in list {list}")]
    TaskNotFound { list: ListId, task: TaskId },

    #[error("Invalid to-do data: {0}")]
    Validation(String),
}

impl TodoError {
    /// Returns true for the list/task lookup failures
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TodoError::ListNotFound(_) | TodoError::TaskNotFound { .. }
        )
    }
}
