//! Domain models for to-do lists
//!
//! Contains the core business logic without any I/O concerns.

mod id;
mod error;
mod task;
mod list;
mod collection;

pub use id::{IdError, IdScheme, ListId, TaskId};
pub use error::TodoError;
pub use task::Task;
pub use list::ToDoList;
pub use collection::ToDoListCollection;
