//! todo-lists - A small to-do list manager
//!
//! A collection of named lists, each holding tasks with a completion flag.
//! The domain layer is pure in-memory data manipulation; storage persists
//! the collection as JSON, and the server and CLI expose it.

pub mod domain;
pub mod storage;
pub mod server;
pub mod cli;

pub use domain::{IdScheme, ListId, Task, TaskId, ToDoList, ToDoListCollection, TodoError};
