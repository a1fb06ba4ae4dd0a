//! To-do list domain model
//!
//! A list owns an ordered sequence of tasks. Insertion order is kept;
//! deleting a task leaves the others in place.

use serde::{Deserialize, Serialize};

use super::error::TodoError;
use super::id::{IdScheme, ListId, TaskId};
use super::task::Task;

/// A named, ordered group of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToDoList {
    pub id: ListId,
    pub title: String,
    pub tasks: Vec<Task>,
}

impl ToDoList {
    /// Creates an empty list
    pub fn new(id: ListId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    /// Appends a task numbered `task-{len + 1}`
    pub fn add_task(&mut self, text: impl Into<String>) -> Result<&Task, TodoError> {
        self.add_task_with_scheme(text, IdScheme::Positional)
    }

    /// Appends a task numbered by the given scheme
    pub fn add_task_with_scheme(
        &mut self,
        text: impl Into<String>,
        scheme: IdScheme,
    ) -> Result<&Task, TodoError> {
        let sequence = scheme
            .next(self.tasks.iter().map(|t| t.id.sequence()))
            .ok_or_else(|| TodoError::Validation(format!("no task ID left in list {}", self.id)))?;
        self.tasks.push(Task::new(TaskId::new(sequence), text));
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Removes the first task with the given ID and returns it
    pub fn delete_task(&mut self, task_id: &TaskId) -> Result<Task, TodoError> {
        let index = self.position(task_id)?;
        Ok(self.tasks.remove(index))
    }

    /// Returns the most recently appended task, if any
    pub fn last_task(&self) -> Option<&Task> {
        self.tasks.last()
    }

    /// Returns the first task with the given ID
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == task_id)
    }

    pub fn toggle_task_status(&mut self, task_id: &TaskId) -> Result<&Task, TodoError> {
        let task = self.task_mut(task_id)?;
        task.toggle();
        Ok(&*task)
    }

    pub fn change_task_text(
        &mut self,
        task_id: &TaskId,
        text: impl Into<String>,
    ) -> Result<&Task, TodoError> {
        let task = self.task_mut(task_id)?;
        task.set_text(text);
        Ok(&*task)
    }

    pub fn change_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns (done, total) task counts
    pub fn progress(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.has_done).count();
        (done, self.tasks.len())
    }

    fn position(&self, task_id: &TaskId) -> Result<usize, TodoError> {
        self.tasks
            .iter()
            .position(|t| &t.id == task_id)
            .ok_or(TodoError::TaskNotFound {
                list: self.id,
                task: *task_id,
            })
    }

    fn task_mut(&mut self, task_id: &TaskId) -> Result<&mut Task, TodoError> {
        let index = self.position(task_id)?;
        Ok(&mut self.tasks[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_list() -> ToDoList {
        let mut list = ToDoList::new(ListId::new(1), "Home Work");
        list.add_task("Maths").unwrap();
        list.add_task("English").unwrap();
        list
    }

    #[test]
    fn add_task_numbers_by_position() {
        let list = make_list();
        let ids: Vec<_> = list.tasks.iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["task-1", "task-2"]);
        assert!(list.tasks.iter().all(|t| !t.has_done));
    }

    #[test]
    fn add_task_returns_new_task() {
        let mut list = make_list();
        let task = list.add_task("Science").unwrap();
        assert_eq!(task.id, TaskId::new(3));
        assert_eq!(task.text, "Science");
    }

    #[test]
    fn delete_task_preserves_order() {
        let mut list = make_list();
        list.add_task("Science").unwrap();

        let removed = list.delete_task(&TaskId::new(2)).unwrap();
        assert_eq!(removed.text, "English");

        let texts: Vec<_> = list.tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Maths", "Science"]);
    }

    #[test]
    fn delete_missing_task_is_not_found() {
        let mut list = make_list();
        let err = list.delete_task(&TaskId::new(9)).unwrap_err();
        assert_eq!(
            err,
            TodoError::TaskNotFound {
                list: ListId::new(1),
                task: TaskId::new(9),
            }
        );
        assert_eq!(list.tasks.len(), 2);
    }

    #[test]
    fn positional_ids_are_reused_after_delete() {
        let mut list = make_list();
        list.delete_task(&TaskId::new(1)).unwrap();

        // One task left, so the next id is task-2 again
        let task = list.add_task("History").unwrap();
        assert_eq!(task.id, TaskId::new(2));
        assert_eq!(list.tasks.iter().filter(|t| t.id == TaskId::new(2)).count(), 2);
    }

    #[test]
    fn monotonic_ids_skip_surviving_suffixes() {
        let mut list = make_list();
        list.delete_task(&TaskId::new(1)).unwrap();

        let task = list
            .add_task_with_scheme("History", IdScheme::Monotonic)
            .unwrap();
        assert_eq!(task.id, TaskId::new(3));
    }

    #[test]
    fn monotonic_add_after_max_suffix_is_error() {
        let mut list = ToDoList::new(ListId::new(1), "Full");
        list.tasks.push(Task::new(TaskId::new(u32::MAX), "last"));

        let err = list
            .add_task_with_scheme("one more", IdScheme::Monotonic)
            .unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert_eq!(list.tasks.len(), 1);
    }

    #[test]
    fn last_task_of_empty_list_is_none() {
        let list = ToDoList::new(ListId::new(1), "Empty");
        assert!(list.last_task().is_none());
    }

    #[test]
    fn last_task_is_highest_index() {
        let list = make_list();
        assert_eq!(list.last_task().map(|t| t.text.as_str()), Some("English"));
    }

    #[test]
    fn toggle_changes_only_target() {
        let mut list = make_list();
        let task = list.toggle_task_status(&TaskId::new(1)).unwrap();
        assert!(task.has_done);
        assert!(!list.task(&TaskId::new(2)).unwrap().has_done);
        assert_eq!(list.progress(), (1, 2));
    }

    #[test]
    fn change_task_text_and_title() {
        let mut list = make_list();
        list.change_task_text(&TaskId::new(2), "Hindi").unwrap();
        list.change_title("School Work");

        assert_eq!(list.task(&TaskId::new(2)).unwrap().text, "Hindi");
        assert_eq!(list.title, "School Work");
        assert!(list.change_task_text(&TaskId::new(5), "x").is_err());
    }

    #[test]
    fn lookups_act_on_first_match() {
        let mut list = ToDoList::new(ListId::new(1), "Dupes");
        list.tasks.push(Task::new(TaskId::new(1), "first"));
        list.tasks.push(Task::new(TaskId::new(1), "second"));

        list.toggle_task_status(&TaskId::new(1)).unwrap();
        assert!(list.tasks[0].has_done);
        assert!(!list.tasks[1].has_done);

        let removed = list.delete_task(&TaskId::new(1)).unwrap();
        assert_eq!(removed.text, "first");
        assert_eq!(list.tasks.len(), 1);
    }
}
