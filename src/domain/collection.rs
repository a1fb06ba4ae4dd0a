//! Collection of to-do lists
//!
//! [`ToDoListCollection`] is the root aggregate and the unit of
//! (de)serialization. Its serialized form is a bare JSON array of list
//! records:
//!
//! ```json
//! [{"id":"tl-1","title":"Home Work","tasks":[{"id":"task-1","text":"Maths","hasDone":false}]}]
//! ```
//!
//! Every operation that targets a list by ID acts on the first list with
//! that ID and fails with [`TodoError::ListNotFound`] when there is none.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::TodoError;
use super::id::{IdScheme, ListId, TaskId};
use super::list::ToDoList;
use super::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToDoListCollection {
    to_do_lists: Vec<ToDoList>,
    id_scheme: IdScheme,
}

impl ToDoListCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from list records that are already in final shape
    pub fn load(records: Vec<ToDoList>) -> Self {
        Self {
            to_do_lists: records,
            id_scheme: IdScheme::default(),
        }
    }

    /// Parses the serialized form
    pub fn from_json(json: &str) -> Result<Self, TodoError> {
        serde_json::from_str::<Vec<ToDoList>>(json)
            .map(Self::load)
            .map_err(|e| TodoError::Validation(e.to_string()))
    }

    /// Serializes to the flat array form accepted by [`Self::from_json`]
    pub fn to_json(&self) -> Result<String, TodoError> {
        serde_json::to_string(&self.to_do_lists).map_err(|e| TodoError::Validation(e.to_string()))
    }

    /// Sets how new list and task IDs are numbered
    pub fn with_id_scheme(mut self, scheme: IdScheme) -> Self {
        self.id_scheme = scheme;
        self
    }

    pub fn id_scheme(&self) -> IdScheme {
        self.id_scheme
    }

    pub fn lists(&self) -> &[ToDoList] {
        &self.to_do_lists
    }

    pub fn len(&self) -> usize {
        self.to_do_lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_do_lists.is_empty()
    }

    /// Appends a new empty list and returns it
    pub fn add(&mut self, title: impl Into<String>) -> Result<&ToDoList, TodoError> {
        let sequence = self
            .id_scheme
            .next(self.to_do_lists.iter().map(|l| l.id.sequence()))
            .ok_or_else(|| TodoError::Validation("no list ID left to assign".to_string()))?;
        self.to_do_lists.push(ToDoList::new(ListId::new(sequence), title));
        Ok(&self.to_do_lists[self.to_do_lists.len() - 1])
    }

    /// Removes the first list with the given ID and returns it
    pub fn delete(&mut self, list_id: &ListId) -> Result<ToDoList, TodoError> {
        let index = self
            .to_do_lists
            .iter()
            .position(|l| &l.id == list_id)
            .ok_or(TodoError::ListNotFound(*list_id))?;
        Ok(self.to_do_lists.remove(index))
    }

    pub fn last_to_do_list(&self) -> Option<&ToDoList> {
        self.to_do_lists.last()
    }

    pub fn get(&self, list_id: &ListId) -> Option<&ToDoList> {
        self.to_do_lists.iter().find(|l| &l.id == list_id)
    }

    pub fn add_task(&mut self, list_id: &ListId, text: impl Into<String>) -> Result<&Task, TodoError> {
        let scheme = self.id_scheme;
        self.list_mut(list_id)?.add_task_with_scheme(text, scheme)
    }

    pub fn delete_task(&mut self, list_id: &ListId, task_id: &TaskId) -> Result<Task, TodoError> {
        self.list_mut(list_id)?.delete_task(task_id)
    }

    /// Returns the last task of a list; `Ok(None)` when the list is empty
    pub fn get_last_task(&self, list_id: &ListId) -> Result<Option<&Task>, TodoError> {
        Ok(self.list(list_id)?.last_task())
    }

    pub fn toggle_task_status(
        &mut self,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<&Task, TodoError> {
        self.list_mut(list_id)?.toggle_task_status(task_id)
    }

    pub fn change_to_do_list_title(
        &mut self,
        list_id: &ListId,
        title: impl Into<String>,
    ) -> Result<&ToDoList, TodoError> {
        let list = self.list_mut(list_id)?;
        list.change_title(title);
        Ok(&*list)
    }

    pub fn change_task_text(
        &mut self,
        list_id: &ListId,
        task_id: &TaskId,
        text: impl Into<String>,
    ) -> Result<&Task, TodoError> {
        self.list_mut(list_id)?.change_task_text(task_id, text)
    }

    fn list(&self, list_id: &ListId) -> Result<&ToDoList, TodoError> {
        self.get(list_id).ok_or(TodoError::ListNotFound(*list_id))
    }

    fn list_mut(&mut self, list_id: &ListId) -> Result<&mut ToDoList, TodoError> {
        self.to_do_lists
            .iter_mut()
            .find(|l| &l.id == list_id)
            .ok_or(TodoError::ListNotFound(*list_id))
    }
}

impl Serialize for ToDoListCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_do_lists.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ToDoListCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<ToDoList>::deserialize(deserializer).map(Self::load)
    }
}
