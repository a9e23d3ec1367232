//! Task store abstraction.
//!
//! This module defines the [`TodoStore`] trait the worker talks to. Each method
//! maps to one store operation the screens need: create, read-all, read-one,
//! update, delete and search.

use crate::domain::error::{Result, TodoError};
use crate::domain::{TodoId, TodoItem, TodoMatcher};
use crate::storage::models::TodoRecord;

/// Abstraction over persistent task storage.
///
/// Implementations serialize their own writes; callers never coordinate.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use zodo::storage::{JsonStorage, TodoStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonStorage::new(PathBuf::from("/tmp/todos.json"))?;
/// let created = store.create_item("Buy milk", None)?;
/// assert_eq!(store.get_item(created.id)?.title, "Buy milk");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TodoStore: Send {
    /// Creates a new open task and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    fn create_item(&mut self, title: &str, description: Option<&str>) -> Result<TodoRecord>;

    /// Retrieves all tasks, unsorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_items(&self) -> Result<Vec<TodoRecord>>;

    /// Retrieves a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if no task has this id.
    fn get_item(&self, id: u64) -> Result<TodoRecord>;

    /// Replaces the stored task with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if no task has this id, or a storage error
    /// if the write fails.
    fn update_item(&mut self, record: &TodoRecord) -> Result<()>;

    /// Deletes a task. Idempotent: deleting an unknown id succeeds without
    /// touching the store. Returns whether a task was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_item(&mut self, id: u64) -> Result<bool>;

    /// Returns the tasks matching a fuzzy query. A blank query returns
    /// everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn search_items(&self, query: &str) -> Result<Vec<TodoRecord>> {
        let records = self.list_items()?;
        let Some(matcher) = TodoMatcher::new(query) else {
            return Ok(records);
        };

        Ok(records
            .into_iter()
            .filter(|record| matcher.matches(&TodoItem::from(record.clone())))
            .collect())
    }
}

/// Builds the not-found error for a raw store id.
pub(crate) const fn not_found(id: u64) -> TodoError {
    TodoError::NotFound(TodoId(id))
}
