//! Storage record models for the persistence layer.
//!
//! [`TodoRecord`] is the on-disk shape of a task. It is kept separate from the
//! domain [`TodoItem`] so the file format can evolve without touching screens.

use crate::domain::{TodoId, TodoItem};
use serde::{Deserialize, Serialize};

/// A task as stored in `todos.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Store-assigned identifier.
    pub id: u64,

    /// Task title.
    pub title: String,

    /// Optional detail text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Completion flag.
    #[serde(default)]
    pub completed: bool,

    /// Unix timestamp when the task was created.
    pub created_at: i64,

    /// Unix timestamp of the last update, `None` if never updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl TodoRecord {
    /// Creates an open record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use zodo::storage::TodoRecord;
    ///
    /// let record = TodoRecord::new(1, "Buy milk", None);
    /// assert!(!record.completed);
    /// assert!(record.updated_at.is_none());
    /// ```
    pub fn new(id: u64, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            completed: false,
            created_at: chrono::Utc::now().timestamp(),
            updated_at: None,
        }
    }
}

impl From<TodoRecord> for TodoItem {
    fn from(record: TodoRecord) -> Self {
        Self {
            id: TodoId(record.id),
            title: record.title,
            description: record.description,
            completed: record.completed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<&TodoItem> for TodoRecord {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id.0,
            title: item.title.clone(),
            description: item.description.clone(),
            completed: item.completed,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
