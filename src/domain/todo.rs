//! Task domain model.
//!
//! This module defines [`TodoItem`], the record every screen renders, and the
//! [`TodoId`] newtype used by routes, worker messages and storage lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Stable identifier of a task.
///
/// Assigned by the store from a monotonic counter and never reused, even after
/// the task is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// A single task on the to-do list.
///
/// # Fields
///
/// - `id`: Store-assigned identifier, unique for the lifetime of the store
/// - `title`: Required, non-blank title
/// - `description`: Optional free-form detail text
/// - `completed`: Completion flag toggled from the list or detail screen
/// - `created_at`: Unix timestamp of creation
/// - `updated_at`: Unix timestamp of the last edit or toggle, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl TodoItem {
    /// Creates an open task stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use zodo::domain::{TodoId, TodoItem};
    ///
    /// let item = TodoItem::new(TodoId(1), "Buy milk", None);
    /// assert!(!item.completed);
    /// assert_eq!(item.time_ago(), "just now");
    /// ```
    #[must_use]
    pub fn new(id: TodoId, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            completed: false,
            created_at: chrono::Utc::now().timestamp(),
            updated_at: None,
        }
    }

    /// Returns a copy with the completion flag flipped and `updated_at` set.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            updated_at: Some(chrono::Utc::now().timestamp()),
            ..self.clone()
        }
    }

    /// Returns the description, treating a blank one as absent.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Returns a human-readable string describing how long ago the task was created.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn time_ago(&self) -> String {
        Self::format_age(chrono::Utc::now().timestamp() - self.created_at)
    }

    fn format_age(diff: i64) -> String {
        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_id_parses_and_displays() {
        let id: TodoId = "42".parse().unwrap();
        assert_eq!(id, TodoId(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<TodoId>().is_err());
    }

    #[test]
    fn test_toggled_flips_completion_and_keeps_identity() {
        let item = TodoItem::new(TodoId(3), "Write report", Some("due friday".into()));
        let done = item.toggled();

        assert!(done.completed);
        assert_eq!(done.id, item.id);
        assert_eq!(done.title, item.title);
        assert!(done.updated_at.is_some());
        assert!(!done.toggled().completed);
    }

    #[test]
    fn test_description_text_ignores_blank() {
        let mut item = TodoItem::new(TodoId(1), "a", Some("   ".into()));
        assert_eq!(item.description_text(), None);

        item.description = Some("  details ".into());
        assert_eq!(item.description_text(), Some("details"));
    }

    #[test]
    fn test_format_age_buckets() {
        assert_eq!(TodoItem::format_age(5), "just now");
        assert_eq!(TodoItem::format_age(300), "5m ago");
        assert_eq!(TodoItem::format_age(3 * 3600), "3h ago");
        assert_eq!(TodoItem::format_age(2 * 86400 + 10), "2d ago");
    }
}
