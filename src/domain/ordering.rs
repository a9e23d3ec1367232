//! Sort orders for the task list.
//!
//! The top bar's sort action cycles through [`SortOrder`] variants. Sorting is
//! applied in memory, both by the worker when it answers a load request and by
//! the list state when the user changes order without a reload.

use super::todo::TodoItem;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering applied to the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    NewestFirst,
    /// Oldest first.
    OldestFirst,
    /// Case-insensitive by title.
    Title,
    /// Open tasks before completed ones, newest first within each group.
    OpenFirst,
}

impl SortOrder {
    /// Returns the next order in the cycle used by the sort action.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::NewestFirst => Self::OldestFirst,
            Self::OldestFirst => Self::Title,
            Self::Title => Self::OpenFirst,
            Self::OpenFirst => Self::NewestFirst,
        }
    }

    /// Parses a config value such as `"newest-first"` or `"title"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "newest-first" | "newest" => Some(Self::NewestFirst),
            "oldest-first" | "oldest" => Some(Self::OldestFirst),
            "title" | "alphabetical" => Some(Self::Title),
            "open-first" | "open" => Some(Self::OpenFirst),
            _ => None,
        }
    }

    /// Sorts tasks in place. Ties fall back to the id so the order is stable
    /// across reloads.
    pub fn sort(self, items: &mut [TodoItem]) {
        items.sort_by(|a, b| self.compare(a, b).then_with(|| a.id.cmp(&b.id)));
    }

    fn compare(self, a: &TodoItem, b: &TodoItem) -> Ordering {
        match self {
            Self::NewestFirst => b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)),
            Self::OldestFirst => a.created_at.cmp(&b.created_at),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::OpenFirst => a
                .completed
                .cmp(&b.completed)
                .then_with(|| Self::NewestFirst.compare(a, b)),
        }
    }
}
