//! List screen state.
//!
//! Holds the tasks loaded from the store and the status of the pending load.
//! Each load gets a fresh request id; answers carrying any other id are
//! dropped, which is how cancellation and superseded reloads are handled.

use crate::app::observable::{Observable, SubscriptionId};
use crate::domain::{SortOrder, TodoId, TodoItem, TodoMatcher};

/// Progress of the list's load from the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No load issued yet.
    #[default]
    Idle,
    Loading {
        request_id: u64,
    },
    Loaded,
    Failed {
        message: String,
    },
    /// A load was abandoned, e.g. because the plugin was hidden.
    Cancelled,
}

/// Snapshot of the list screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListSnapshot {
    pub items: Vec<TodoItem>,
    pub status: LoadStatus,
    pub sort: SortOrder,
    /// Index into the visible (filtered) items.
    pub selected: usize,
}

/// Holder for [`ListSnapshot`].
#[derive(Debug, Default)]
pub struct TodoListState {
    state: Observable<ListSnapshot>,
    last_request_id: u64,
}

impl TodoListState {
    #[must_use]
    pub fn new(sort: SortOrder) -> Self {
        Self {
            state: Observable::new(ListSnapshot {
                sort,
                ..ListSnapshot::default()
            }),
            last_request_id: 0,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &ListSnapshot {
        self.state.get()
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.state.get().status
    }

    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.state.get().sort
    }

    #[must_use]
    pub fn item(&self, id: TodoId) -> Option<&TodoItem> {
        self.state.get().items.iter().find(|item| item.id == id)
    }

    /// Whether a load should be issued when the plugin becomes visible.
    /// `Idle` means startup has not run yet, and startup does the first load.
    #[must_use]
    pub fn needs_load(&self) -> bool {
        matches!(self.status(), LoadStatus::Cancelled)
    }

    /// Marks a new load as pending and returns its request id.
    pub fn begin_load(&mut self) -> u64 {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.state.update(|s| s.status = LoadStatus::Loading { request_id });
        tracing::debug!(request_id, "list load started");
        request_id
    }

    /// Publishes a load result. Returns `false`, publishing nothing, if
    /// `request_id` is not the pending request.
    pub fn apply_loaded(&mut self, request_id: u64, mut items: Vec<TodoItem>) -> bool {
        if *self.status() != (LoadStatus::Loading { request_id }) {
            tracing::debug!(request_id, status = ?self.status(), "dropping stale load result");
            return false;
        }

        self.state.get().sort.sort(&mut items);
        self.state.update(|s| {
            s.items = items;
            s.status = LoadStatus::Loaded;
            s.selected = s.selected.min(s.items.len().saturating_sub(1));
        });
        true
    }

    /// Fails the pending load. Ignored if no load is pending.
    pub fn fail_load(&mut self, message: &str) -> bool {
        if !matches!(self.status(), LoadStatus::Loading { .. }) {
            return false;
        }
        self.state.update(|s| {
            s.status = LoadStatus::Failed {
                message: message.to_string(),
            };
        });
        true
    }

    /// Abandons the pending load so its answer will be dropped.
    pub fn cancel_load(&mut self) -> bool {
        if !matches!(self.status(), LoadStatus::Loading { .. }) {
            return false;
        }
        tracing::debug!("list load cancelled");
        self.state.update(|s| s.status = LoadStatus::Cancelled);
        true
    }

    /// Items to show: all of them, or the fuzzy matches of `query`.
    #[must_use]
    pub fn visible_items(&self, query: Option<&str>) -> Vec<&TodoItem> {
        let items = &self.state.get().items;
        let _span = tracing::trace_span!("filter_list", total = items.len()).entered();

        match query.and_then(TodoMatcher::new) {
            Some(matcher) => items.iter().filter(|item| matcher.matches(item)).collect(),
            None => items.iter().collect(),
        }
    }

    #[must_use]
    pub fn selected_item(&self, query: Option<&str>) -> Option<&TodoItem> {
        self.visible_items(query)
            .get(self.state.get().selected)
            .copied()
    }

    pub fn move_selection_down(&mut self, query: Option<&str>) {
        let count = self.visible_items(query).len();
        if count > 0 {
            self.state.update(|s| s.selected = (s.selected + 1) % count);
        }
    }

    pub fn move_selection_up(&mut self, query: Option<&str>) {
        let count = self.visible_items(query).len();
        if count > 0 {
            self.state
                .update(|s| s.selected = s.selected.checked_sub(1).unwrap_or(count - 1));
        }
    }

    /// Keeps the selection inside the visible items after a filter change.
    pub fn clamp_selection(&mut self, query: Option<&str>) {
        let max = self.visible_items(query).len().saturating_sub(1);
        self.state.update_if_changed(|s| s.selected = s.selected.min(max));
    }

    /// Advances to the next sort order and re-sorts in memory.
    pub fn cycle_sort(&mut self) -> SortOrder {
        self.state.update(|s| {
            s.sort = s.sort.next();
            s.sort.sort(&mut s.items);
            s.selected = 0;
            s.sort
        })
    }

    /// Inserts a new task or replaces the one with the same id, keeping order.
    pub fn upsert(&mut self, item: TodoItem) {
        self.state.update(|s| {
            match s.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item,
                None => s.items.push(item),
            }
            s.sort.sort(&mut s.items);
        });
    }

    /// Replaces a task only if it is already listed.
    pub fn refresh(&mut self, item: &TodoItem) -> bool {
        if self.item(item.id).map_or(true, |existing| existing == item) {
            return false;
        }
        self.upsert(item.clone());
        true
    }

    /// Drops a task from the list. Returns whether it was listed.
    pub fn remove(&mut self, id: TodoId) -> bool {
        if self.item(id).is_none() {
            return false;
        }
        self.state.update(|s| {
            s.items.retain(|item| item.id != id);
            s.selected = s.selected.min(s.items.len().saturating_sub(1));
        });
        true
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&ListSnapshot) + 'static) -> SubscriptionId {
        self.state.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str) -> TodoItem {
        TodoItem {
            id: TodoId(id),
            title: title.to_string(),
            description: None,
            completed: false,
            created_at: i64::try_from(id).unwrap() * 10,
            updated_at: None,
        }
    }

    fn loaded(items: Vec<TodoItem>) -> TodoListState {
        let mut list = TodoListState::new(SortOrder::NewestFirst);
        let id = list.begin_load();
        assert!(list.apply_loaded(id, items));
        list
    }

    #[test]
    fn test_stale_and_cancelled_results_are_dropped() {
        let mut list = TodoListState::new(SortOrder::default());
        assert!(!list.needs_load());

        let first = list.begin_load();
        let second = list.begin_load();
        assert!(!list.apply_loaded(first, vec![item(1, "a")]));
        assert!(list.snapshot().items.is_empty());

        assert!(list.cancel_load());
        assert!(!list.apply_loaded(second, vec![item(1, "a")]));
        assert_eq!(*list.status(), LoadStatus::Cancelled);
        assert!(list.needs_load());
    }

    #[test]
    fn test_loaded_items_are_sorted() {
        let list = loaded(vec![item(1, "a"), item(2, "b")]);
        let ids: Vec<_> = list.visible_items(None).iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(*list.status(), LoadStatus::Loaded);
        assert!(!list.needs_load());
    }

    #[test]
    fn test_fail_only_when_pending() {
        let mut list = TodoListState::new(SortOrder::default());
        assert!(!list.fail_load("boom"));

        list.begin_load();
        assert!(list.fail_load("boom"));
        assert_eq!(
            *list.status(),
            LoadStatus::Failed {
                message: "boom".into()
            }
        );
    }

    #[test]
    fn test_visible_items_filters_by_query() {
        let list = loaded(vec![item(1, "Buy milk"), item(2, "Call mom")]);

        assert_eq!(list.visible_items(None).len(), 2);
        let hits = list.visible_items(Some("milk"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Buy milk");
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut list = loaded(vec![item(1, "a"), item(2, "b"), item(3, "c")]);

        list.move_selection_up(None);
        assert_eq!(list.selected_item(None).unwrap().id, TodoId(1));
        list.move_selection_down(None);
        assert_eq!(list.selected_item(None).unwrap().id, TodoId(3));

        list.move_selection_down(None);
        list.move_selection_down(None);
        list.clamp_selection(Some("a"));
        assert_eq!(list.snapshot().selected, 0);
    }

    #[test]
    fn test_upsert_refresh_remove() {
        let mut list = loaded(vec![item(1, "a")]);

        list.upsert(item(2, "b"));
        assert_eq!(list.visible_items(None)[0].id, TodoId(2));

        let mut renamed = item(1, "renamed");
        renamed.completed = true;
        assert!(list.refresh(&renamed));
        assert_eq!(list.item(TodoId(1)).unwrap().title, "renamed");
        assert!(!list.refresh(&item(9, "ghost")));

        assert!(list.remove(TodoId(2)));
        assert!(!list.remove(TodoId(2)));
        assert_eq!(list.visible_items(None).len(), 1);
    }

    #[test]
    fn test_cycle_sort_reorders() {
        let mut list = loaded(vec![item(1, "b"), item(2, "a")]);
        assert_eq!(list.cycle_sort(), SortOrder::OldestFirst);
        assert_eq!(list.visible_items(None)[0].id, TodoId(1));
        assert_eq!(list.cycle_sort(), SortOrder::Title);
        assert_eq!(list.visible_items(None)[0].title, "a");
    }
}
