//! Detail screen state.

use crate::app::observable::{Observable, SubscriptionId};
use crate::domain::{TodoId, TodoItem};

/// What the detail screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailView {
    #[default]
    Empty,
    /// Waiting for the store, nothing cached.
    Loading(TodoId),
    Loaded(TodoItem),
    /// The id is stale; the screen renders a fallback.
    NotFound(TodoId),
}

impl DetailView {
    #[must_use]
    pub const fn id(&self) -> Option<TodoId> {
        match self {
            Self::Empty => None,
            Self::Loading(id) | Self::NotFound(id) => Some(*id),
            Self::Loaded(item) => Some(item.id),
        }
    }
}

/// Holder for [`DetailView`].
#[derive(Debug, Default)]
pub struct TodoDetailState {
    state: Observable<DetailView>,
}

impl TodoDetailState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view(&self) -> &DetailView {
        self.state.get()
    }

    #[must_use]
    pub fn item(&self) -> Option<&TodoItem> {
        match self.state.get() {
            DetailView::Loaded(item) => Some(item),
            _ => None,
        }
    }

    /// Shows `id`, using the cached list row if there is one. The caller
    /// still refreshes from the store.
    pub fn open(&mut self, id: TodoId, cached: Option<&TodoItem>) {
        let view = cached
            .filter(|item| item.id == id)
            .map_or(DetailView::Loading(id), |item| DetailView::Loaded(item.clone()));
        self.state.set(view);
    }

    /// Applies a fresh copy of the shown task. Ignored for other ids.
    pub fn apply_fetched(&mut self, item: &TodoItem) -> bool {
        if self.state.get().id() != Some(item.id) {
            return false;
        }
        self.state.set_if_changed(DetailView::Loaded(item.clone()))
    }

    /// Switches to the fallback if `id` is the shown task.
    pub fn mark_not_found(&mut self, id: TodoId) -> bool {
        if self.state.get().id() != Some(id) {
            return false;
        }
        self.state.set_if_changed(DetailView::NotFound(id))
    }

    pub fn clear(&mut self) {
        self.state.set_if_changed(DetailView::Empty);
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&DetailView) + 'static) -> SubscriptionId {
        self.state.subscribe(callback)
    }
}
