//! Top bar state: normal title bar or search input.

use crate::app::observable::{Observable, SubscriptionId};

/// Where keystrokes go while the search bar is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    /// Characters edit the query.
    #[default]
    Typing,
    /// Keys move through the filtered results.
    Navigating,
}

/// Snapshot of the search bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    pub visible: bool,
    pub query: String,
    pub focus: SearchFocus,
}

/// Action offered at the trailing edge of the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingAction {
    /// Query is non-empty: move focus to the results.
    Submit,
    /// Query is empty: close the search bar.
    Clear,
}

/// Holder for [`SearchState`].
#[derive(Debug, Default)]
pub struct TopBarState {
    state: Observable<SearchState>,
}

impl TopBarState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(&self) -> &SearchState {
        self.state.get()
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.state.get().visible
    }

    /// Query to filter by: `Some` only while the bar is open and the query is
    /// not blank.
    #[must_use]
    pub fn active_query(&self) -> Option<&str> {
        let search = self.state.get();
        (search.visible && !search.query.trim().is_empty()).then_some(search.query.as_str())
    }

    /// Opens or closes the search bar. Closing discards the query.
    pub fn toggle_search_bar(&mut self) {
        self.state.update(|s| {
            s.visible = !s.visible;
            s.query.clear();
            s.focus = SearchFocus::Typing;
        });
        tracing::debug!(visible = self.state.get().visible, "search bar toggled");
    }

    /// Stores `text` verbatim as the query.
    pub fn handle_searched_text_change(&mut self, text: &str) {
        self.state.update_if_changed(|s| {
            s.query.clear();
            s.query.push_str(text);
        });
    }

    pub fn push_char(&mut self, c: char) {
        let mut text = self.state.get().query.clone();
        text.push(c);
        self.handle_searched_text_change(&text);
    }

    pub fn pop_char(&mut self) {
        let mut text = self.state.get().query.clone();
        if text.pop().is_some() {
            self.handle_searched_text_change(&text);
        }
    }

    #[must_use]
    pub fn trailing_action(&self) -> TrailingAction {
        if self.state.get().query.is_empty() {
            TrailingAction::Clear
        } else {
            TrailingAction::Submit
        }
    }

    /// Runs the trailing action and returns which one ran. No-op while the
    /// bar is closed.
    pub fn activate_trailing(&mut self) -> Option<TrailingAction> {
        if !self.is_searching() {
            return None;
        }
        let action = self.trailing_action();
        match action {
            TrailingAction::Clear => self.toggle_search_bar(),
            TrailingAction::Submit => self.set_focus(SearchFocus::Navigating),
        }
        Some(action)
    }

    pub fn set_focus(&mut self, focus: SearchFocus) {
        if self.is_searching() {
            self.state.update_if_changed(|s| s.focus = focus);
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SearchState) + 'static) -> SubscriptionId {
        self.state.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_returns_to_normal_without_query() {
        let mut bar = TopBarState::new();
        let initial = bar.search().clone();

        bar.toggle_search_bar();
        bar.handle_searched_text_change("milk");
        bar.toggle_search_bar();

        assert_eq!(*bar.search(), initial);
        assert!(!bar.is_searching());
        assert!(bar.search().query.is_empty());
    }

    #[test]
    fn test_text_change_is_stored_exactly() {
        let mut bar = TopBarState::new();
        bar.toggle_search_bar();

        for text in ["", " buy  milk ", "ÜBER", "a\tb"] {
            bar.handle_searched_text_change(text);
            assert_eq!(bar.search().query, text);
        }
    }

    #[test]
    fn test_text_change_does_not_open_bar() {
        let mut bar = TopBarState::new();
        bar.handle_searched_text_change("milk");

        assert!(!bar.is_searching());
        assert_eq!(bar.active_query(), None);
    }

    #[test]
    fn test_trailing_action_follows_query() {
        let mut bar = TopBarState::new();
        bar.toggle_search_bar();
        assert_eq!(bar.trailing_action(), TrailingAction::Clear);

        bar.push_char('m');
        assert_eq!(bar.trailing_action(), TrailingAction::Submit);
        assert_eq!(bar.activate_trailing(), Some(TrailingAction::Submit));
        assert_eq!(bar.search().focus, SearchFocus::Navigating);
        assert_eq!(bar.active_query(), Some("m"));

        bar.pop_char();
        assert_eq!(bar.activate_trailing(), Some(TrailingAction::Clear));
        assert!(!bar.is_searching());
        assert_eq!(bar.activate_trailing(), None);
    }

    #[test]
    fn test_blank_query_is_not_active() {
        let mut bar = TopBarState::new();
        bar.toggle_search_bar();
        bar.handle_searched_text_change("   ");
        assert_eq!(bar.active_query(), None);
    }

    #[test]
    fn test_unchanged_text_does_not_notify() {
        use std::cell::Cell;
        use std::rc::Rc;

        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let mut bar = TopBarState::new();
        bar.subscribe(move |_| sink.set(sink.get() + 1));

        bar.handle_searched_text_change("a");
        bar.handle_searched_text_change("a");
        bar.pop_char();
        bar.pop_char();

        assert_eq!(hits.get(), 2);
    }
}
