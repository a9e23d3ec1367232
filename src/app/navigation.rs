//! Routes, the back stack and the route-derived chrome.
//!
//! The [`NavController`] keeps a stack of [`Route`]s rooted at the list. The
//! top bar title, its navigation glyph and the floating add button are pure
//! functions of the current route.

use super::observable::{Observable, SubscriptionId};
use crate::domain::TodoId;
use crate::resources::{StringKey, Strings};
use std::fmt;

/// Pattern of the list route.
pub const TODO_LIST_PATTERN: &str = "todo_list";
/// Pattern of the detail route. `{id}` stands for the task id.
pub const TODO_DETAILS_PATTERN: &str = "todo_details/{id}";
/// Pattern of the create/edit form route.
pub const TODO_FORM_PATTERN: &str = "todo_form";

const TODO_DETAILS_PREFIX: &str = "todo_details/";

/// A screen the user can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    TodoList,
    TodoDetails(TodoId),
    TodoForm,
}

impl Route {
    /// Route pattern, with the detail id left as `{id}`.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::TodoList => TODO_LIST_PATTERN,
            Self::TodoDetails(_) => TODO_DETAILS_PATTERN,
            Self::TodoForm => TODO_FORM_PATTERN,
        }
    }

    /// Concrete path, such as `todo_details/7`.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::TodoDetails(id) => format!("{TODO_DETAILS_PREFIX}{id}"),
            other => other.pattern().to_string(),
        }
    }

    /// Parses a concrete path. The detail id must be numeric.
    ///
    /// # Examples
    ///
    /// ```
    /// use zodo::app::navigation::Route;
    /// use zodo::domain::TodoId;
    ///
    /// assert_eq!(Route::from_path("todo_details/7"), Some(Route::TodoDetails(TodoId(7))));
    /// assert_eq!(Route::from_path("todo_details/{id}"), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            TODO_LIST_PATTERN => Some(Self::TodoList),
            TODO_FORM_PATTERN => Some(Self::TodoForm),
            _ => path
                .strip_prefix(TODO_DETAILS_PREFIX)?
                .parse()
                .ok()
                .map(Self::TodoDetails),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Maps a route (pattern or concrete path) to its title key. Total: anything
/// unrecognized, including no route, is the app name.
#[must_use]
pub fn title_key(route: Option<&str>) -> StringKey {
    match route {
        Some(TODO_LIST_PATTERN) => StringKey::TitleTodoList,
        Some(TODO_FORM_PATTERN) => StringKey::TitleAddTask,
        Some(path) if is_details_path(path) => StringKey::TitleTodoDetails,
        _ => StringKey::AppName,
    }
}

fn is_details_path(path: &str) -> bool {
    path.strip_prefix(TODO_DETAILS_PREFIX)
        .is_some_and(|id| !id.is_empty() && !id.contains('/'))
}

/// Resolves the top bar title for a route.
#[must_use]
pub fn app_bar_title(route: Option<Route>, strings: &Strings) -> &str {
    let path = route.map(Route::path);
    strings.get(title_key(path.as_deref()))
}

/// Whether the floating add button is shown. Hidden only on the form.
#[must_use]
pub const fn show_fab(route: Route) -> bool {
    !matches!(route, Route::TodoForm)
}

/// Result of a back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The top route was popped; carries the route now on top.
    Popped(Route),
    /// Nothing to pop; the plugin should close.
    ExitApp,
}

/// Glyph shown at the leading edge of the normal top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Back,
    Close,
}

/// Back stack of routes, rooted at the list.
#[derive(Debug)]
pub struct NavController {
    stack: Observable<Vec<Route>>,
}

impl Default for NavController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Observable::new(vec![Route::TodoList]),
        }
    }

    #[must_use]
    pub fn current_route(&self) -> Route {
        self.stack.get().last().copied().unwrap_or(Route::TodoList)
    }

    /// Full stack, root first.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        self.stack.get()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.stack.get().len() > 1
    }

    #[must_use]
    pub fn nav_icon(&self) -> NavIcon {
        if self.has_previous() {
            NavIcon::Back
        } else {
            NavIcon::Close
        }
    }

    /// Pushes `route`. Navigating to the route already on top is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if self.current_route() == route {
            tracing::debug!(route = %route, "already on route");
            return;
        }
        tracing::debug!(from = %self.current_route(), to = %route, "navigate");
        self.stack.update(|stack| stack.push(route));
    }

    /// Pops the top route, or reports that the app should exit when only the
    /// root is left.
    pub fn back(&mut self) -> BackOutcome {
        if !self.has_previous() {
            return BackOutcome::ExitApp;
        }
        self.stack.update(|stack| {
            stack.pop();
        });
        let current = self.current_route();
        tracing::debug!(to = %current, "navigated back");
        BackOutcome::Popped(current)
    }

    /// Subscribes to stack changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&Vec<Route>) + 'static) -> SubscriptionId {
        self.stack.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.stack.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_key_known_routes() {
        assert_eq!(title_key(Some("todo_list")), StringKey::TitleTodoList);
        assert_eq!(title_key(Some("todo_details/{id}")), StringKey::TitleTodoDetails);
        assert_eq!(title_key(Some("todo_details/42")), StringKey::TitleTodoDetails);
        assert_eq!(title_key(Some("todo_form")), StringKey::TitleAddTask);
    }

    #[test]
    fn test_title_key_is_total() {
        for route in [None, Some(""), Some("settings"), Some("todo_details/"), Some("todo_list/x")] {
            assert_eq!(title_key(route), StringKey::AppName, "route {route:?}");
        }
    }

    #[test]
    fn test_app_bar_title_resolves_strings() {
        let strings = Strings::default();
        assert_eq!(app_bar_title(Some(Route::TodoList), &strings), "Todo Task");
        assert_eq!(
            app_bar_title(Some(Route::TodoDetails(TodoId(3))), &strings),
            "Todo Details"
        );
        assert_eq!(app_bar_title(Some(Route::TodoForm), &strings), "Add Task");
        assert_eq!(app_bar_title(None, &strings), "Todo App");
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [Route::TodoList, Route::TodoDetails(TodoId(9)), Route::TodoForm] {
            assert_eq!(Route::from_path(&route.path()), Some(route));
        }
        assert_eq!(Route::from_path("nowhere"), None);
    }

    #[test]
    fn test_show_fab_only_off_on_form() {
        assert!(show_fab(Route::TodoList));
        assert!(show_fab(Route::TodoDetails(TodoId(1))));
        assert!(!show_fab(Route::TodoForm));
    }

    #[test]
    fn test_back_pops_then_exits() {
        let mut nav = NavController::new();
        assert_eq!(nav.nav_icon(), NavIcon::Close);

        nav.navigate(Route::TodoDetails(TodoId(1)));
        nav.navigate(Route::TodoForm);
        assert_eq!(nav.nav_icon(), NavIcon::Back);

        assert_eq!(nav.back(), BackOutcome::Popped(Route::TodoDetails(TodoId(1))));
        assert_eq!(nav.back(), BackOutcome::Popped(Route::TodoList));
        assert_eq!(nav.back(), BackOutcome::ExitApp);
        assert_eq!(nav.current_route(), Route::TodoList);
    }

    #[test]
    fn test_navigate_to_current_route_is_noop() {
        let mut nav = NavController::new();
        nav.navigate(Route::TodoList);
        assert!(!nav.has_previous());
    }

    #[test]
    fn test_subscribers_see_stack_changes() {
        use std::cell::Cell;
        use std::rc::Rc;

        let depth = Rc::new(Cell::new(0));
        let sink = Rc::clone(&depth);
        let mut nav = NavController::new();
        nav.subscribe(move |stack| sink.set(stack.len()));

        nav.navigate(Route::TodoForm);
        assert_eq!(depth.get(), 2);
        nav.back();
        assert_eq!(depth.get(), 1);
    }
}
