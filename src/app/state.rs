//! Application shell state and view model computation.
//!
//! [`AppState`] owns every holder, the navigation controller, the theme and
//! the string table. It subscribes one render signal to all of them: any
//! holder notification bumps the signal, and the shell re-renders when the
//! signal moved since the last frame.
//!
//! `compute_viewmodel` is a pure function of the holder snapshots. It
//! resolves the top bar mode, the active screen, the FAB and the footer, and
//! windows the list around the selection.

use super::modes::InputMode;
use super::navigation::{self, NavController, NavIcon, Route};
use super::observable::Observable;
use super::view_state::{
    DetailView, FormField, FormSnapshot, ListSnapshot, LoadStatus, SearchFocus, SearchState,
    TodoDetailState, TodoFormState, TodoListState, TopBarState, TrailingAction,
};
use crate::domain::{SortOrder, TodoItem, TodoMatcher};
use crate::resources::{StringKey, Strings};
use crate::ui::helpers;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FabInfo, FooterInfo, FormFieldView, FormView, ListView,
    ScreenView, TopBarAction, TopBarView, UIViewModel,
};
use std::cell::Cell;
use std::rc::Rc;

/// Rows the list layout spends outside the task rows: top bar, border and
/// status line above; FAB, border and footer below.
pub const LIST_CHROME_ROWS: usize = 6;

/// Width of the checkbox prefix in front of each list row.
const ROW_PREFIX_WIDTH: usize = 5;

/// Returns a closure that bumps `signal`; subscribed to every holder.
fn render_trigger<T>(signal: &Rc<Cell<u64>>) -> impl FnMut(&T) + 'static {
    let signal = Rc::clone(signal);
    move |_| signal.set(signal.get().wrapping_add(1))
}

/// Label key for a sort order.
#[must_use]
pub const fn sort_key(sort: SortOrder) -> StringKey {
    match sort {
        SortOrder::NewestFirst => StringKey::SortNewestFirst,
        SortOrder::OldestFirst => StringKey::SortOldestFirst,
        SortOrder::Title => StringKey::SortTitle,
        SortOrder::OpenFirst => StringKey::SortOpenFirst,
    }
}

/// The app shell.
#[derive(Debug)]
pub struct AppState {
    pub top_bar: TopBarState,
    pub list: TodoListState,
    pub form: TodoFormState,
    pub detail: TodoDetailState,
    pub nav: NavController,

    pub theme: Theme,
    pub strings: Strings,

    /// Transient error line, cleared by the next key press.
    banner: Observable<Option<String>>,

    /// Store path forwarded to the worker on startup.
    data_file: Option<String>,

    render_signal: Rc<Cell<u64>>,
    rendered_at: u64,
}

impl AppState {
    /// Builds every holder and wires the render signal.
    #[must_use]
    pub fn new(theme: Theme, strings: Strings, sort: SortOrder, data_file: Option<String>) -> Self {
        let render_signal = Rc::new(Cell::new(0));

        let mut top_bar = TopBarState::new();
        let mut list = TodoListState::new(sort);
        let mut form = TodoFormState::new();
        let mut detail = TodoDetailState::new();
        let mut nav = NavController::new();
        let mut banner = Observable::new(None);

        top_bar.subscribe(render_trigger::<SearchState>(&render_signal));
        list.subscribe(render_trigger::<ListSnapshot>(&render_signal));
        form.subscribe(render_trigger::<FormSnapshot>(&render_signal));
        detail.subscribe(render_trigger::<DetailView>(&render_signal));
        nav.subscribe(render_trigger::<Vec<Route>>(&render_signal));
        banner.subscribe(render_trigger::<Option<String>>(&render_signal));

        Self {
            top_bar,
            list,
            form,
            detail,
            nav,
            theme,
            strings,
            banner,
            data_file,
            render_signal,
            rendered_at: 0,
        }
    }

    #[must_use]
    pub fn data_file(&self) -> Option<&str> {
        self.data_file.as_deref()
    }

    /// Returns `true` if a holder notified since the last [`take_render`].
    ///
    /// [`take_render`]: Self::take_render
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.render_signal.get() != self.rendered_at
    }

    /// Like [`should_render`](Self::should_render), and marks the change as seen.
    pub fn take_render(&mut self) -> bool {
        let changed = self.should_render();
        self.rendered_at = self.render_signal.get();
        changed
    }

    /// Input mode derived from the route and the search bar.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        match self.nav.current_route() {
            Route::TodoForm => InputMode::Form,
            Route::TodoList if self.top_bar.is_searching() => {
                InputMode::Search(self.top_bar.search().focus)
            }
            _ => InputMode::Normal,
        }
    }

    /// Query filtering the list, if any.
    #[must_use]
    pub fn list_query(&self) -> Option<&str> {
        self.top_bar.active_query()
    }

    /// The task the current screen acts on: the selected row on the list, the
    /// loaded task on the detail screen.
    #[must_use]
    pub fn current_item(&self) -> Option<&TodoItem> {
        match self.nav.current_route() {
            Route::TodoList => self.list.selected_item(self.list_query()),
            Route::TodoDetails(_) => self.detail.item(),
            Route::TodoForm => None,
        }
    }

    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.get().as_deref()
    }

    pub fn set_banner(&mut self, message: String) {
        self.banner.set_if_changed(Some(message));
    }

    pub fn clear_banner(&mut self) {
        self.banner.set_if_changed(None);
    }

    /// Computes the frame for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let route = self.nav.current_route();

        UIViewModel {
            top_bar: self.compute_top_bar(route),
            screen: self.compute_screen(route, rows, cols),
            fab: navigation::show_fab(route).then(|| FabInfo {
                label: self.strings.get(StringKey::FabLabel).to_string(),
            }),
            banner: self.banner.get().clone(),
            footer: self.compute_footer(route),
        }
    }

    fn compute_top_bar(&self, route: Route) -> TopBarView {
        if route == Route::TodoList && self.top_bar.is_searching() {
            let search = self.top_bar.search();
            let is_placeholder = search.query.is_empty();
            let text = if is_placeholder {
                self.strings.get(StringKey::SearchPlaceholder).to_string()
            } else {
                search.query.clone()
            };
            let trailing_key = match self.top_bar.trailing_action() {
                TrailingAction::Submit => StringKey::IconSubmit,
                TrailingAction::Clear => StringKey::IconClear,
            };

            return TopBarView::Searching {
                text,
                is_placeholder,
                trailing_label: self.strings.get(trailing_key).to_string(),
                typing: search.focus == SearchFocus::Typing,
            };
        }

        tracing::debug!(route = %route, "resolving normal top bar");

        let nav_icon = self.nav.nav_icon();
        let nav_label = match nav_icon {
            NavIcon::Back => self.strings.get(StringKey::IconBack),
            NavIcon::Close => self.strings.get(StringKey::IconClose),
        };

        let action = |key: char, label: StringKey| TopBarAction {
            key,
            label: self.strings.get(label).to_string(),
        };
        let actions = match route {
            Route::TodoList => vec![
                action('/', StringKey::IconSearch),
                action('s', StringKey::IconSort),
                action('d', StringKey::IconDelete),
            ],
            Route::TodoDetails(_) if self.detail.item().is_some() => vec![
                action(' ', StringKey::IconToggle),
                action('e', StringKey::IconEdit),
                action('d', StringKey::IconDelete),
            ],
            Route::TodoDetails(_) | Route::TodoForm => vec![],
        };

        TopBarView::Normal {
            nav_icon,
            nav_label: nav_label.to_string(),
            title: navigation::app_bar_title(Some(route), &self.strings).to_string(),
            actions,
        }
    }

    fn compute_screen(&self, route: Route, rows: usize, cols: usize) -> ScreenView {
        match route {
            Route::TodoList => self.compute_list(rows, cols),
            Route::TodoDetails(_) => self.compute_detail(),
            Route::TodoForm => ScreenView::Form(self.compute_form()),
        }
    }

    fn message(&self, message: String, subtitle: Option<StringKey>, is_error: bool) -> ScreenView {
        ScreenView::Message(EmptyState {
            message,
            subtitle: subtitle
                .map(|key| self.strings.get(key).to_string())
                .unwrap_or_default(),
            is_error,
        })
    }

    fn compute_list(&self, rows: usize, cols: usize) -> ScreenView {
        let snapshot = self.list.snapshot();
        let has_items = !snapshot.items.is_empty();

        match &snapshot.status {
            LoadStatus::Idle | LoadStatus::Loading { .. } if !has_items => {
                return self.message(self.strings.get(StringKey::Loading).to_string(), None, false);
            }
            LoadStatus::Failed { message } => {
                let text = self.strings.fill(StringKey::LoadFailed, &[("message", message.as_str())]);
                return self.message(text, Some(StringKey::RetryHint), true);
            }
            LoadStatus::Cancelled if !has_items => {
                return self.message(
                    self.strings.get(StringKey::LoadCancelled).to_string(),
                    Some(StringKey::RetryHint),
                    false,
                );
            }
            _ => {}
        }

        let query = self.list_query();
        let visible = self.list.visible_items(query);
        if visible.is_empty() {
            let text = match query {
                Some(q) => self.strings.fill(StringKey::EmptySearch, &[("query", q)]),
                None => self.strings.get(StringKey::EmptyList).to_string(),
            };
            return self.message(text, None, false);
        }

        let banner_rows = usize::from(self.banner.get().is_some());
        let available_rows = rows.saturating_sub(LIST_CHROME_ROWS + banner_rows).max(1);
        let selected = snapshot.selected.min(visible.len() - 1);

        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(visible.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = query.and_then(TodoMatcher::new);
        let rows = visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, item)| {
                let is_selected = visible_start + relative_idx == selected;
                Self::compute_display_item(item, is_selected, cols, matcher.as_ref())
            })
            .collect();

        let shown = visible.len().to_string();
        let total = snapshot.items.len().to_string();
        let count = self
            .strings
            .fill(StringKey::ListCount, &[("shown", shown.as_str()), ("total", total.as_str())]);
        let status_line = format!(
            "{count}  {}: {}",
            self.strings.get(StringKey::IconSort),
            self.strings.get(sort_key(snapshot.sort))
        );

        ScreenView::List(ListView {
            status_line,
            rows,
            selected_index: selected - visible_start,
        })
    }

    fn compute_display_item(
        item: &TodoItem,
        is_selected: bool,
        cols: usize,
        matcher: Option<&TodoMatcher>,
    ) -> DisplayItem {
        let age = item.time_ago();
        let max_title = cols.saturating_sub(ROW_PREFIX_WIDTH + helpers::char_len(&age) + 2);
        let title = helpers::truncate(&item.title, max_title);

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            helpers::clip_ranges(&m.highlight_ranges(&item.title), helpers::char_len(&title))
        });

        DisplayItem {
            title,
            age,
            completed: item.completed,
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_detail(&self) -> ScreenView {
        match self.detail.view() {
            DetailView::Loaded(item) => ScreenView::Detail(self.compute_detail_info(item)),
            DetailView::NotFound(id) => {
                let text = self
                    .strings
                    .fill(StringKey::DetailNotFound, &[("id", id.to_string().as_str())]);
                self.message(text, Some(StringKey::DetailBackHint), true)
            }
            DetailView::Loading(_) | DetailView::Empty => {
                self.message(self.strings.get(StringKey::Loading).to_string(), None, false)
            }
        }
    }

    fn compute_detail_info(&self, item: &TodoItem) -> DetailInfo {
        let status = if item.completed {
            StringKey::StatusDone
        } else {
            StringKey::StatusOpen
        };

        let mut fields = vec![
            (
                self.strings.get(StringKey::DetailStatus).to_string(),
                self.strings.get(status).to_string(),
            ),
            (
                self.strings.get(StringKey::DetailCreated).to_string(),
                item.time_ago(),
            ),
        ];
        if let Some(updated) = item
            .updated_at
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        {
            fields.push((
                self.strings.get(StringKey::DetailUpdated).to_string(),
                updated.format("%Y-%m-%d %H:%M").to_string(),
            ));
        }

        let description = item.description_text();
        DetailInfo {
            title: item.title.clone(),
            completed: item.completed,
            fields,
            description_label: self.strings.get(StringKey::DetailDescription).to_string(),
            description: description
                .unwrap_or_else(|| self.strings.get(StringKey::DetailNoDescription))
                .to_string(),
            has_description: description.is_some(),
        }
    }

    fn compute_form(&self) -> FormView {
        let form = self.form.snapshot();
        let field = |key: StringKey, value: &str, which: FormField| FormFieldView {
            label: self.strings.get(key).to_string(),
            value: value.to_string(),
            focused: form.focus == which,
        };

        FormView {
            subtitle: form.editing.map(|id| {
                self.strings
                    .fill(StringKey::FormEditing, &[("id", id.to_string().as_str())])
            }),
            fields: vec![
                field(StringKey::FormTitleLabel, &form.title, FormField::Title),
                field(
                    StringKey::FormDescriptionLabel,
                    &form.description,
                    FormField::Description,
                ),
            ],
            error: form.error.clone(),
            status: form
                .submitting
                .then(|| self.strings.get(StringKey::FormSaving).to_string()),
        }
    }

    fn compute_footer(&self, route: Route) -> FooterInfo {
        let key = match (self.input_mode(), route) {
            (InputMode::Form, _) => StringKey::HintsForm,
            (InputMode::Search(SearchFocus::Typing), _) => StringKey::HintsSearchTyping,
            (InputMode::Search(SearchFocus::Navigating), _) => StringKey::HintsSearchNavigating,
            (InputMode::Normal, Route::TodoDetails(_)) if self.detail.item().is_none() => {
                StringKey::HintsNotFound
            }
            (InputMode::Normal, Route::TodoDetails(_)) => StringKey::HintsDetail,
            (InputMode::Normal, _) => StringKey::HintsList,
        };

        FooterInfo {
            keybindings: self.strings.get(key).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoId;

    fn state() -> AppState {
        AppState::new(Theme::default(), Strings::default(), SortOrder::NewestFirst, None)
    }

    fn item(id: u64, title: &str) -> TodoItem {
        TodoItem {
            id: TodoId(id),
            title: title.to_string(),
            description: None,
            completed: false,
            created_at: chrono::Utc::now().timestamp() - i64::try_from(id).unwrap(),
            updated_at: None,
        }
    }

    fn loaded(count: u64) -> AppState {
        let mut state = state();
        let request_id = state.list.begin_load();
        let items = (1..=count).map(|id| item(id, &format!("task {id}"))).collect();
        assert!(state.list.apply_loaded(request_id, items));
        state
    }

    #[test]
    fn test_render_signal_tracks_holder_changes() {
        let mut state = state();
        assert!(!state.take_render());

        state.top_bar.toggle_search_bar();
        assert!(state.should_render());
        assert!(state.take_render());
        assert!(!state.should_render());

        state.top_bar.handle_searched_text_change("");
        assert!(!state.should_render());

        state.nav.navigate(Route::TodoForm);
        assert!(state.take_render());
    }

    #[test]
    fn test_input_mode_follows_route_and_search() {
        let mut state = state();
        assert_eq!(state.input_mode(), InputMode::Normal);

        state.top_bar.toggle_search_bar();
        assert_eq!(state.input_mode(), InputMode::Search(SearchFocus::Typing));

        state.nav.navigate(Route::TodoDetails(TodoId(1)));
        assert_eq!(state.input_mode(), InputMode::Normal);

        state.nav.navigate(Route::TodoForm);
        assert_eq!(state.input_mode(), InputMode::Form);
    }

    #[test]
    fn test_viewmodel_loading_then_list() {
        let state = state();
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.screen, ScreenView::Message(ref m) if m.message == "Loading tasks..."));

        let state = loaded(3);
        let vm = state.compute_viewmodel(24, 80);
        let ScreenView::List(list) = vm.screen else {
            panic!("expected list screen");
        };
        assert_eq!(list.rows.len(), 3);
        assert_eq!(list.rows[0].title, "task 1");
        assert!(list.rows[0].is_selected);
        assert_eq!(list.status_line, "3 of 3  Sort: newest");
        assert!(vm.fab.is_some());
    }

    #[test]
    fn test_top_bar_modes() {
        let mut state = loaded(1);
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(
            vm.top_bar,
            TopBarView::Normal { ref title, nav_icon: NavIcon::Close, .. } if title == "Todo Task"
        ));

        state.top_bar.toggle_search_bar();
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(
            vm.top_bar,
            TopBarView::Searching {
                text: "Search".into(),
                is_placeholder: true,
                trailing_label: "Close search".into(),
                typing: true,
            }
        );
    }

    #[test]
    fn test_list_windows_around_selection() {
        let mut state = loaded(50);
        for _ in 0..40 {
            state.list.move_selection_down(None);
        }

        let vm = state.compute_viewmodel(16, 80);
        let ScreenView::List(list) = vm.screen else {
            panic!("expected list screen");
        };
        assert_eq!(list.rows.len(), 16 - LIST_CHROME_ROWS);
        assert!(list.rows[list.selected_index].is_selected);
        assert_eq!(list.rows[list.selected_index].title, "task 41");
    }

    #[test]
    fn test_search_highlights_and_empty_search() {
        let mut state = loaded(3);
        state.top_bar.toggle_search_bar();
        state.top_bar.handle_searched_text_change("task 2");

        let ScreenView::List(list) = state.compute_viewmodel(24, 80).screen else {
            panic!("expected list screen");
        };
        assert_eq!(list.rows.len(), 1);
        assert!(!list.rows[0].highlight_ranges.is_empty());

        state.top_bar.handle_searched_text_change("zzz");
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.screen, ScreenView::Message(ref m) if m.message == "No tasks match \"zzz\"."));
    }

    #[test]
    fn test_detail_and_form_screens() {
        let mut state = loaded(2);
        let shown = item(2, "task 2");
        state.detail.open(TodoId(2), Some(&shown));
        state.nav.navigate(Route::TodoDetails(TodoId(2)));

        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.top_bar, TopBarView::Normal { ref title, nav_icon: NavIcon::Back, .. } if title == "Todo Details"));
        assert!(matches!(vm.screen, ScreenView::Detail(ref d) if d.title == "task 2" && !d.has_description));
        assert_eq!(vm.footer.keybindings, state.strings.get(StringKey::HintsDetail));

        state.detail.mark_not_found(TodoId(2));
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.screen, ScreenView::Message(ref m) if m.is_error));

        state.form.start_edit(&shown);
        state.nav.navigate(Route::TodoForm);
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.fab.is_none());
        let ScreenView::Form(form) = vm.screen else {
            panic!("expected form screen");
        };
        assert_eq!(form.subtitle.as_deref(), Some("Editing task #2"));
        assert_eq!(form.fields[0].value, "task 2");
        assert!(form.fields[0].focused);
    }

    #[test]
    fn test_failed_load_shows_retry() {
        let mut state = state();
        state.list.begin_load();
        state.list.fail_load("disk on fire");

        let vm = state.compute_viewmodel(24, 80);
        let ScreenView::Message(message) = vm.screen else {
            panic!("expected message screen");
        };
        assert_eq!(message.message, "Could not load tasks: disk on fire");
        assert_eq!(message.subtitle, "Press 'r' to retry.");
        assert!(message.is_error);
    }

    #[test]
    fn test_banner_is_observable() {
        let mut state = state();
        state.take_render();

        state.set_banner("delete task failed: boom".into());
        assert!(state.take_render());
        assert_eq!(state.banner(), Some("delete task failed: boom"));
        assert!(state.compute_viewmodel(24, 80).banner.is_some());

        state.clear_banner();
        state.clear_banner();
        assert!(state.take_render());
        assert!(!state.take_render());
    }
}
