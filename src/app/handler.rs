//! Event handling and state transitions.
//!
//! [`handle_event`] is the single entry point for key presses, lifecycle
//! events and worker responses. It mutates the holders through their intent
//! methods and returns the [`Action`]s the plugin shim must run, together
//! with whether any holder notified (and so whether to re-render).
//!
//! Worker answers are applied here too, so the holders never see raw store
//! errors: a stale id becomes the detail fallback, a failed load becomes the
//! list's failed state, a rejected submit stays on the form, and anything
//! else becomes the transient banner.

use super::navigation::{self, BackOutcome, Route};
use super::view_state::{FormCommand, LoadStatus, SearchFocus, TrailingAction};
use crate::app::{Action, AppState};
use crate::domain::error::{Result, TodoError};
use crate::domain::{TodoId, TodoItem};
use crate::resources::StringKey;
use crate::worker::messages::operation;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events from the plugin runtime and the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions were granted; open the store and load the list.
    Startup,
    /// The plugin pane was shown or hidden.
    Visible(bool),

    MoveUp,
    MoveDown,
    /// Opens the detail screen for the selected row.
    OpenSelected,
    /// Back glyph or Esc: pops a route, or exits at the root.
    Back,

    /// Opens or closes the search bar.
    ToggleSearch,
    SearchChar(char),
    SearchBackspace,
    /// Runs the search bar's trailing action (submit or clear).
    SearchTrailing,
    /// Moves keys from the search input to the results.
    FocusResults,
    /// Moves keys from the results back to the search input.
    FocusSearchInput,

    CycleSort,
    /// Deletes the selected row, or the task on the detail screen.
    DeleteCurrent,
    ToggleCompleted,
    /// The floating add button.
    Fab,
    /// Opens the form pre-filled with the current task.
    EditCurrent,

    FormChar(char),
    FormBackspace,
    FormNextField,
    FormSubmit,
    FormCancel,

    /// Reissues a failed or cancelled list load.
    Retry,
    CloseApp,

    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Events caused by the user, which dismiss the banner.
    const fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Self::Startup | Self::Visible(_) | Self::WorkerResponse(_)
        )
    }
}

/// Processes `event` and returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that touch
/// fallible resources.
#[allow(clippy::too_many_lines, clippy::unnecessary_wraps)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if event.is_user_input() {
        state.clear_banner();
    }

    let route = state.nav.current_route();
    let mut actions = vec![];

    match event {
        Event::Startup => {
            tracing::debug!(data_file = ?state.data_file(), "starting up");
            actions.push(Action::PostToWorker(WorkerMessage::open_store(
                state.data_file().map(String::from),
            )));
            actions.push(request_load(state));
        }
        Event::Visible(true) => {
            if state.list.needs_load() {
                actions.push(request_load(state));
            }
        }
        Event::Visible(false) => {
            state.list.cancel_load();
        }
        Event::MoveUp if route == Route::TodoList => {
            state.list.move_selection_up(state.top_bar.active_query());
        }
        Event::MoveDown if route == Route::TodoList => {
            state.list.move_selection_down(state.top_bar.active_query());
        }
        Event::OpenSelected if route == Route::TodoList => {
            if let Some(item) = state.list.selected_item(state.top_bar.active_query()).cloned() {
                tracing::debug!(todo_id = %item.id, "opening detail");
                state.detail.open(item.id, Some(&item));
                state.nav.navigate(Route::TodoDetails(item.id));
                actions.push(Action::PostToWorker(WorkerMessage::get_todo(item.id)));
            }
        }
        Event::Back => match route {
            Route::TodoForm => cancel_form(state),
            _ => match state.nav.back() {
                BackOutcome::Popped(current) => {
                    if !matches!(current, Route::TodoDetails(_)) {
                        state.detail.clear();
                    }
                }
                BackOutcome::ExitApp => actions.push(Action::ExitApp),
            },
        },
        Event::ToggleSearch if route == Route::TodoList => {
            state.top_bar.toggle_search_bar();
            state.list.clamp_selection(state.top_bar.active_query());
        }
        Event::SearchChar(c) if state.top_bar.is_searching() => {
            state.top_bar.push_char(*c);
            tracing::trace!(query = %state.top_bar.search().query, "search query updated");
            state.list.clamp_selection(state.top_bar.active_query());
        }
        Event::SearchBackspace if state.top_bar.is_searching() => {
            state.top_bar.pop_char();
            state.list.clamp_selection(state.top_bar.active_query());
        }
        Event::SearchTrailing => {
            if state.top_bar.activate_trailing() == Some(TrailingAction::Clear) {
                state.list.clamp_selection(state.top_bar.active_query());
            }
        }
        Event::FocusResults => state.top_bar.set_focus(SearchFocus::Navigating),
        Event::FocusSearchInput => state.top_bar.set_focus(SearchFocus::Typing),
        Event::CycleSort if route == Route::TodoList => {
            let sort = state.list.cycle_sort();
            tracing::debug!(sort = ?sort, "sort order changed");
        }
        Event::DeleteCurrent => {
            let id = match route {
                Route::TodoList => state.current_item().map(|item| item.id),
                Route::TodoDetails(_) => state.detail.view().id(),
                Route::TodoForm => None,
            };
            if let Some(id) = id {
                tracing::debug!(todo_id = %id, "deleting task");
                actions.push(Action::PostToWorker(WorkerMessage::delete_todo(id)));
                if matches!(route, Route::TodoDetails(_)) {
                    state.nav.back();
                    state.detail.clear();
                }
            }
        }
        Event::ToggleCompleted => {
            if let Some(item) = state.current_item() {
                actions.push(Action::PostToWorker(WorkerMessage::update_todo(item.toggled())));
            }
        }
        Event::Fab if navigation::show_fab(route) => {
            state.form.reset();
            state.nav.navigate(Route::TodoForm);
        }
        Event::EditCurrent => {
            if let Some(item) = state.current_item().cloned() {
                state.form.start_edit(&item);
                state.nav.navigate(Route::TodoForm);
            }
        }
        Event::FormChar(c) if route == Route::TodoForm => state.form.push_char(*c),
        Event::FormBackspace if route == Route::TodoForm => state.form.pop_char(),
        Event::FormNextField if route == Route::TodoForm => state.form.next_field(),
        Event::FormSubmit if route == Route::TodoForm => {
            if let Some(action) = submit_form(state) {
                actions.push(action);
            }
        }
        Event::FormCancel if route == Route::TodoForm => cancel_form(state),
        Event::Retry => {
            if matches!(
                state.list.status(),
                LoadStatus::Failed { .. } | LoadStatus::Cancelled
            ) {
                actions.push(request_load(state));
            }
        }
        Event::CloseApp => actions.push(Action::ExitApp),
        Event::WorkerResponse(response) => apply_response(state, response),
        _ => {
            tracing::trace!(route = %route, "event ignored on this route");
        }
    }

    Ok((state.take_render(), actions))
}

/// Starts a list load and builds its request.
fn request_load(state: &mut AppState) -> Action {
    let request_id = state.list.begin_load();
    Action::PostToWorker(WorkerMessage::load_todos(request_id, state.list.sort()))
}

fn cancel_form(state: &mut AppState) {
    state.form.reset();
    state.nav.back();
}

/// Validates the form and builds the store request. A rejected form keeps
/// its inline error and produces nothing.
fn submit_form(state: &mut AppState) -> Option<Action> {
    let command = match state.form.submit(&state.strings) {
        Ok(command) => command,
        Err(e) => {
            tracing::debug!(error = %e, "form submit rejected");
            return None;
        }
    };

    let message = match command {
        FormCommand::Create { title, description } => WorkerMessage::create_todo(title, description),
        FormCommand::Update {
            id,
            title,
            description,
        } => {
            let Some(base) = edited_item(state, id) else {
                state.form.fail_submit(&TodoError::NotFound(id).to_string());
                return None;
            };
            WorkerMessage::update_todo(TodoItem {
                title,
                description,
                updated_at: Some(chrono::Utc::now().timestamp()),
                ..base
            })
        }
    };

    Some(Action::PostToWorker(message))
}

fn edited_item(state: &AppState, id: TodoId) -> Option<TodoItem> {
    state
        .detail
        .item()
        .filter(|item| item.id == id)
        .or_else(|| state.list.item(id))
        .cloned()
}

/// Leaves the form after the store accepted it.
fn finish_form(state: &mut AppState) {
    state.form.reset();
    if state.nav.current_route() == Route::TodoForm {
        state.nav.back();
    }
}

fn apply_response(state: &mut AppState, response: &WorkerResponse) {
    match response {
        WorkerResponse::StoreOpened { count } => {
            tracing::debug!(count, "store opened");
        }
        WorkerResponse::TodosLoaded { request_id, todos } => {
            if state.list.apply_loaded(*request_id, todos.clone()) {
                tracing::debug!(request_id, count = todos.len(), "tasks loaded");
                state.list.clamp_selection(state.top_bar.active_query());
            }
        }
        WorkerResponse::TodoCreated { item } => {
            tracing::debug!(todo_id = %item.id, "task created");
            state.list.upsert(item.clone());
            if state.form.is_submitting() {
                finish_form(state);
            }
        }
        WorkerResponse::TodoUpdated { item } => {
            state.list.refresh(item);
            state.detail.apply_fetched(item);
            if state.form.is_submitting() && state.form.snapshot().editing == Some(item.id) {
                finish_form(state);
            }
        }
        WorkerResponse::TodoDeleted { id, existed } => {
            tracing::debug!(todo_id = %id, existed, "task deleted");
            if state.list.remove(*id) {
                state.list.clamp_selection(state.top_bar.active_query());
            }
            state.detail.mark_not_found(*id);
        }
        WorkerResponse::TodoFetched { item } => {
            state.detail.apply_fetched(item);
            state.list.refresh(item);
        }
        WorkerResponse::TodoNotFound { id, operation } => {
            let error = TodoError::NotFound(*id);
            tracing::debug!(operation = %operation, error = %error, "stale task id");
            state.detail.mark_not_found(*id);
            if state.list.remove(*id) {
                state.list.clamp_selection(state.top_bar.active_query());
            }
            if state.form.is_submitting() && state.form.snapshot().editing == Some(*id) {
                state.form.fail_submit(&error.to_string());
            }
        }
        WorkerResponse::Error {
            operation: failed,
            message,
        } => {
            if failed == operation::LOAD_TASKS {
                let error = TodoError::FetchFailure(message.clone());
                tracing::error!(error = %error, "list load failed");
                state.list.fail_load(message);
            } else if state.form.is_submitting()
                && (failed == operation::CREATE_TASK || failed == operation::UPDATE_TASK)
            {
                tracing::error!(operation = %failed, message = %message, "form submit failed");
                state.form.fail_submit(message);
            } else {
                tracing::error!(operation = %failed, message = %message, "worker error");
                let banner = state.strings.fill(
                    StringKey::BannerError,
                    &[("operation", failed.as_str()), ("message", message.as_str())],
                );
                state.set_banner(banner);
            }
        }
    }
}
