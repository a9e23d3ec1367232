//! Application layer: holders, navigation, events and actions.
//!
//! Data flows one way:
//!
//! ```text
//! Key / lifecycle event ─→ handle_event ─→ holder intents ─→ Actions ─→ worker
//!            ↑                                                             │
//!            └──────────────── WorkerResponse events ←─────────────────────┘
//! ```
//!
//! Holders notify the shell's render signal; the renderer reads their
//! snapshots through [`AppState::compute_viewmodel`].
//!
//! - [`actions`]: Side effects returned by the handler
//! - [`handler`]: Event processing
//! - [`modes`]: Input modes derived from the holders
//! - [`navigation`]: Routes, back stack and title mapping
//! - [`observable`]: Subscribe/notify value cells
//! - [`state`]: The app shell and view model computation
//! - [`view_state`]: One holder per piece of UI state

pub mod actions;
pub mod handler;
pub mod modes;
pub mod navigation;
pub mod observable;
pub mod state;
pub mod view_state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use navigation::{NavController, Route};
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SortOrder, TodoId};
    use crate::resources::Strings;
    use crate::ui::{ScreenView, Theme, TopBarView};
    use crate::worker::{TodoWorker, WorkerMessage, WorkerResponse};
    use std::path::Path;
    use tempfile::TempDir;

    /// Plugin state wired to a real worker over a JSON file, with the
    /// worker round trip run synchronously.
    struct Harness {
        state: AppState,
        worker: TodoWorker,
    }

    impl Harness {
        fn start(data_file: &Path) -> Self {
            let mut harness = Self {
                state: AppState::new(
                    Theme::default(),
                    Strings::default(),
                    SortOrder::NewestFirst,
                    Some(data_file.display().to_string()),
                ),
                worker: TodoWorker::default(),
            };
            harness.send(Event::Startup);
            harness
        }

        /// Handles `event`, feeds every worker request through the worker and
        /// returns the actions that are left for the host.
        fn send(&mut self, event: Event) -> Vec<Action> {
            let (_, actions) = handle_event(&mut self.state, &event).unwrap();
            let mut host_actions = vec![];
            for action in actions {
                match action {
                    Action::PostToWorker(message) => {
                        let response = self.worker.handle_message(message);
                        host_actions.extend(self.send(Event::WorkerResponse(response)));
                    }
                    other => host_actions.push(other),
                }
            }
            host_actions
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.send(Event::FormChar(c));
            }
        }

        fn create(&mut self, title: &str) {
            self.send(Event::Fab);
            self.type_text(title);
            self.send(Event::FormSubmit);
        }

        fn titles(&self) -> Vec<String> {
            self.state
                .list
                .visible_items(None)
                .iter()
                .map(|item| item.title.clone())
                .collect()
        }

        fn title(&self) -> String {
            match self.state.compute_viewmodel(24, 80).top_bar {
                TopBarView::Normal { title, .. } => title,
                TopBarView::Searching { .. } => panic!("top bar is searching"),
            }
        }
    }

    #[test]
    fn test_create_open_delete_flow() {
        let dir = TempDir::new().unwrap();
        let mut app = Harness::start(&dir.path().join("todos.json"));
        assert_eq!(app.title(), "Todo Task");

        app.send(Event::Fab);
        assert_eq!(app.state.nav.current_route(), Route::TodoForm);
        assert_eq!(app.title(), "Add Task");
        app.type_text("Buy milk");
        app.send(Event::FormSubmit);

        assert_eq!(app.state.nav.current_route(), Route::TodoList);
        assert_eq!(app.titles(), vec!["Buy milk".to_string()]);

        app.send(Event::OpenSelected);
        let id = match app.state.nav.current_route() {
            Route::TodoDetails(id) => id,
            other => panic!("expected detail route, got {other}"),
        };
        assert_eq!(app.title(), "Todo Details");
        assert!(matches!(
            app.state.compute_viewmodel(24, 80).screen,
            ScreenView::Detail(ref detail) if detail.title == "Buy milk"
        ));

        app.send(Event::DeleteCurrent);
        assert_eq!(app.state.nav.current_route(), Route::TodoList);
        assert!(app.titles().is_empty());
        assert!(matches!(
            app.worker.handle_message(WorkerMessage::get_todo(id)),
            WorkerResponse::TodoNotFound { id: missing, .. } if missing == id
        ));
    }

    #[test]
    fn test_fab_hidden_only_on_form() {
        let dir = TempDir::new().unwrap();
        let mut app = Harness::start(&dir.path().join("todos.json"));
        assert!(app.state.compute_viewmodel(24, 80).fab.is_some());

        app.send(Event::Fab);
        assert!(app.state.compute_viewmodel(24, 80).fab.is_none());
        app.send(Event::Fab);
        assert_eq!(app.state.nav.routes(), &[Route::TodoList, Route::TodoForm]);

        app.send(Event::FormCancel);
        assert_eq!(app.state.nav.current_route(), Route::TodoList);
        assert!(app.state.compute_viewmodel(24, 80).fab.is_some());
    }

    #[test]
    fn test_tasks_survive_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");

        let mut first = Harness::start(&path);
        first.create("Call mom");
        first.create("Water plants");
        first.send(Event::ToggleCompleted);

        let second = Harness::start(&path);
        assert_eq!(
            second.titles(),
            vec!["Water plants".to_string(), "Call mom".to_string()]
        );
        assert!(second.state.list.visible_items(None)[0].completed);
    }

    #[test]
    fn test_deleting_absent_id_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = Harness::start(&dir.path().join("todos.json"));
        app.create("Keep me");

        let response = app.worker.handle_message(WorkerMessage::delete_todo(TodoId(999)));
        assert_eq!(
            response,
            WorkerResponse::TodoDeleted {
                id: TodoId(999),
                existed: false
            }
        );
        app.send(Event::WorkerResponse(response));
        assert_eq!(app.titles(), vec!["Keep me".to_string()]);
        assert!(app.state.banner().is_none());
    }

    #[test]
    fn test_edit_from_detail_updates_list() {
        let dir = TempDir::new().unwrap();
        let mut app = Harness::start(&dir.path().join("todos.json"));
        app.create("Draft");

        app.send(Event::OpenSelected);
        app.send(Event::EditCurrent);
        assert_eq!(app.state.input_mode(), InputMode::Form);
        app.type_text(" v2");
        app.send(Event::FormSubmit);

        assert!(matches!(app.state.nav.current_route(), Route::TodoDetails(_)));
        assert_eq!(app.state.detail.item().map(|i| i.title.as_str()), Some("Draft v2"));
        app.send(Event::Back);
        assert_eq!(app.titles(), vec!["Draft v2".to_string()]);
    }

    #[test]
    fn test_back_at_root_exits() {
        let dir = TempDir::new().unwrap();
        let mut app = Harness::start(&dir.path().join("todos.json"));
        assert_eq!(app.send(Event::Back), vec![Action::ExitApp]);
    }
}
