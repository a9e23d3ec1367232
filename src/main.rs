//! Zellij plugin wrapper and entry point.
//!
//! This is the only place that talks to the Zellij host. It turns host events
//! into library [`Event`]s, runs the returned [`Action`]s and hands rendering
//! to the library.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← Screens, holders, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC (JSON)   │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │    ZodoWorker    │   │  ← Task store
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `Enter`: Open the selected task
//! - `Space`/`x`: Toggle done
//! - `d`: Delete the selected or shown task
//! - `a`/`n`: Add a task (the floating button)
//! - `e`: Edit the shown task
//! - `/`: Open search
//! - `s`: Cycle sort order
//! - `r`: Retry a failed load
//! - `Esc`: Back
//! - `q`: Close the plugin
//!
//! While typing a search:
//! - Characters and `Backspace` edit the query
//! - `Enter`: Submit or clear (the trailing action)
//! - `Down`/`Tab`: Move to the results
//! - `Esc`: Close search
//!
//! While browsing search results:
//! - `j`/`k`: Move, `Enter`: Open
//! - `/`: Back to the query
//! - `Esc`: Close search
//!
//! In the form:
//! - Characters and `Backspace` edit the focused field
//! - `Tab`: Next field
//! - `Enter`: Save
//! - `Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use zodo::app::view_state::SearchFocus;
use zodo::worker::{init_worker_tracing, TodoWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use zodo::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);
register_worker!(ZodoWorker, zodo_worker, ZODO_WORKER);

/// Plugin state wrapper.
struct State {
    app: zodo::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zodo::initialize(&Config::default()),
            worker_name: WORKER_NAME.to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, installs tracing, builds the app shell, then
    /// requests permissions. The store is opened once they are granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zodo::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = zodo::initialize(&config);

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
            EventType::Visible,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates the host event, runs it through `handle_event` and
    /// executes the resulting actions. Returns `true` to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - opening store");
                    Event::Startup
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - the task store is unavailable");
                    return false;
                }
            },
            zellij_tile::prelude::Event::Visible(visible) => Event::Visible(visible),
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zodo::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            _ => "Other".to_string(),
        }
    }

    /// Maps a key to an application event for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::MoveDown),
                BareKey::Char('p') => Some(Event::MoveUp),
                _ => None,
            };
        }

        match self.app.input_mode() {
            InputMode::Normal => Self::map_normal_key(key.bare_key),
            InputMode::Search(SearchFocus::Typing) => Self::map_search_input_key(key.bare_key),
            InputMode::Search(SearchFocus::Navigating) => Self::map_search_results_key(key.bare_key),
            InputMode::Form => Self::map_form_key(key.bare_key),
        }
    }

    fn map_normal_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::MoveDown,
            BareKey::Up | BareKey::Char('k') => Event::MoveUp,
            BareKey::Enter => Event::OpenSelected,
            BareKey::Char(' ' | 'x') => Event::ToggleCompleted,
            BareKey::Char('d') | BareKey::Delete => Event::DeleteCurrent,
            BareKey::Char('a' | 'n') => Event::Fab,
            BareKey::Char('e') => Event::EditCurrent,
            BareKey::Char('/') => Event::ToggleSearch,
            BareKey::Char('s') => Event::CycleSort,
            BareKey::Char('r') => Event::Retry,
            BareKey::Esc => Event::Back,
            BareKey::Char('q') => Event::CloseApp,
            _ => return None,
        })
    }

    fn map_search_input_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Enter => Event::SearchTrailing,
            BareKey::Esc => Event::ToggleSearch,
            BareKey::Down | BareKey::Tab => Event::FocusResults,
            BareKey::Backspace => Event::SearchBackspace,
            BareKey::Char(c) => Event::SearchChar(c),
            _ => return None,
        })
    }

    fn map_search_results_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::MoveDown,
            BareKey::Up | BareKey::Char('k') => Event::MoveUp,
            BareKey::Enter => Event::OpenSelected,
            BareKey::Char('/') => Event::FocusSearchInput,
            BareKey::Esc => Event::ToggleSearch,
            _ => return None,
        })
    }

    fn map_form_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Enter => Event::FormSubmit,
            BareKey::Esc => Event::FormCancel,
            BareKey::Tab => Event::FormNextField,
            BareKey::Backspace => Event::FormBackspace,
            BareKey::Char(c) => Event::FormChar(c),
            _ => return None,
        })
    }

    /// Decodes a worker response. Messages under other names are ignored.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes `message` and posts it to the worker. Serialization errors
    /// are logged, not propagated.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::ExitApp => {
                tracing::debug!("closing plugin");
                close_self();
            }
            Action::PostToWorker(message) => self.post_worker_message(message),
        }
    }
}

/// Worker thread entry. Wraps [`TodoWorker`] so the library stays free of
/// host calls.
#[derive(Default, serde::Serialize, serde::Deserialize)]
struct ZodoWorker {
    #[serde(skip)]
    inner: TodoWorker,
}

impl ZellijWorker<'_> for ZodoWorker {
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();
        tracing::debug!(message_name = %message, "worker message received");

        if let Some(payload) = self.inner.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: WORKER_NAME.to_string(),
                payload,
                worker_name: None,
            });
        }
    }
}
