//! Zodo: a to-do list plugin for Zellij.
//!
//! Zodo keeps a list of tasks in a local JSON file and presents it as three
//! screens behind a persistent top bar:
//! - a searchable, sortable task list with a floating add button
//! - a detail screen for one task
//! - a create/edit form
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, navigation, view-state holders   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ Resources     │
//! │ (ui/)         │   │ (worker/)     │   │ (resources)   │
//! │ - Rendering   │   │ - Store access│   │ - Localized   │
//! │ - Theming     │   │ - IPC bridge  │   │   strings     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage Layer (storage/)                           │
//! │  - TodoStore trait, JSON file backend               │
//! └─────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - TodoItem, sort orders, fuzzy matching, errors    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zodo.wasm" {
//!         theme "catppuccin-latte"
//!         strings_file "~/.config/zodo/strings.toml"
//!         data_file "~/notes/todos.json"
//!         sort "open-first"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. `load` parses the [`Config`], installs tracing, builds the
//!    [`AppState`] with [`initialize`] and requests permissions.
//! 2. Once permissions are granted the shim sends `Event::Startup`, which
//!    posts `OpenStore` and `LoadTodos` to the worker.
//! 3. `TodosLoaded` fills the list holder and the shell re-renders.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod resources;
pub mod storage;
pub mod ui;
pub mod worker;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{Result, SortOrder, TodoError, TodoId, TodoItem};
pub use resources::{StringKey, Strings};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration read from the Zellij layout.
///
/// Every key is optional; missing or invalid values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Path to a TOML table overriding individual strings.
    pub strings_file: Option<String>,

    /// Store location, with `~` expanded to the host home mount. `None`
    /// uses `<data dir>/todos.json`.
    pub data_file: Option<String>,

    /// Initial list order.
    pub sort: SortOrder,

    /// Tracing filter, e.g. `debug` or `zodo=trace`. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use zodo::{Config, SortOrder};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_file".to_string(), "~/todos.json".to_string());
    /// map.insert("sort".to_string(), "title".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.data_file.as_deref(), Some("/host/todos.json"));
    /// assert_eq!(config.sort, SortOrder::Title);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let sort = value("sort").map_or_else(SortOrder::default, |name| {
            SortOrder::from_name(&name).unwrap_or_else(|| {
                tracing::debug!(sort = %name, "unknown sort order, using default");
                SortOrder::default()
            })
        });

        Self {
            theme_name: value("theme"),
            theme_file: value("theme_file").map(|p| infrastructure::expand_tilde(&p)),
            strings_file: value("strings_file").map(|p| infrastructure::expand_tilde(&p)),
            data_file: value("data_file").map(|p| infrastructure::expand_tilde(&p)),
            sort,
            trace_level: value("trace_level"),
        }
    }

    /// Resolves the theme: file first, then name, then the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }

    /// Resolves the string table: the embedded English table with the
    /// configured overrides applied, if they load.
    #[must_use]
    pub fn load_strings(&self) -> Strings {
        self.strings_file.as_ref().map_or_else(Strings::default, |path| {
            Strings::with_overrides(path).unwrap_or_else(|e| {
                tracing::debug!(strings_file = %path, error = %e, "failed to load strings, using defaults");
                Strings::default()
            })
        })
    }
}

/// Builds the app shell from `config`.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(sort = ?config.sort, "initializing zodo plugin");

    AppState::new(
        config.load_theme(),
        config.load_strings(),
        config.sort,
        config.data_file.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.load_theme(), Theme::default());
        assert_eq!(config.load_strings(), Strings::default());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("theme", "no-such-theme"),
            ("sort", "random"),
            ("data_file", "   "),
            ("strings_file", "/does/not/exist.toml"),
        ]));

        assert_eq!(config.sort, SortOrder::default());
        assert_eq!(config.data_file, None);
        assert_eq!(config.load_theme(), Theme::default());
        assert_eq!(config.load_strings(), Strings::default());
    }

    #[test]
    fn test_theme_name_and_file() {
        let config = Config::from_zellij(&map(&[("theme", "catppuccin-latte")]));
        assert_eq!(config.load_theme().name, "catppuccin-latte");

        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "not a theme").unwrap();
        let config = Config {
            theme_file: Some(file.path().display().to_string()),
            theme_name: Some("catppuccin-latte".into()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-latte");
    }

    #[test]
    fn test_initialize_applies_strings_and_sort() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "title_todo_list = \"Aufgaben\"\n").unwrap();

        let config = Config {
            strings_file: Some(file.path().display().to_string()),
            sort: SortOrder::OpenFirst,
            data_file: Some("/tmp/zodo.json".into()),
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.strings.get(StringKey::TitleTodoList), "Aufgaben");
        assert_eq!(state.list.sort(), SortOrder::OpenFirst);
        assert_eq!(state.data_file(), Some("/tmp/zodo.json"));
    }
}
