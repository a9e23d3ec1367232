//! Localized user-facing strings.
//!
//! Every label, title, hint, icon description and empty-state message is looked
//! up through a [`StringKey`]. The English table is embedded from
//! `resources/strings/en.toml`; a user file given as `strings_file` in the
//! plugin configuration overrides individual keys.
//!
//! # TOML Format
//!
//! A flat table of `key = "text"` pairs. Keys are the snake_case names of
//! [`StringKey`] variants. Text may contain `{name}` placeholders, filled by
//! [`Strings::fill`].
//!
//! ```toml
//! title_todo_list = "Tâches"
//! search_placeholder = "Rechercher"
//! ```

use crate::domain::error::{Result, TodoError};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

const EMBEDDED_EN: &str = include_str!("../resources/strings/en.toml");

macro_rules! string_keys {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Identifier of a user-facing string.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StringKey {
            $($variant,)*
        }

        impl StringKey {
            /// Every key, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Name of the key in string tables.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

string_keys! {
    AppName => "app_name",
    TitleTodoList => "title_todo_list",
    TitleTodoDetails => "title_todo_details",
    TitleAddTask => "title_add_task",
    SearchPlaceholder => "search_placeholder",
    IconBack => "icon_back",
    IconClose => "icon_close",
    IconSearch => "icon_search",
    IconSort => "icon_sort",
    IconDelete => "icon_delete",
    IconEdit => "icon_edit",
    IconToggle => "icon_toggle",
    IconSubmit => "icon_submit",
    IconClear => "icon_clear",
    IconAdd => "icon_add",
    FabLabel => "fab_label",
    SortNewestFirst => "sort_newest_first",
    SortOldestFirst => "sort_oldest_first",
    SortTitle => "sort_title",
    SortOpenFirst => "sort_open_first",
    ListCount => "list_count",
    EmptyList => "empty_list",
    EmptySearch => "empty_search",
    Loading => "loading",
    LoadFailed => "load_failed",
    RetryHint => "retry_hint",
    LoadCancelled => "load_cancelled",
    StatusDone => "status_done",
    StatusOpen => "status_open",
    DetailStatus => "detail_status",
    DetailCreated => "detail_created",
    DetailUpdated => "detail_updated",
    DetailDescription => "detail_description",
    DetailNoDescription => "detail_no_description",
    DetailNotFound => "detail_not_found",
    DetailBackHint => "detail_back_hint",
    FormTitleLabel => "form_title_label",
    FormDescriptionLabel => "form_description_label",
    FormTitleRequired => "form_title_required",
    FormSaving => "form_saving",
    FormEditing => "form_editing",
    BannerError => "banner_error",
    HintsList => "hints_list",
    HintsSearchTyping => "hints_search_typing",
    HintsSearchNavigating => "hints_search_navigating",
    HintsDetail => "hints_detail",
    HintsForm => "hints_form",
    HintsNotFound => "hints_not_found",
}

impl StringKey {
    /// Looks a key up by its table name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }
}

/// A resolved string table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strings {
    table: HashMap<StringKey, String>,
}

impl Strings {
    /// Parses a string table. Unknown keys are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Strings`] if the TOML is malformed or a value is
    /// not a string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = toml::from_str(contents)
            .map_err(|e| TodoError::Strings(format!("failed to parse strings TOML: {e}")))?;

        let mut table = HashMap::with_capacity(raw.len());
        for (name, text) in raw {
            match StringKey::from_name(&name) {
                Some(key) => {
                    table.insert(key, text);
                }
                None => tracing::warn!(key = %name, "ignoring unknown string key"),
            }
        }

        Ok(Self { table })
    }

    /// Loads the embedded English table and applies overrides from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the override file cannot be read or parsed.
    pub fn with_overrides<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| TodoError::Strings(format!("failed to read strings file: {e}")))?;
        let overrides = Self::from_toml(&contents)?;

        let mut strings = Self::default();
        tracing::debug!(count = overrides.table.len(), "applying string overrides");
        strings.table.extend(overrides.table);
        Ok(strings)
    }

    /// Returns the text for `key`, or the key's name if the table lacks it.
    #[must_use]
    pub fn get(&self, key: StringKey) -> &str {
        self.table.get(&key).map_or(key.name(), String::as_str)
    }

    /// Returns the text for `key` with `{name}` placeholders replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use zodo::resources::{StringKey, Strings};
    ///
    /// let strings = Strings::default();
    /// assert_eq!(
    ///     strings.fill(StringKey::DetailNotFound, &[("id", "7")]),
    ///     "Task #7 no longer exists."
    /// );
    /// ```
    #[must_use]
    pub fn fill(&self, key: StringKey, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.get(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}

impl Default for Strings {
    /// Returns the embedded English table.
    ///
    /// # Panics
    ///
    /// Panics if the embedded table fails to parse, which a unit test rules out.
    fn default() -> Self {
        Self::from_toml(EMBEDDED_EN).expect("embedded English strings should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_table_covers_every_key() {
        let strings = Strings::default();
        for key in StringKey::ALL {
            assert!(
                strings.table.contains_key(key),
                "missing embedded string for {}",
                key.name()
            );
        }
    }

    #[test]
    fn test_titles_and_placeholder() {
        let strings = Strings::default();
        assert_eq!(strings.get(StringKey::TitleTodoList), "Todo Task");
        assert_eq!(strings.get(StringKey::TitleTodoDetails), "Todo Details");
        assert_eq!(strings.get(StringKey::TitleAddTask), "Add Task");
        assert_eq!(strings.get(StringKey::AppName), "Todo App");
        assert_eq!(strings.get(StringKey::SearchPlaceholder), "Search");
    }

    #[test]
    fn test_missing_key_falls_back_to_name() {
        let strings = Strings::from_toml("app_name = \"Zodo\"").unwrap();
        assert_eq!(strings.get(StringKey::AppName), "Zodo");
        assert_eq!(strings.get(StringKey::EmptyList), "empty_list");
    }

    #[test]
    fn test_overrides_merge_with_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "search_placeholder = \"Rechercher\"\nnot_a_key = \"x\"\n",
        )
        .unwrap();

        let strings = Strings::with_overrides(file.path()).unwrap();
        assert_eq!(strings.get(StringKey::SearchPlaceholder), "Rechercher");
        assert_eq!(strings.get(StringKey::TitleTodoList), "Todo Task");
    }

    #[test]
    fn test_malformed_table_is_error() {
        assert!(matches!(
            Strings::from_toml("title_todo_list = 3"),
            Err(TodoError::Strings(_))
        ));
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in StringKey::ALL {
            assert_eq!(StringKey::from_name(key.name()), Some(*key));
        }
    }
}
