//! Render-ready view models.
//!
//! A [`UIViewModel`] is computed from the holder snapshots by
//! `AppState::compute_viewmodel()` and consumed by the renderer. It carries
//! only resolved strings and flags; deciding what to show happens while
//! computing it, never while printing it.

use crate::app::navigation::NavIcon;

/// Everything the renderer draws for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub top_bar: TopBarView,
    pub screen: ScreenView,
    /// Floating add button; `None` on the form route.
    pub fab: Option<FabInfo>,
    /// Transient error line above the footer.
    pub banner: Option<String>,
    pub footer: FooterInfo,
}

/// The two modes of the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopBarView {
    Normal {
        nav_icon: NavIcon,
        /// Resolved label of the navigation glyph ("Back" or "Close").
        nav_label: String,
        title: String,
        actions: Vec<TopBarAction>,
    },
    Searching {
        /// Query text, or the placeholder when the query is empty.
        text: String,
        is_placeholder: bool,
        trailing_label: String,
        /// Keys go to the input rather than the results.
        typing: bool,
    },
}

/// A keyboard shortcut shown at the trailing edge of the normal bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopBarAction {
    pub key: char,
    pub label: String,
}

/// Body of the active route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    List(ListView),
    Detail(DetailInfo),
    Form(FormView),
    /// Loading, empty, failed and not-found states.
    Message(EmptyState),
}

/// The windowed task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Count and sort line above the rows.
    pub status_line: String,
    pub rows: Vec<DisplayItem>,
    /// Index of the selected row within `rows`.
    pub selected_index: usize,
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    /// Relative age, e.g. "3h ago".
    pub age: String,
    pub completed: bool,
    pub is_selected: bool,
    /// Character ranges of `title` to highlight, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// The detail screen for a loaded task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    pub completed: bool,
    /// `(label, value)` pairs: status, created, updated.
    pub fields: Vec<(String, String)>,
    pub description_label: String,
    pub description: String,
    pub has_description: bool,
}

/// The create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Set while editing, e.g. "Editing task #4".
    pub subtitle: Option<String>,
    pub fields: Vec<FormFieldView>,
    pub error: Option<String>,
    /// "Saving..." while a submit is in flight.
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub label: String,
    pub value: String,
    pub focused: bool,
}

/// Centered two-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Render the message in the error color.
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabInfo {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
