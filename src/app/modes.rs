//! Input modes.
//!
//! The mode decides how the plugin shim maps raw keys onto [`Event`]s. It is
//! derived from the holders, never stored: the search bar's visibility and
//! focus pick the search modes, and the form route picks [`InputMode::Form`].
//!
//! [`Event`]: super::handler::Event

use super::view_state::SearchFocus;

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and commands on the list and detail screens.
    ///
    /// Keybindings: j/k (move), Enter (open), Space (toggle done), d (delete),
    /// / (search), s (sort), a (add), e (edit), r (retry), Esc (back), q (quit).
    Normal,

    /// The search bar is open. Carries whether keys edit the query or move
    /// through the results.
    Search(SearchFocus),

    /// The create/edit form has focus; characters go to the focused field.
    Form,
}

impl InputMode {
    /// Returns `true` when printable characters are text input rather than
    /// commands.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing) | Self::Form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_text() {
        assert!(InputMode::Form.captures_text());
        assert!(InputMode::Search(SearchFocus::Typing).captures_text());
        assert!(!InputMode::Search(SearchFocus::Navigating).captures_text());
        assert!(!InputMode::Normal.captures_text());
    }
}
