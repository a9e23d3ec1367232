//! Fuzzy task matching for the search bar.
//!
//! A query is split on whitespace and lowercased. A task matches when every
//! token fuzzy-matches its title or its description. The same matcher also
//! produces highlight ranges for the title column.

use super::todo::TodoItem;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Compiled search query.
pub struct TodoMatcher {
    matcher: SkimMatcherV2,
    query: String,
    tokens: Vec<String>,
}

impl TodoMatcher {
    /// Builds a matcher, or `None` when the query has no tokens (which means
    /// "no filter").
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return None;
        }

        Some(Self {
            matcher: SkimMatcherV2::default(),
            query: query.trim().to_string(),
            tokens,
        })
    }

    /// Returns `true` if every token matches the title or the description.
    #[must_use]
    pub fn matches(&self, item: &TodoItem) -> bool {
        let title = item.title.to_lowercase();
        let description = item.description.as_deref().unwrap_or_default().to_lowercase();

        self.tokens.iter().all(|token| {
            self.matcher.fuzzy_match(&title, token).is_some()
                || self.matcher.fuzzy_match(&description, token).is_some()
        })
    }

    /// Computes character ranges of `text` to highlight, as `(start, end)` pairs
    /// with an exclusive end. Consecutive matched indices are coalesced.
    #[must_use]
    pub fn highlight_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        let Some((_score, indices)) = self.matcher.fuzzy_indices(text, &self.query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }
}

impl std::fmt::Debug for TodoMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoMatcher")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoId;

    fn item(title: &str, description: Option<&str>) -> TodoItem {
        let mut item = TodoItem::new(TodoId(1), title, description.map(String::from));
        item.created_at = 0;
        item
    }

    #[test]
    fn test_blank_query_is_no_filter() {
        assert!(TodoMatcher::new("").is_none());
        assert!(TodoMatcher::new("   ").is_none());
    }

    #[test]
    fn test_matches_title_or_description() {
        let m = TodoMatcher::new("milk").unwrap();
        assert!(m.matches(&item("Buy milk", None)));
        assert!(m.matches(&item("Groceries", Some("eggs and milk"))));
        assert!(!m.matches(&item("Call mom", None)));
    }

    #[test]
    fn test_all_tokens_must_match() {
        let m = TodoMatcher::new("buy eggs").unwrap();
        assert!(m.matches(&item("Buy", Some("eggs"))));
        assert!(!m.matches(&item("Buy milk", None)));
    }

    #[test]
    fn test_highlight_ranges_coalesce() {
        let m = TodoMatcher::new("buy").unwrap();
        assert_eq!(m.highlight_ranges("buy milk"), vec![(0, 3)]);
        assert!(m.highlight_ranges("xyz").is_empty());
    }
}
