//! Shared rendering utilities.
//!
//! Everything here works on character indices rather than bytes, so task
//! titles with multi-byte characters highlight and truncate correctly.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in "..." when cut.
///
/// ```
/// use zodo::ui::helpers::truncate;
///
/// assert_eq!(truncate("Buy milk", 20), "Buy milk");
/// assert_eq!(truncate("Buy milk and eggs", 10), "Buy mil...");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if char_len(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut cut: String = text.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

/// Greedy word wrap to `width` characters. Words longer than a line are cut.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = vec![];

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = usize::from(!line.is_empty()) + char_len(word);
            if !line.is_empty() && char_len(&line) + needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
            while char_len(&line) > width {
                let head: String = line.chars().take(width).collect();
                line = line.chars().skip(width).collect();
                lines.push(head);
            }
        }
        lines.push(line);
    }

    lines
}

/// Clips highlight ranges to the first `len` characters.
#[must_use]
pub fn clip_ranges(ranges: &[(usize, usize)], len: usize) -> Vec<(usize, usize)> {
    ranges
        .iter()
        .filter(|(start, _)| *start < len)
        .map(|&(start, end)| (start, end.min(len)))
        .collect()
}

/// Prints `text` with the given character ranges in the match colors.
///
/// Highlighting is skipped on the selected row, whose background already
/// stands out. After each highlighted run the `restore` sequence is printed
/// so the row's own styling continues.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in &clip_ranges(ranges, chars.len()) {
        if start < current_pos {
            continue;
        }
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{restore}");

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Ünïcödé", 7), "Ünïcödé");
        assert_eq!(truncate("Ünïcödé!", 7), "Ünïc...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("buy milk and eggs", 8), vec!["buy milk", "and eggs"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn test_clip_ranges() {
        let ranges = [(0, 2), (4, 9), (12, 13)];
        assert_eq!(clip_ranges(&ranges, 6), vec![(0, 2), (4, 6)]);
        assert!(clip_ranges(&ranges, 0).is_empty());
    }
}
