//! Task list renderer: a status line followed by one row per task.

use crate::ui::helpers::{self, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ListView};

/// Renders the status line and the rows. Returns the next free row.
pub fn render_list(row: usize, list: &ListView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_status_line(row, &list.status_line, theme, cols);
    for item in &list.rows {
        current_row = render_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_status_line(row: usize, text: &str, theme: &Theme, cols: usize) -> usize {
    let text = helpers::truncate(&format!(" {text}"), cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(char_len(&text))));
    print!("{}", Theme::reset());
    row + 1
}

/// One task row:
///
/// ```text
///  [x] Title with highlights                      3h ago
/// ```
///
/// The selected row is padded to full width so its background spans the pane.
fn render_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    let checkbox = if item.completed { "[x]" } else { "[ ]" };
    if item.completed && !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.completed_fg));
    }
    print!(" {checkbox} ");

    let title_style = if item.completed {
        format!("{base}{}", Theme::strike())
    } else {
        base.clone()
    };
    print!("{title_style}");
    helpers::render_highlighted_text(
        &item.title,
        &item.highlight_ranges,
        theme,
        item.is_selected,
        &title_style,
    );
    print!("{}{base}", Theme::reset());

    let used = 5 + char_len(&item.title);
    let age_len = char_len(&item.age);
    if used + age_len + 1 <= cols {
        print!("{}", " ".repeat(cols - used - age_len - 1));
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{} ", item.age);
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }

    print!("{}", Theme::reset());
    row + 1
}
