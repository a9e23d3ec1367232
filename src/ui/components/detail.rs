//! Detail screen renderer.

use crate::ui::helpers::{char_len, position_cursor, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const INDENT: usize = 2;

/// Renders the task between `row` and `last_row` (inclusive). Returns the next
/// free row.
pub fn render_detail(row: usize, last_row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(INDENT * 2);
    let mut current_row = row + 1;

    position_cursor(current_row, INDENT + 1);
    print!("{}", Theme::bold());
    if detail.completed {
        print!("{}✓ ", Theme::fg(&theme.colors.completed_fg));
    }
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", truncate(&detail.title, width.saturating_sub(2)));
    print!("{}", Theme::reset());
    current_row += 2;

    let label_width = detail
        .fields
        .iter()
        .map(|(label, _)| char_len(label))
        .max()
        .unwrap_or(0);
    for (label, value) in &detail.fields {
        if current_row > last_row {
            return current_row;
        }
        position_cursor(current_row, INDENT + 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{label:<label_width$}  ");
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", truncate(value, width.saturating_sub(label_width + 2)));
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row += 1;

    if current_row > last_row {
        return current_row;
    }
    position_cursor(current_row, INDENT + 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}", detail.description_label);
    print!("{}", Theme::reset());
    current_row += 1;

    let style = if detail.has_description {
        Theme::fg(&theme.colors.text_normal)
    } else {
        format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))
    };
    for line in wrap(&detail.description, width) {
        if current_row > last_row {
            break;
        }
        position_cursor(current_row, INDENT + 1);
        print!("{style}{line}{}", Theme::reset());
        current_row += 1;
    }

    current_row
}
