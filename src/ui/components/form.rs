//! Create/edit form renderer.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormFieldView, FormView};

const INDENT: usize = 2;
const CURSOR: &str = "▏";

/// Renders the form from `row`. Returns the next free row.
pub fn render_form(row: usize, form: &FormView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row + 1;

    if let Some(subtitle) = &form.subtitle {
        position_cursor(current_row, INDENT + 1);
        print!("{}{subtitle}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        current_row += 2;
    }

    for field in &form.fields {
        current_row = render_field(current_row, field, theme, cols);
    }

    if let Some(error) = &form.error {
        position_cursor(current_row, INDENT + 1);
        print!("{}{error}{}", Theme::fg(&theme.colors.error_fg), Theme::reset());
        current_row += 1;
    }

    if let Some(status) = &form.status {
        position_cursor(current_row, INDENT + 1);
        print!("{}{}{status}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim), Theme::reset());
        current_row += 1;
    }

    current_row
}

/// A label line and an underlined input line, then a blank spacer.
fn render_field(row: usize, field: &FormFieldView, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(INDENT * 2);
    let marker_color = if field.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, INDENT + 1);
    print!("{}", Theme::fg(marker_color));
    print!("{} ", if field.focused { "›" } else { " " });
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}", field.label);
    print!("{}", Theme::reset());

    let cursor = if field.focused { CURSOR } else { "" };
    let room = width.saturating_sub(2 + char_len(cursor));
    let value = if char_len(&field.value) > room {
        let skip = char_len(&field.value) - room;
        field.value.chars().skip(skip).collect()
    } else {
        field.value.clone()
    };

    position_cursor(row + 1, INDENT + 1);
    print!("  {}", Theme::fg(&theme.colors.text_normal));
    print!("{value}{cursor}");
    print!("{}", " ".repeat(room.saturating_sub(char_len(&value))));
    print!("{}", Theme::reset());

    position_cursor(row + 2, INDENT + 3);
    print!("{}", Theme::fg(marker_color));
    print!("{}", "─".repeat(width.saturating_sub(2)));
    print!("{}", Theme::reset());

    row + 4
}
