//! Top bar renderer: the normal title bar or the single-line search input.

use crate::app::navigation::NavIcon;
use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{TopBarAction, TopBarView};

const SEARCH_GLYPH: &str = "⌕";
const CURSOR: &str = "▏";

const fn nav_glyph(icon: NavIcon) -> &'static str {
    match icon {
        NavIcon::Back => "←",
        NavIcon::Close => "✕",
    }
}

fn action_hint(action: &TopBarAction) -> String {
    match action.key {
        ' ' => format!("Space {}", action.label),
        key => format!("{key} {}", action.label),
    }
}

/// Renders the top bar at `row` and returns the next free row.
pub fn render_top_bar(row: usize, view: &TopBarView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    match view {
        TopBarView::Normal {
            nav_icon,
            nav_label,
            title,
            actions,
        } => render_normal(*nav_icon, nav_label, title, actions, theme, cols),
        TopBarView::Searching {
            text,
            is_placeholder,
            trailing_label,
            typing,
        } => render_searching(text, *is_placeholder, trailing_label, *typing, theme, cols),
    }

    print!("{}", Theme::reset());
    row + 1
}

fn render_normal(
    nav_icon: NavIcon,
    nav_label: &str,
    title: &str,
    actions: &[TopBarAction],
    theme: &Theme,
    cols: usize,
) {
    let nav = format!(" {} {nav_label}  ", nav_glyph(nav_icon));
    let title = truncate(title, cols.saturating_sub(char_len(&nav)));
    let left_len = char_len(&nav) + char_len(&title);

    let hints: Vec<String> = actions.iter().map(action_hint).collect();
    let right = format!("{} ", hints.join("  "));
    let right_len = char_len(&right);
    let show_right = !actions.is_empty() && left_len + right_len + 1 <= cols;

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{nav}");
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}", Theme::reset());
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    if show_right {
        print!("{}", " ".repeat(cols - left_len - right_len));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{right}");
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(left_len)));
    }
}

fn render_searching(
    text: &str,
    is_placeholder: bool,
    trailing_label: &str,
    typing: bool,
    theme: &Theme,
    cols: usize,
) {
    let trailing = format!("Enter {trailing_label} ");
    let lead = format!(" {SEARCH_GLYPH} ");
    let cursor = if typing { CURSOR } else { "" };
    let room = cols.saturating_sub(char_len(&lead) + char_len(&trailing) + char_len(cursor) + 1);
    let text = truncate(text, room);

    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("{lead}");
    if is_placeholder {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{cursor}{text}");
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{text}{cursor}");
    }

    let used = char_len(&lead) + char_len(&text) + char_len(cursor);
    print!("{}", " ".repeat(cols.saturating_sub(used + char_len(&trailing))));
    if used + char_len(&trailing) <= cols {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{trailing}");
    }
}
