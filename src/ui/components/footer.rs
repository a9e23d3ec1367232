//! Bottom chrome: error banner, floating add button and key hints.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FabInfo, FooterInfo};

/// Renders the centered, dimmed key hints at `row`.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);

    let text_len = char_len(&help_text);
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the floating add button flush right at `row`.
pub fn render_fab(row: usize, fab: &FabInfo, theme: &Theme, cols: usize) -> usize {
    let label = format!(" {} ", fab.label);
    let len = char_len(&label);

    position_cursor(row, cols.saturating_sub(len + 1).max(1));
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.fab_fg));
    print!("{}", Theme::bg(&theme.colors.fab_bg));
    print!("{label}");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the transient error line at `row`.
pub fn render_banner(row: usize, banner: &str, theme: &Theme, cols: usize) -> usize {
    let text = truncate(&format!(" ! {banner}"), cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(char_len(&text))));
    print!("{}", Theme::reset());
    row + 1
}
