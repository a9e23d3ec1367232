//! Component renderers and the frame layout.
//!
//! - [`top_bar`]: Title bar or search input
//! - [`list`]: Status line and task rows
//! - [`detail`]: One task's fields and description
//! - [`form`]: Create/edit fields
//! - [`empty`]: Centered message states
//! - [`footer`]: Banner, floating add button and key hints
//!
//! # Layout
//!
//! ```text
//! [Top bar]
//! [Border]
//! [Screen: list | detail | form | message]
//! [Banner, when set]
//! [FAB, flush right, when shown]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod form;
mod list;
mod top_bar;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ScreenView, UIViewModel};

/// Renders a horizontal border line at `row`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a full frame into a `rows` x `cols` pane.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 1;
    current_row = top_bar::render_top_bar(current_row, &vm.top_bar, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.max(current_row + 2);
    let bottom_border_row = footer_row - 1;
    let mut next_bottom = bottom_border_row;

    let fab_row = vm.fab.as_ref().map(|_| {
        next_bottom -= 1;
        next_bottom
    });
    let banner_row = vm.banner.as_ref().map(|_| {
        next_bottom -= 1;
        next_bottom
    });
    let last_screen_row = next_bottom.saturating_sub(1);

    match &vm.screen {
        ScreenView::List(view) => {
            list::render_list(current_row, view, theme, cols);
        }
        ScreenView::Detail(view) => {
            detail::render_detail(current_row, last_screen_row, view, theme, cols);
        }
        ScreenView::Form(view) => {
            form::render_form(current_row, view, theme, cols);
        }
        ScreenView::Message(view) => {
            empty::render_empty_state(current_row, view, theme, cols);
        }
    }

    if let (Some(row), Some(banner)) = (banner_row, &vm.banner) {
        footer::render_banner(row, banner, theme, cols);
    }
    if let (Some(row), Some(fab)) = (fab_row, &vm.fab) {
        footer::render_fab(row, fab, theme, cols);
    }
    render_border(bottom_border_row, &theme.colors.border, cols);
    footer::render_footer(footer_row, &vm.footer, theme, cols);
}
