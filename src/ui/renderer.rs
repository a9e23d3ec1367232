//! Top-level rendering entry point.
//!
//! Rendering is two steps: compute the [`UIViewModel`] from the app state,
//! then hand it to the component layout. Output goes to stdout as ANSI text;
//! Zellij clears the pane before each render.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders an already computed view model.
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    components::render_frame(vm, theme, rows, cols);
}
