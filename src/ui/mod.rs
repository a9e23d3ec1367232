//! Terminal UI: view models, components and themes.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! - [`viewmodel`]: Render-ready types
//! - [`renderer`]: Entry point
//! - [`components`]: Per-element renderers and the frame layout
//! - [`helpers`]: Cursor, highlighting, truncation and wrapping
//! - [`theme`]: Color schemes and ANSI sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FabInfo, FooterInfo, FormFieldView, FormView, ListView,
    ScreenView, TopBarAction, TopBarView, UIViewModel,
};
