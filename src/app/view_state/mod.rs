//! View-state holders, one per piece of UI state.
//!
//! Each holder wraps its snapshot in an [`Observable`](super::observable::Observable)
//! and exposes intent methods. Screens only read snapshots; all mutation goes
//! through the holders.
//!
//! - [`top_bar`]: Search visibility, query and focus
//! - [`todo_list`]: Loaded tasks, load status, sort and selection
//! - [`todo_form`]: Create/edit form fields and validation
//! - [`todo_detail`]: The task shown on the detail screen

pub mod todo_detail;
pub mod todo_form;
pub mod todo_list;
pub mod top_bar;

pub use todo_detail::{DetailView, TodoDetailState};
pub use todo_form::{FormCommand, FormField, FormSnapshot, TodoFormState};
pub use todo_list::{ListSnapshot, LoadStatus, TodoListState};
pub use top_bar::{SearchFocus, SearchState, TopBarState, TrailingAction};
