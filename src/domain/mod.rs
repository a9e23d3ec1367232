//! Domain layer for the Zodo plugin.
//!
//! This module contains the core task types and the rules that do not depend on
//! Zellij, storage or rendering.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`todo`]: Task model and identifier
//! - [`ordering`]: Sort orders for the list
//! - [`search`]: Fuzzy matching and highlight ranges
//!
//! # Examples
//!
//! ```
//! use zodo::domain::{SortOrder, TodoId, TodoItem};
//!
//! let mut items = vec![
//!     TodoItem::new(TodoId(1), "b", None),
//!     TodoItem::new(TodoId(2), "a", None),
//! ];
//! SortOrder::Title.sort(&mut items);
//! assert_eq!(items[0].title, "a");
//! ```

pub mod error;
pub mod ordering;
pub mod search;
pub mod todo;

pub use error::{Result, TodoError};
pub use ordering::SortOrder;
pub use search::TodoMatcher;
pub use todo::{TodoId, TodoItem};
