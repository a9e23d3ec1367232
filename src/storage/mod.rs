//! Storage layer for persistent task data.
//!
//! # Modules
//!
//! - `backend`: [`TodoStore`] trait the worker talks to
//! - `json`: JSON file implementation with atomic writes
//! - `models`: On-disk record type, separate from the domain model

pub mod backend;
pub mod json;
pub mod models;

pub use backend::TodoStore;
pub use json::JsonStorage;
pub use models::TodoRecord;
