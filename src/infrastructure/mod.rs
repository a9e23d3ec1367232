//! Filesystem helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`.

pub mod paths;

pub use paths::{default_data_file, expand_tilde, get_data_dir};
