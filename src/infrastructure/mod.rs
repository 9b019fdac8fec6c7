//! Infrastructure layer for the Zellij sandbox environment.
//!
//! Path handling where the host filesystem is mounted under `/host`.

pub mod paths;

pub use paths::{display_path, expand_tilde, get_data_dir};
