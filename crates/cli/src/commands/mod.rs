//! Command handlers this plugin contributes.

pub mod list;

pub use list::ListCommand;
