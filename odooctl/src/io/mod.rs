//! I/O adapters for odooctl commands.

pub mod config;
pub mod editor;
pub mod picker;
pub mod process;
pub mod process_table;
pub mod workspaces;
