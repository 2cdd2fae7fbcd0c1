//! Command handlers for CLI subcommands
//!
//! Each handler takes its parsed arguments, the loaded configuration and the
//! output writer, and returns an error carrying the process exit code.

mod bindings;
mod check;
mod completions;
mod config;
mod utils;

pub use bindings::handle_bindings;
pub use check::handle_check;
pub use completions::handle_completions;
pub use config::handle_config;
