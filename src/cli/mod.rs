//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! the terminal page and the app runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod page;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_page, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use page::{PageCommand, TerminalView};
pub use presenter::Presenter;
