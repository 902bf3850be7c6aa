//! Presentation layer for duel
//!
//! This crate contains CLI definitions, output formatters, and the
//! progress reporter that animates the debate in the terminal.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::typeout::typeout;
pub use progress::reporter::{DebateReporter, SimpleProgress};
