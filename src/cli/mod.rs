//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `init` - Bootstrap or verify the storage file

pub mod args;

pub use args::{Cli, Commands};
