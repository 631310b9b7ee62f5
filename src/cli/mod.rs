//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

pub mod commands;
mod config;
mod logging;
mod version;

pub use commands::OutputOptions;
pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::*;
pub use version::display_version;
