//! CLI command handlers
//!
//! This module contains the shell grammar and the runner that bridges
//! parsed lines to the session's command dispatch.

pub mod commands;
pub mod shell;

pub use commands::{ShellCommand, ShellInput};
pub use shell::{Flow, Shell};
