//! Command-line tooling.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
