//! CLI module
//!
//! Command-line interface over the blocking client.
//!
//! # Commands
//!
//! - `add` - Upload a resource
//! - `get` - Show one resource
//! - `delete` / `cancel-deletion` - Manage deletion
//! - `list` - First page, or every resource with `--all`
//! - `list-next` - Continue a listing from a cursor

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PayloadKind};
pub use runner::Runner;

#[cfg(test)]
mod tests;
