//! CLI module for the `fundrag` binary
//!
//! Command line argument parsing plus the handlers behind each
//! subcommand. Handlers are thin adapters over the answering pipeline.

pub mod commands;
pub mod handlers;

pub use commands::Cli;
pub use commands::Commands;
