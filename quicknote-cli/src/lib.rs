//! QuickNote CLI Library
//!
//! Command-line definitions, note commands, server startup and exit codes
//! for the `quicknote` binary.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// CLI errors and their exit codes
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Logging setup for interactive commands and the stdio server
pub mod logging;
/// In-process execution of the MCP note tools
pub mod mcp_integration;
/// `quicknote note` subcommands
pub mod note;
/// `quicknote serve`
pub mod serve;
/// Graceful shutdown on Ctrl+C and SIGTERM
pub mod signal_handler;
