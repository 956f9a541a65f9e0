//! Interaction timing recorder CLI library.
//!
//! This crate provides the CLI interface for replaying tracker operations.

mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands};
