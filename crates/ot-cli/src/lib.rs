//! Overtime savings CLI library.
//!
//! This crate provides the CLI interface for the overtime calculator.

mod cli;
pub mod commands;
mod config;
pub mod store;

pub use cli::{Cli, Commands, ConfigAction};
pub use config::Config;
