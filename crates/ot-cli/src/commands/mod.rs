//! CLI subcommand implementations.

pub mod overtime;
pub mod records;
pub mod settings;
pub mod summary;
pub mod util;
