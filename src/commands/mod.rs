//! CLI command implementations for pidstat.
//!
//! This module provides implementations for all CLI subcommands:
//! - `get`: Single process record
//! - `list`: Full snapshot
//! - `filter`: Filtered snapshot
//! - `fields`: Schema listing
//! - `check`: System validation
//! - `config`: Configuration file generation
//! - `serve`: HTTP query service

pub mod check;
pub mod config;
pub mod fields;
pub mod filter;
pub mod get;
pub mod list;
pub mod serve;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use fields::command_fields;
pub use filter::command_filter;
pub use get::command_get;
pub use list::command_list;
pub use serve::command_serve;
