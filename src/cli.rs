//! CLI arguments and subcommands for pidstat.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Output format for process records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Schema field kinds accepted by `fields --kind`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Text,
    Integer,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "pidstat",
    about = "Query /proc/<pid>/stat snapshots",
    long_about = "Query /proc/<pid>/stat snapshots.\n\n\
                  Parses the kernel's per-process status records into typed fields and \
                  filters them with compact conditions such as `rss gt:25600`.",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (overrides config)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print only the loaded user config file + full path and exit
    #[arg(long)]
    pub show_user_config: bool,

    /// Output format for --show-config*
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Process information root
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Output format for records
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Table columns (comma-separated field names)
    #[arg(long)]
    pub columns: Option<String>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the record of one process
    Get {
        /// Process identifier
        pid: String,
    },

    /// Print a snapshot of all processes (default)
    List,

    /// Print processes matching FIELD OPERATOR:VALUE
    #[command(after_help = "Operators: eq, ne, gt, lt. Example: pidstat filter rss gt:25600")]
    Filter {
        /// Field name followed by a condition
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List the record schema
    Fields {
        /// Only show fields of this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Validate the process root and configuration
    Check,

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },

    /// Serve snapshots over HTTP
    Serve {
        /// HTTP listen port
        #[arg(short = 'p', long)]
        port: Option<u16>,

        /// Bind to specific interface/IP
        #[arg(long)]
        bind: Option<IpAddr>,
    },
}
