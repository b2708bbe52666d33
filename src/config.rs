//! Configuration management for pidstat.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use clap::ValueEnum;
use pidstat::{schema, DEFAULT_PROC_ROOT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::{Args, Commands, ConfigFormat, LogLevel, OutputFormat};

// Default configuration constants
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9216;
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_COLUMNS: [&str; 7] = ["pid", "ppid", "state", "num_threads", "vsize", "rss", "comm"];

/// Effective configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Data source
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    // Server configuration
    pub port: Option<u16>,
    pub bind: Option<String>,

    // Output
    #[serde(alias = "output-format")]
    pub output_format: Option<OutputFormat>,
    pub columns: Option<Vec<String>>,

    // Feature flags
    #[serde(alias = "enable-health")]
    pub enable_health: Option<bool>,
    #[serde(alias = "enable-metrics")]
    pub enable_metrics: Option<bool>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            port: Some(DEFAULT_PORT),
            bind: Some(DEFAULT_BIND_ADDR.to_string()),
            output_format: Some(OutputFormat::Table),
            columns: Some(DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect()),
            enable_health: Some(true),
            enable_metrics: Some(true),
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
        }
    }
}

impl Config {
    pub fn proc_root(&self) -> PathBuf {
        self.proc_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT))
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or(OutputFormat::Table)
    }

    pub fn columns(&self) -> Vec<String> {
        self.columns
            .clone()
            .unwrap_or_else(|| DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect())
    }

    /// Log level from the config file, if it names a known level.
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level
            .as_deref()
            .and_then(|s| LogLevel::from_str(s, true).ok())
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(root) = &cfg.proc_root {
        if root.as_os_str().is_empty() {
            return Err("proc_root must not be empty".into());
        }
    }

    if let Some(bind) = cfg.bind.as_deref() {
        if bind.parse::<IpAddr>().is_err() {
            return Err(format!("Invalid bind address '{}'", bind).into());
        }
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if LogLevel::from_str(level, true).is_err() {
            return Err(format!(
                "Invalid log_level '{}', expected one of off, error, warn, info, debug, trace",
                level
            )
            .into());
        }
    }

    if let Some(columns) = &cfg.columns {
        if columns.is_empty() {
            return Err("columns must name at least one field".into());
        }
        if let Some(unknown) = columns.iter().find(|c| schema::lookup(c).is_none()) {
            return Err(format!("Unknown column '{}'", unknown).into());
        }
    }

    Ok(())
}

/// Splits a comma-separated list, dropping empty entries.
fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(format) = args.format {
        config.output_format = Some(format);
    }
    if let Some(columns) = &args.columns {
        config.columns = Some(split_list(columns));
    }

    if let Some(Commands::Serve { port, bind }) = &args.command {
        if let Some(port) = port {
            config.port = Some(*port);
        }
        if let Some(bind) = bind {
            config.bind = Some(bind.to_string());
        }
    }

    Ok(config)
}

/// Loads configuration from an explicit path or the default locations.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let defaults = [
                "/etc/pidstat/pidstat.yaml",
                "/etc/pidstat/pidstat.yml",
                "/etc/pidstat/pidstat.json",
                "./pidstat.yaml",
                "./pidstat.yml",
                "./pidstat.json",
            ];

            match defaults.iter().find(|p| Path::new(p).exists()) {
                Some(p) => PathBuf::from(p),
                None => return Ok(Config::default()),
            }
        }
    };

    if !path.exists() {
        return Err(format!("Config file not found: {}", path.display()).into());
    }

    let content = fs::read_to_string(&path)?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

/// Renders configuration in the requested format.
pub fn render_config(config: &Config, format: ConfigFormat) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(
    config: &Config,
    format: ConfigFormat,
    user_config: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = render_config(config, format)?;

    if user_config {
        println!("User configuration (effective values):");
    }
    println!("{output}");
    Ok(())
}
