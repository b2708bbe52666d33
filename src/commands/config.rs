//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let output = match output {
        Some(path) => path,
        None => PathBuf::from("pidstat.yaml"),
    };

    let content = match format {
        ConfigFormat::Yaml if commented => add_config_comments(render_config(&config, format)?),
        _ => render_config(&config, format)?,
    };

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# pidstat Configuration
# =====================
#
# Data Source
# -----------
# proc_root: "/proc"           # Process information root
#
# Output
# ------
# output_format: table         # table, json, yaml
# columns: [pid, ppid, state, num_threads, vsize, rss, comm]
#
# Server Configuration (pidstat serve)
# ------------------------------------
# bind: "0.0.0.0"              # Bind IP (0.0.0.0 = all interfaces)
# port: 9216                   # HTTP port
# enable_health: true          # Enable /health endpoint
# enable_metrics: true         # Enable /metrics endpoint
#
# Logging
# -------
# log_level: "warn"            # off, error, warn, info, debug, trace
"#;

    format!("{comments}\n{yaml}")
}
