//! pidstat - version 0.1.0
//!
//! Command line front end for /proc/<pid>/stat snapshots with tracing logging.
//! This is the main entry point that resolves configuration and dispatches subcommands.

mod cli;
mod commands;
mod config;
mod handlers;
mod metrics;
mod output;
mod state;

use clap::Parser;
use tracing::{debug, level_filters::LevelFilter};

use cli::{Args, Commands, LogLevel};
use commands::{
    command_check, command_config, command_fields, command_filter, command_get, command_list,
    command_serve,
};
use config::{resolve_config, show_config, validate_effective_config, Config};

/// Initializes tracing logging subsystem with configured log level.
///
/// Precedence: `--log-level` > config file > warn. Logs go to stderr so
/// record output on stdout stays machine-readable.
fn setup_logging(config: &Config, args: &Args) {
    let level = args
        .log_level
        .or_else(|| config.log_level())
        .unwrap_or(LogLevel::Warn);

    let filter = match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("⚠️  Tracing subscriber already set");
    }

    debug!("Logging initialized with level: {:?}", level);
}

/// Helper function to load and validate configuration.
/// Exits the process with error code 1 if validation fails.
fn load_validated_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }
    Ok(config)
}

/// Main application entry point.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Early config resolution for show/check modes
    if args.show_config || args.show_user_config || args.check_config {
        let config = resolve_config(&args)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("❌ Configuration invalid: {}", e);
                std::process::exit(1);
            }
            println!("✅ Configuration is valid");
            return Ok(());
        }

        return show_config(&config, args.config_format, args.show_user_config);
    }

    // Commands that never read the process root skip config validation
    match &args.command {
        Some(Commands::Fields { kind }) => return command_fields(*kind),
        Some(Commands::Config {
            output,
            format,
            commented,
        }) => return command_config(output.clone(), *format, *commented),
        _ => {}
    }

    let config = load_validated_config(&args)?;
    setup_logging(&config, &args);

    match args.command.clone().unwrap_or(Commands::List) {
        Commands::Get { pid } => command_get(&pid, &config),
        Commands::List => command_list(&config),
        Commands::Filter { args: filter_args } => command_filter(&filter_args, &config),
        Commands::Check => command_check(&config),
        Commands::Serve { .. } => Ok(command_serve(config).await?),
        Commands::Fields { .. } | Commands::Config { .. } => Ok(()),
    }
}
