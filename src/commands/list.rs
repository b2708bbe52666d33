//! List command implementation.
//!
//! Prints a snapshot of every process under the process root.

use pidstat::ProcStatReader;
use tracing::debug;

use crate::config::Config;
use crate::output::render_snapshot;

/// Prints the full snapshot.
pub fn command_list(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let reader = ProcStatReader::new(config.proc_root());
    let snapshot = reader.get_all()?;
    debug!("Listing {} processes", snapshot.len());

    let out = render_snapshot(&snapshot, config.output_format(), &config.columns())?;
    print!("{}", out);
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}
