//! Get command implementation.
//!
//! Prints the record of a single process.

use pidstat::ProcStatReader;
use tracing::warn;

use crate::config::Config;
use crate::output::render_record;

/// Prints one process's record. Fails if its status source cannot be read.
pub fn command_get(pid: &str, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let reader = ProcStatReader::new(config.proc_root());
    let outcome = reader.get_outcome(pid)?;

    if let Some(t) = &outcome.truncation {
        warn!(
            "Record for pid {} stopped at field {} ({}): {}",
            pid, t.field, t.index, t.source
        );
    }

    let out = render_record(&outcome.record, config.output_format(), &config.columns())?;
    print!("{}", out);
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}
