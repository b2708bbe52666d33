//! Filter command implementation.
//!
//! Builds a snapshot and prints the processes matching `FIELD OP:VALUE`.

use pidstat::{Filter, FilterArg, FilterSpec, ProcStatReader};
use tracing::debug;

use crate::config::Config;
use crate::output::render_snapshot;

/// Compiles the command-line arguments into a filter.
pub fn compile_args(args: &[String]) -> Result<Filter, pidstat::FilterError> {
    let args: Vec<FilterArg> = args.iter().map(|a| FilterArg::from(a.as_str())).collect();
    Filter::compile(FilterSpec::from_args(args)?)
}

/// Prints the processes matching the filter arguments.
pub fn command_filter(args: &[String], config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Fail on a bad filter before scanning anything
    let filter = compile_args(args)?;

    let reader = ProcStatReader::new(config.proc_root());
    let snapshot = reader.get_all()?;
    let matched = filter.apply(&snapshot);
    debug!("{} of {} processes matched", matched.len(), snapshot.len());

    let out = render_snapshot(&matched, config.output_format(), &config.columns())?;
    print!("{}", out);
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pidstat::FilterError;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compile_args_arity() {
        assert!(compile_args(&args(&["rss", "gt:300"])).is_ok());
        assert_eq!(
            compile_args(&args(&[])).map(|_| ()),
            Err(FilterError::Arity(0))
        );
        assert_eq!(
            compile_args(&args(&["rss", "gt", "300"])).map(|_| ()),
            Err(FilterError::Arity(3))
        );
    }

    #[test]
    fn test_compile_args_negative_literal() {
        assert!(compile_args(&args(&["tpgid", "eq:-1"])).is_ok());
    }
}
