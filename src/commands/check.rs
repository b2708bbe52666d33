//! Check command implementation.
//!
//! Validates the process root and configuration.

use pidstat::{ProcStatReader, FIELD_COUNT};

use crate::config::{validate_effective_config, Config};

/// Validates the process root and configuration.
pub fn command_check(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 pidstat - System Check");
    println!("=========================");

    let mut all_ok = true;
    let reader = ProcStatReader::new(config.proc_root());

    // Check process root
    println!("\n📁 Checking process root {}...", reader.root().display());
    match reader.get_all() {
        Ok(snapshot) if snapshot.is_empty() => {
            println!("   ❌ Root is listable but contains no readable processes");
            all_ok = false;
        }
        Ok(snapshot) => {
            let complete = snapshot.iter().filter(|(_, r)| r.is_complete()).count();
            println!("   ✅ Read {} process records", snapshot.len());
            println!(
                "   ℹ️  {} complete, {} partial ({} fields per record)",
                complete,
                snapshot.len() - complete,
                FIELD_COUNT
            );
        }
        Err(e) => {
            println!("   ❌ {}", e);
            all_ok = false;
        }
    }

    // Parse our own record
    println!("\n🧾 Checking record parsing...");
    let own_pid = std::process::id().to_string();
    match reader.get_outcome(&own_pid) {
        Ok(outcome) => match &outcome.truncation {
            None => println!("   ✅ pid {}: all {} fields parsed", own_pid, outcome.record.len()),
            Some(t) => println!(
                "   ⚠️  pid {}: {} fields parsed, stopped at '{}' (token {:?}: {})",
                own_pid,
                outcome.record.len(),
                t.field,
                t.token,
                t.source
            ),
        },
        Err(e) => println!("   ⚠️  {} (root may not be the live process root)", e),
    }

    // Check configuration
    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => {
            println!("   ✅ Configuration is valid");
        }
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review the output above");
        std::process::exit(1);
    }
}
