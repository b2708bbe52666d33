//! Fields command implementation.
//!
//! Lists the record schema.

use pidstat::{schema, FieldKind};

use crate::cli::KindArg;

/// Lists schema fields, optionally restricted to one kind.
pub fn command_fields(kind: Option<KindArg>) -> Result<(), Box<dyn std::error::Error>> {
    let wanted = kind.map(|k| match k {
        KindArg::Text => FieldKind::Text,
        KindArg::Integer => FieldKind::Integer,
    });

    println!("{:<5}  {:<22}  KIND", "INDEX", "NAME");
    for field in schema::fields().filter(|f| wanted.map_or(true, |k| f.kind == k)) {
        println!("{:<5}  {:<22}  {}", field.index, field.name, field.kind);
    }
    Ok(())
}
