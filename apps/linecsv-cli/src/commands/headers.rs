use linecsv_scheme::{CsvScheme, FileTap};
use std::path::PathBuf;
use tracing::debug;

use crate::config::DialectArgs;
use crate::error::CliResult;

/// Resolve the field names of `input` and print them, one per line.
pub fn execute(input: PathBuf, dialect: DialectArgs) -> CliResult<()> {
    let scheme = CsvScheme::new(dialect.to_config()?)?;
    let tap = FileTap::new(&input);

    let fields = scheme.resolve_fields(&tap)?;
    debug!("Resolved {} fields from {}", fields.len(), input.display());

    for name in fields.iter() {
        println!("{}", name);
    }
    Ok(())
}
