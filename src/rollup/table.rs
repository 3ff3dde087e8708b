use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use super::MeasuresRollup;

/// Load the measures rollup CSV (header row, then parent, major, minor,
/// measure). Empty cells collapse to "Other" when the table is built.
pub fn load_rollup_table<P: AsRef<Path>>(path: P) -> Result<MeasuresRollup> {
    let path = path.as_ref();
    debug!("Loading rollup table from {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open rollup table {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .with_context(|| format!("Failed to read row from {}", path.display()))?;
        let row: Vec<Option<String>> = record
            .iter()
            .map(|cell| {
                let cell = cell.trim();
                (!cell.is_empty()).then(|| cell.to_string())
            })
            .collect();
        rows.push(row);
    }

    Ok(MeasuresRollup::build(rows))
}
