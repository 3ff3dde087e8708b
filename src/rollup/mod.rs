mod table;
pub use table::load_rollup_table;

use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

const OTHER: &str = "Other";

#[derive(Args)]
pub struct RollupArgs {
    /// Measures rollup table (CSV: parent, major, minor, measure)
    #[arg(short, long, env = "CEDAR_ROLLUP_TABLE")]
    pub table: PathBuf,

    /// Measures to roll up
    #[arg(required = true)]
    pub measures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupEntry {
    pub parent: String,
    pub subcategory_major: String,
    pub subcategory_minor: String,
    pub measure: String,
}

impl RollupEntry {
    fn other(measure: &str) -> Self {
        Self {
            parent: OTHER.to_string(),
            subcategory_major: OTHER.to_string(),
            subcategory_minor: OTHER.to_string(),
            measure: measure.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasuresArrays {
    pub measures: Vec<String>,
    pub measures_parents: Vec<String>,
    pub measures_subcategories_major: Vec<String>,
    pub measures_subcategories_minor: Vec<String>,
}

/// Measure term -> category ancestry. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct MeasuresRollup {
    entries: HashMap<String, RollupEntry>,
}

fn cell_or_other(cell: &Option<String>) -> String {
    match cell {
        Some(value) if !value.is_empty() => value.clone(),
        _ => OTHER.to_string(),
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

impl MeasuresRollup {
    /// Builds the lookup from table rows laid out as parent, major, minor,
    /// measure. Rows without a measure are skipped; later rows overwrite
    /// earlier ones for the same measure.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<Option<String>>>,
    {
        let mut entries = HashMap::new();

        for row in rows {
            let measure = match row.get(3) {
                Some(Some(m)) if !m.is_empty() => m.clone(),
                _ => continue,
            };

            let entry = RollupEntry {
                parent: cell_or_other(&row[0]),
                subcategory_major: cell_or_other(&row[1]),
                subcategory_minor: cell_or_other(&row[2]),
                measure: measure.clone(),
            };
            entries.insert(measure, entry);
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, measure: &str) -> RollupEntry {
        self.entries
            .get(measure)
            .cloned()
            .unwrap_or_else(|| RollupEntry::other(measure))
    }

    /// Deduplicates `measures` and collects the ancestry of each, all lists in
    /// first-occurrence order.
    pub fn process<S: AsRef<str>>(&self, measures: &[S]) -> MeasuresArrays {
        let mut arrays = MeasuresArrays::default();

        for measure in measures {
            let measure = measure.as_ref();
            if arrays.measures.iter().any(|m| m == measure) {
                continue;
            }
            arrays.measures.push(measure.to_string());

            let rollup = self.lookup(measure);
            push_unique(&mut arrays.measures_parents, &rollup.parent);
            push_unique(&mut arrays.measures_subcategories_major, &rollup.subcategory_major);
            push_unique(&mut arrays.measures_subcategories_minor, &rollup.subcategory_minor);
        }

        arrays
    }
}

pub fn run(args: RollupArgs) -> Result<()> {
    crate::init_tracing()?;

    let rollup = load_rollup_table(&args.table)?;
    info!("Loaded {} rollup measures", rollup.len());

    let arrays = rollup.process(&args.measures);
    println!("{}", serde_json::to_string_pretty(&arrays)?);

    Ok(())
}
