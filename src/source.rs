//! Ingest descriptor configuration and CEDAR document input.

use anyhow::{Context, Result};
use chrono::Utc;
use flate2::read::GzDecoder;
use glob::glob;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::extract::document_id;

pub const DEFAULT_INGEST_TYPE: &str = "cedar";
pub const DEFAULT_SCHEMA_VERSION: &str = "1.0.2";

/// Describes the ingest item a document belongs to. Supplied by the pipeline
/// and copied into the technical metadata of each crosswalked document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestDescriptor {
    pub ingest_type: String,
    pub ingest_item_id: Option<String>,
    pub ingest_identifier: Option<String>,
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
    pub submit_date: String,
    pub schema_version: String,
}

impl Default for IngestDescriptor {
    fn default() -> Self {
        Self {
            ingest_type: DEFAULT_INGEST_TYPE.to_string(),
            ingest_item_id: None,
            ingest_identifier: None,
            submitter_name: None,
            submitter_email: None,
            submit_date: Utc::now().to_rfc3339(),
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
        }
    }
}

impl IngestDescriptor {
    pub fn from_properties(props: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            props
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            ingest_type: get("ingest_type").unwrap_or(defaults.ingest_type),
            ingest_item_id: get("ingest_item_id"),
            ingest_identifier: get("ingest_identifier"),
            submitter_name: get("submitter_name"),
            submitter_email: get("submitter_email"),
            submit_date: get("submit_date").unwrap_or(defaults.submit_date),
            schema_version: get("schema_version").unwrap_or(defaults.schema_version),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_properties(&load_properties(path)?))
    }
}

/// Read a `key=value` properties file. Lines without `=` and `#` comments are
/// skipped; the value is everything after the first `=`.
pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    debug!("Loading properties from {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut props = HashMap::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            props.insert(key.to_string(), value.to_string());
        }
    }

    Ok(props)
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Read a JSON-LD document, transparently decompressing `.gz` files.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut contents = String::new();
    if is_gzip(path) {
        GzDecoder::new(file)
            .read_to_string(&mut contents)
            .with_context(|| format!("Failed to decompress {}", path.display()))?;
    } else {
        BufReader::new(file).read_to_string(&mut contents)?;
    }

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Documents under `input`: the path itself if it is a file, otherwise every
/// `*.json` and `*.json.gz` below it.
pub fn find_documents<P: AsRef<Path>>(input: P) -> Result<Vec<PathBuf>> {
    let input = input.as_ref();
    if fs::metadata(input)
        .with_context(|| format!("Failed to read {}", input.display()))?
        .is_file()
    {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut found = BTreeSet::new();
    for pattern in ["**/*.json", "**/*.json.gz"] {
        let pattern = input.join(pattern);
        let pattern_str = pattern.to_string_lossy();
        found.extend(glob(&pattern_str)?.filter_map(Result::ok));
    }

    Ok(found.into_iter().collect())
}

/// CEDAR id for a document: its `@id`, or the file name when it has none.
pub fn document_cedar_id(document: &Value, path: &Path) -> String {
    document_id(document).unwrap_or_else(|| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    })
}
