use serde::{Deserialize, Serialize};
use std::fmt;

pub mod crosswalk;
pub mod error;
pub mod extract;
pub mod model;
pub mod rollup;
pub mod source;

use model::CedarModel;

/// Installs the stderr log subscriber used by the CLI commands. `RUST_LOG`
/// directives apply on top of `cedar_accel=info`; a second call is a no-op.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("cedar_accel=info".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Submission,
    Program,
    Project,
    Resource,
    Detail,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Submission => "submission",
            Phase::Program => "program",
            Phase::Project => "project",
            Phase::Resource => "resource",
            Phase::Detail => "resource detail",
        }
    }

    /// Failures in these phases stop the parse.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Phase::Submission | Phase::Program | Phase::Project)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseError {
    pub phase: Phase,
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error parsing {}: {}", self.phase, self.message)
    }
}

/// Outcome of parsing one CEDAR document. Callers must check `success` and
/// `errors`; extraction failures never surface as `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub cedar_id: String,
    pub success: bool,
    pub errors: Vec<PhaseError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
    pub model: CedarModel,
}

impl ProcessResult {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
