use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info, info_span, warn};

use crate::error::ExtractError;
use crate::model::{CedarModel, ResourceKind};
use crate::source::{document_cedar_id, read_document};
use crate::{Phase, PhaseError, ProcessResult};

pub mod jsonld;
mod parser;
mod subtype;

pub use parser::{
    document_id, extract_program, extract_project, extract_resource, extract_submission,
};
pub use subtype::{
    extract_detail, extract_geoexposure, extract_key_dataset, extract_population, extract_tool,
};

#[derive(Args)]
pub struct ExtractArgs {
    /// CEDAR JSON-LD document (.json or .json.gz)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file for the process result (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Accumulates phase outcomes for a single document.
struct ParseRun {
    cedar_id: String,
    model: CedarModel,
    errors: Vec<PhaseError>,
    message: Option<String>,
    traceback: Option<String>,
}

impl ParseRun {
    fn new(cedar_id: &str) -> Self {
        Self {
            cedar_id: cedar_id.to_string(),
            model: CedarModel::default(),
            errors: Vec::new(),
            message: None,
            traceback: None,
        }
    }

    fn record(&mut self, phase: Phase, err: ExtractError) {
        error!("exception parsing {}: {}", phase, err);
        let trace = format!("{} phase of {}: {:?}", phase, self.cedar_id, err);
        self.message = Some(err.to_string());
        self.traceback = Some(trace.clone());
        self.errors.push(PhaseError {
            phase,
            kind: err.kind().to_string(),
            message: err.to_string(),
            trace: Some(trace),
        });
    }

    /// Keeps the value of a successful phase. A failure is recorded, and
    /// stops the parse when its phase is fatal.
    fn guard<T>(
        &mut self,
        phase: Phase,
        result: Result<T, ExtractError>,
    ) -> Result<Option<T>, Halt> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.record(phase, e);
                if phase.is_fatal() {
                    Err(Halt)
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn finish(self) -> ProcessResult {
        ProcessResult {
            success: self.errors.is_empty(),
            cedar_id: self.cedar_id,
            errors: self.errors,
            message: self.message,
            traceback: self.traceback,
            model: self.model,
        }
    }
}

/// A fatal phase failed; nothing after it is attempted.
struct Halt;

fn run_phases(run: &mut ParseRun, document: &Value, cedar_id: &str) -> Result<(), Halt> {
    info!("submission phase");
    run.model.submission = run.guard(Phase::Submission, extract_submission(document, cedar_id))?;

    info!("program phase");
    run.model.program = run.guard(Phase::Program, extract_program(document))?;

    info!("project phase");
    run.model.project = run.guard(Phase::Project, extract_project(document))?;

    info!("resource phase");
    run.model.resource = run.guard(Phase::Resource, extract_resource(document))?;

    let Some(kind) = ResourceKind::detect(document) else {
        let markers: Vec<&str> = ResourceKind::ALL.iter().map(|k| k.marker()).collect();
        run.record(Phase::Detail, ExtractError::UnknownDataType(markers.join(", ")));
        return Ok(());
    };

    info!("{} phase", kind.section_name());
    run.model.kind = Some(kind);
    run.model.detail = run.guard(Phase::Detail, extract_detail(document, kind))?;

    Ok(())
}

/// Parse one CEDAR document into the intermediate model.
///
/// Submission, program and project failures end the parse. A resource failure
/// is recorded and the subtype phase is still attempted. A document with no
/// recognised subtype stanza fails with an unknown data type error.
pub fn parse_document(document: &Value, cedar_id: &str) -> ProcessResult {
    let span = info_span!("cedar_parse", cedar_id = %cedar_id);
    let _guard = span.enter();

    let mut run = ParseRun::new(cedar_id);
    // a halted run has already recorded its error
    let _ = run_phases(&mut run, document, cedar_id);
    run.finish()
}

pub fn run(args: ExtractArgs) -> Result<()> {
    crate::init_tracing()?;

    let document = read_document(&args.input)?;
    let cedar_id = document_cedar_id(&document, &args.input);
    let result = parse_document(&document, &cedar_id);

    if !result.success {
        for message in result.error_messages() {
            warn!("{}", message);
        }
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &result)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            info!("Output: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}
