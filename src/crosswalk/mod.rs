use anyhow::{anyhow, Result};
use clap::Args;
use crossbeam_channel::bounded;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::error::CrosswalkError;
use crate::extract::parse_document;
use crate::model::ResourceDetail;
use crate::rollup::{load_rollup_table, MeasuresRollup};
use crate::source::{document_cedar_id, find_documents, read_document, IngestDescriptor};
use crate::ProcessResult;

mod mapping;
pub mod target;

pub use mapping::{
    from_geospatial, from_key_dataset, from_population, merge_other, pair_positional,
    CrosswalkWarning, SubtypeBlocks,
};
use target::{
    AccelData, AccelDocument, AccelProgram, AccelProject, AccelResource, AccelSubmission,
    AccelTechnicalMetadata, LinkedText, Publication,
};

#[derive(Args)]
pub struct CrosswalkArgs {
    /// CEDAR document, or directory searched for *.json and *.json.gz
    #[arg(short, long)]
    pub input: PathBuf,

    /// Working directory for output files
    #[arg(short, long)]
    pub output: PathBuf,

    /// Measures rollup table (CSV); unknown measures roll up to "Other" without it
    #[arg(short, long, env = "CEDAR_ROLLUP_TABLE")]
    pub rollup_table: Option<PathBuf>,

    /// Ingest descriptor properties file
    #[arg(short, long)]
    pub descriptor: Option<PathBuf>,

    /// Target schema version (overrides the descriptor)
    #[arg(short, long, env = "CEDAR_SCHEMA_VERSION")]
    pub schema_version: Option<String>,

    /// Number of threads (0 = auto)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,
}

/// A target document plus the field groups that were dropped on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crosswalked {
    pub document: AccelDocument,
    pub warnings: Vec<CrosswalkWarning>,
}

/// Dropped field groups of one batch document, written to `warnings.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentWarnings {
    pub path: String,
    pub cedar_id: String,
    pub warnings: Vec<CrosswalkWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrosswalkFailure {
    pub path: String,
    pub cedar_id: String,
    pub errors: Vec<String>,
}

/// Maps extracted CEDAR models onto the target schema.
pub struct Crosswalk<'a> {
    rollup: &'a MeasuresRollup,
    descriptor: &'a IngestDescriptor,
}

impl<'a> Crosswalk<'a> {
    pub fn new(rollup: &'a MeasuresRollup, descriptor: &'a IngestDescriptor) -> Self {
        Self { rollup, descriptor }
    }

    /// Parse and crosswalk in one step.
    pub fn process_document(
        &self,
        document: &Value,
        cedar_id: &str,
    ) -> (ProcessResult, Result<Crosswalked, CrosswalkError>) {
        let result = parse_document(document, cedar_id);
        let crosswalked = self.transform(&result);
        (result, crosswalked)
    }

    pub fn transform(&self, result: &ProcessResult) -> Result<Crosswalked, CrosswalkError> {
        if !result.success {
            return Err(CrosswalkError::FailedExtraction(
                result.error_messages().join("; "),
            ));
        }

        let model = &result.model;
        let submission = model
            .submission
            .as_ref()
            .ok_or(CrosswalkError::MissingSection("submission"))?;
        let program = model
            .program
            .as_ref()
            .ok_or(CrosswalkError::MissingSection("program"))?;
        let project = model
            .project
            .as_ref()
            .ok_or(CrosswalkError::MissingSection("project"))?;
        let resource = model
            .resource
            .as_ref()
            .ok_or(CrosswalkError::MissingSection("resource"))?;

        let mut warnings = Vec::new();
        let blocks = match &model.detail {
            Some(ResourceDetail::KeyDataset(key_dataset)) => {
                from_key_dataset(key_dataset, &mut warnings)
            }
            Some(ResourceDetail::Geoexposure(geo)) => {
                from_geospatial(geo, self.rollup, &mut warnings)
            }
            Some(ResourceDetail::Population(pop)) => {
                from_population(pop, self.rollup, &mut warnings)
            }
            Some(other) => {
                return Err(CrosswalkError::UnsupportedType(
                    other.kind().section_name().to_string(),
                ))
            }
            None => return Err(CrosswalkError::UnsupportedType("none".to_string())),
        };

        let publications = pair_positional(
            "publication_citation",
            &resource.publications,
            &resource.publication_links,
            &mut warnings,
        )
        .into_iter()
        .map(|(citation, link)| Publication { citation, link })
        .collect();

        let descriptor = self.descriptor;
        let document = AccelDocument {
            schema_version: descriptor.schema_version.clone(),
            submission: AccelSubmission {
                submitter_name: descriptor
                    .submitter_name
                    .clone()
                    .or_else(|| submission.curator_name.clone()),
                submitter_email: descriptor
                    .submitter_email
                    .clone()
                    .or_else(|| submission.curator_email.clone()),
                submitter_comment: submission.curation_comment.clone(),
                template_source: submission.template_source.clone(),
            },
            technical_metadata: AccelTechnicalMetadata {
                original_source: descriptor.ingest_type.clone(),
                original_source_identifier: descriptor
                    .ingest_item_id
                    .clone()
                    .unwrap_or_else(|| result.cedar_id.clone()),
                original_source_link: submission.template_source.clone(),
                ingest_identifier: descriptor.ingest_identifier.clone(),
                created: descriptor.submit_date.clone(),
            },
            data: AccelData {
                program: AccelProgram {
                    code: program.accession.clone(),
                    name: program.name.clone(),
                    preferred_label: program.name.clone(),
                },
                project: AccelProject {
                    code: project.code.clone(),
                    name: project.name.clone(),
                    short_name: project.short_name.clone(),
                    project_sponsor: merge_other(&project.sponsor),
                    project_sponsor_type: merge_other(&project.sponsor_type),
                    project_url: project.url.clone(),
                },
                resource: AccelResource {
                    code: resource.id.clone(),
                    name: resource.name.clone(),
                    short_name: resource.short_name.clone(),
                    resource_type: resource.resource_type.clone(),
                    resource_url: resource.url.clone(),
                    description: resource.description.clone(),
                    domain: merge_other(&resource.domain),
                    access_type: resource.access_type.clone(),
                    keywords: resource.keywords.clone(),
                    publications,
                    payment_required: resource.payment_required,
                    is_static: resource.is_static,
                    resource_reference: LinkedText::from_parts(
                        resource.reference.clone(),
                        resource.reference_link.clone(),
                    ),
                    resource_use_agreement: LinkedText::from_parts(
                        resource.use_agreement.clone(),
                        resource.use_agreement_link.clone(),
                    ),
                    created_datetime: resource.created_datetime.clone(),
                    updated_datetime: resource.updated_datetime.clone(),
                    verification_datetime: resource.verification_datetime.clone(),
                },
                data_resource: blocks.data_resource,
                data_usage: blocks.data_usage,
                geospatial: blocks.geospatial,
                temporal: blocks.temporal,
                population: blocks.population,
            },
        };

        Ok(Crosswalked { document, warnings })
    }
}

enum Outcome {
    Document {
        document: Box<AccelDocument>,
        warnings: Option<DocumentWarnings>,
    },
    Failure(CrosswalkFailure),
}

fn process_file(path: &Path, crosswalk: &Crosswalk<'_>) -> Outcome {
    let document = match read_document(path) {
        Ok(d) => d,
        Err(e) => {
            return Outcome::Failure(CrosswalkFailure {
                path: path.display().to_string(),
                cedar_id: String::new(),
                errors: vec![format!("{:#}", e)],
            })
        }
    };

    let cedar_id = document_cedar_id(&document, path);
    let (result, crosswalked) = crosswalk.process_document(&document, &cedar_id);

    match crosswalked {
        Ok(c) => {
            let warnings = (!c.warnings.is_empty()).then(|| DocumentWarnings {
                path: path.display().to_string(),
                cedar_id: cedar_id.clone(),
                warnings: c.warnings,
            });
            Outcome::Document {
                document: Box::new(c.document),
                warnings,
            }
        }
        Err(e) => {
            let mut errors = result.error_messages();
            if errors.is_empty() {
                errors.push(e.to_string());
            }
            Outcome::Failure(CrosswalkFailure {
                path: path.display().to_string(),
                cedar_id,
                errors,
            })
        }
    }
}

pub fn run(args: CrosswalkArgs) -> Result<()> {
    crate::init_tracing()?;

    fs::create_dir_all(&args.output)?;

    let rollup = match &args.rollup_table {
        Some(path) => load_rollup_table(path)?,
        None => {
            warn!("No rollup table given, all measures roll up to Other");
            MeasuresRollup::default()
        }
    };
    info!("Loaded {} rollup measures", rollup.len());

    let mut descriptor = match &args.descriptor {
        Some(path) => IngestDescriptor::load(path)?,
        None => IngestDescriptor::default(),
    };
    if let Some(version) = &args.schema_version {
        descriptor.schema_version = version.clone();
    }

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();
    info!("Using {} threads", num_threads);

    let files = find_documents(&args.input)?;
    info!("Found {} documents to process", files.len());
    if files.is_empty() {
        return Ok(());
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let (tx, rx) = bounded::<Outcome>(num_threads * 4);

    let documents_path = args.output.join("accel_documents.jsonl");
    let failures_path = args.output.join("failures.jsonl");
    let warnings_path = args.output.join("warnings.jsonl");
    let writer_handle = std::thread::spawn(move || -> Result<(u64, u64)> {
        let mut documents = BufWriter::new(File::create(&documents_path)?);
        let mut failures = BufWriter::new(File::create(&failures_path)?);
        let mut dropped = BufWriter::new(File::create(&warnings_path)?);
        let (mut written, mut failed) = (0u64, 0u64);

        while let Ok(outcome) = rx.recv() {
            match outcome {
                Outcome::Document { document, warnings } => {
                    serde_json::to_writer(&mut documents, &document)?;
                    documents.write_all(b"\n")?;
                    written += 1;
                    if let Some(warnings) = warnings {
                        serde_json::to_writer(&mut dropped, &warnings)?;
                        dropped.write_all(b"\n")?;
                    }
                }
                Outcome::Failure(failure) => {
                    serde_json::to_writer(&mut failures, &failure)?;
                    failures.write_all(b"\n")?;
                    failed += 1;
                }
            }
        }

        documents.flush()?;
        failures.flush()?;
        dropped.flush()?;
        Ok((written, failed))
    });

    let crosswalk = Crosswalk::new(&rollup, &descriptor);
    files.par_iter().for_each_with(tx.clone(), |tx, path| {
        let outcome = process_file(path, &crosswalk);
        if let Outcome::Failure(failure) = &outcome {
            error!("Failed to crosswalk {}: {}", path.display(), failure.errors.join("; "));
        }
        if tx.send(outcome).is_err() {
            error!("Writer stopped before {} was written", path.display());
        }
        progress.inc(1);
    });

    drop(tx);
    let (written, failed) = writer_handle
        .join()
        .map_err(|_| anyhow!("writer thread panicked"))??;
    progress.finish();

    info!("Crosswalked {} documents, {} failed", written, failed);
    info!("Output: {}", args.output.display());

    Ok(())
}
